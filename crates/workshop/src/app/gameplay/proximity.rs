use engine::{Rect, Vec2};

use super::catalog::ResourceKind;
use super::crafting::Carrying;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StationKind {
    Resource(ResourceKind),
    Crafting,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Station {
    pub(crate) id: &'static str,
    pub(crate) kind: StationKind,
    pub(crate) center: Vec2,
    pub(crate) footprint: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DeliveryArea {
    pub(crate) footprint: Rect,
}

impl DeliveryArea {
    pub(crate) fn center(&self) -> Vec2 {
        self.footprint.center()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Zone {
    Station(StationKind),
    Delivery,
}

/// What the interact key would do in `zone` with the current hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interaction {
    Deliver,
    Deposit,
    Gather(ResourceKind),
    Nothing,
}

pub(crate) fn distance(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Nearest station or delivery area strictly inside `radius` of `point`.
/// Ties keep the earlier candidate, stations before the delivery area.
pub(crate) fn find_active_zone(
    point: Vec2,
    stations: &[Station],
    delivery: &DeliveryArea,
    radius: f32,
) -> Option<Zone> {
    let candidates = stations
        .iter()
        .map(|station| (Zone::Station(station.kind), station.center))
        .chain(std::iter::once((Zone::Delivery, delivery.center())));

    let mut best: Option<(Zone, f32)> = None;
    for (zone, center) in candidates {
        let d = distance(point, center);
        if d >= radius {
            continue;
        }
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((zone, d));
        }
    }
    best.map(|(zone, _)| zone)
}

pub(crate) fn crafting_station_distance(point: Vec2, stations: &[Station]) -> Option<f32> {
    stations
        .iter()
        .find(|station| station.kind == StationKind::Crafting)
        .map(|station| distance(point, station.center))
}

pub(crate) fn dispatch_interaction(zone: Option<Zone>, carrying: Option<Carrying>) -> Interaction {
    match (zone, carrying) {
        (Some(Zone::Delivery), Some(Carrying::Toy(_))) => Interaction::Deliver,
        (Some(Zone::Station(StationKind::Crafting)), Some(Carrying::Resource(_))) => {
            Interaction::Deposit
        }
        (Some(Zone::Station(StationKind::Resource(kind))), None) => Interaction::Gather(kind),
        _ => Interaction::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::super::catalog::ToyKind;
    use super::*;

    fn station(id: &'static str, kind: StationKind, x: f32, y: f32) -> Station {
        Station {
            id,
            kind,
            center: Vec2 { x, y },
            footprint: Rect::centered_at(Vec2 { x, y }, 80.0, 80.0),
        }
    }

    fn fixture() -> (Vec<Station>, DeliveryArea) {
        let stations = vec![
            station("wood", StationKind::Resource(ResourceKind::Wood), 100.0, 100.0),
            station("metal", StationKind::Resource(ResourceKind::Metal), 100.0, 300.0),
            station("bench", StationKind::Crafting, 400.0, 300.0),
        ];
        let delivery = DeliveryArea {
            footprint: Rect::centered_at(Vec2 { x: 700.0, y: 300.0 }, 120.0, 120.0),
        };
        (stations, delivery)
    }

    #[test]
    fn nothing_in_range_yields_no_zone() {
        let (stations, delivery) = fixture();
        assert_eq!(find_active_zone(Vec2 { x: 250.0, y: 200.0 }, &stations, &delivery, 110.0), None);
    }

    #[test]
    fn nearest_zone_wins() {
        let (stations, delivery) = fixture();
        // 60 from wood, 140 from metal.
        let zone = find_active_zone(Vec2 { x: 100.0, y: 160.0 }, &stations, &delivery, 110.0);
        assert_eq!(zone, Some(Zone::Station(StationKind::Resource(ResourceKind::Wood))));
        // 90 from wood, 110 from metal; metal sits exactly on the radius.
        let zone = find_active_zone(Vec2 { x: 100.0, y: 190.0 }, &stations, &delivery, 110.0);
        assert_eq!(zone, Some(Zone::Station(StationKind::Resource(ResourceKind::Wood))));
        let zone = find_active_zone(Vec2 { x: 100.0, y: 210.0 }, &stations, &delivery, 200.0);
        assert_eq!(zone, Some(Zone::Station(StationKind::Resource(ResourceKind::Metal))));
    }

    #[test]
    fn radius_is_strict() {
        let (stations, delivery) = fixture();
        let edge = Vec2 { x: 700.0, y: 410.0 };
        assert_eq!(find_active_zone(edge, &stations, &delivery, 110.0), None);
        assert_eq!(find_active_zone(edge, &stations, &delivery, 110.5), Some(Zone::Delivery));
    }

    #[test]
    fn crafting_distance_is_independent_of_nearest_zone() {
        let (stations, _) = fixture();
        let point = Vec2 { x: 400.0, y: 200.0 };
        assert_eq!(crafting_station_distance(point, &stations), Some(100.0));
        assert_eq!(crafting_station_distance(point, &stations[..2]), None);
    }

    #[test]
    fn dispatch_follows_zone_and_hands() {
        let wood = Some(Zone::Station(StationKind::Resource(ResourceKind::Wood)));
        let bench = Some(Zone::Station(StationKind::Crafting));
        let toy = Some(Carrying::Toy(ToyKind::Train));
        let metal = Some(Carrying::Resource(ResourceKind::Metal));

        assert_eq!(dispatch_interaction(wood, None), Interaction::Gather(ResourceKind::Wood));
        assert_eq!(dispatch_interaction(wood, metal), Interaction::Nothing);
        assert_eq!(dispatch_interaction(bench, metal), Interaction::Deposit);
        assert_eq!(dispatch_interaction(bench, toy), Interaction::Nothing);
        assert_eq!(dispatch_interaction(Some(Zone::Delivery), toy), Interaction::Deliver);
        assert_eq!(dispatch_interaction(Some(Zone::Delivery), metal), Interaction::Nothing);
        assert_eq!(dispatch_interaction(None, toy), Interaction::Nothing);
    }
}
