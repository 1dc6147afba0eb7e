use engine::{Rect, Vec2};

use super::catalog::ResourceKind;
use super::proximity::{DeliveryArea, Station, StationKind};

const STATION_SIZE: f32 = 96.0;
const BENCH_WIDTH: f32 = 168.0;
const BENCH_HEIGHT: f32 = 104.0;
const DELIVERY_SIZE: f32 = 136.0;
const BLOCKER_INSET_RATIO: f32 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Layout {
    pub(crate) field: Rect,
    pub(crate) stations: Vec<Station>,
    pub(crate) delivery_area: DeliveryArea,
    pub(crate) blockers: Vec<Rect>,
}

impl Layout {
    pub(crate) fn station(&self, kind: StationKind) -> Option<&Station> {
        self.stations.iter().find(|station| station.kind == kind)
    }

    /// Where the elf's center starts a session.
    pub(crate) fn spawn_point(&self) -> Vec2 {
        Vec2 {
            x: self.field.x + self.field.width * 0.5,
            y: self.field.y + self.field.height * 0.45,
        }
    }
}

/// Places stations at fixed fractions of a `width` x `height` field.
pub(crate) fn build_layout(width: u32, height: u32) -> Layout {
    let field = Rect::new(0.0, 0.0, width as f32, height as f32);
    let at = |fx: f32, fy: f32| Vec2 {
        x: field.width * fx,
        y: field.height * fy,
    };

    let placements = [
        (
            "wood-station",
            StationKind::Resource(ResourceKind::Wood),
            at(0.14, 0.32),
            (STATION_SIZE, STATION_SIZE),
        ),
        (
            "metal-station",
            StationKind::Resource(ResourceKind::Metal),
            at(0.14, 0.55),
            (STATION_SIZE, STATION_SIZE),
        ),
        (
            "fabric-station",
            StationKind::Resource(ResourceKind::Fabric),
            at(0.14, 0.78),
            (STATION_SIZE, STATION_SIZE),
        ),
        (
            "crafting-station",
            StationKind::Crafting,
            at(0.50, 0.74),
            (BENCH_WIDTH, BENCH_HEIGHT),
        ),
    ];
    let stations: Vec<Station> = placements
        .into_iter()
        .map(|(id, kind, center, (w, h))| Station {
            id,
            kind,
            center,
            footprint: Rect::centered_at(center, w, h),
        })
        .collect();
    let delivery_area = DeliveryArea {
        footprint: Rect::centered_at(at(0.86, 0.55), DELIVERY_SIZE, DELIVERY_SIZE),
    };

    let blockers = stations
        .iter()
        .map(|station| station.footprint)
        .chain(std::iter::once(delivery_area.footprint))
        .map(blocker_for)
        .collect();

    Layout {
        field,
        stations,
        delivery_area,
        blockers,
    }
}

/// Shrinks a footprint so the elf can stand partly over the sprite.
fn blocker_for(footprint: Rect) -> Rect {
    footprint.inset(footprint.width.min(footprint.height) * BLOCKER_INSET_RATIO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(outer: &Rect, inner: &Rect) -> bool {
        inner.x >= outer.x
            && inner.y >= outer.y
            && inner.right() <= outer.right()
            && inner.bottom() <= outer.bottom()
    }

    #[test]
    fn every_station_kind_is_placed_once() {
        let layout = build_layout(1280, 720);
        assert_eq!(layout.stations.len(), 4);
        for kind in ResourceKind::ALL {
            assert!(layout.station(StationKind::Resource(kind)).is_some(), "{kind}");
        }
        assert!(layout.station(StationKind::Crafting).is_some());
    }

    #[test]
    fn blockers_are_inset_footprints_inside_the_field() {
        for (width, height) in [(1280, 720), (800, 600), (1920, 1080)] {
            let layout = build_layout(width, height);
            assert_eq!(layout.blockers.len(), layout.stations.len() + 1);
            for (blocker, station) in layout.blockers.iter().zip(&layout.stations) {
                assert!(contains(&station.footprint, blocker));
                let center = blocker.center();
                assert!((center.x - station.center.x).abs() < 1e-3);
                assert!((center.y - station.center.y).abs() < 1e-3);
                assert!(contains(&layout.field, blocker));
            }
        }
    }

    #[test]
    fn station_blocker_loses_a_quarter_of_the_smaller_side_per_edge() {
        let layout = build_layout(1280, 720);
        let bench = layout.station(StationKind::Crafting).expect("bench");
        let blocker = layout.blockers[3];
        let inset = BENCH_HEIGHT * BLOCKER_INSET_RATIO;
        assert_eq!(blocker.width, bench.footprint.width - inset * 2.0);
        assert_eq!(blocker.height, bench.footprint.height - inset * 2.0);
    }

    #[test]
    fn spawn_point_is_clear_of_blockers() {
        let layout = build_layout(1280, 720);
        let spawn = Rect::centered_at(layout.spawn_point(), 60.0, 80.0);
        for blocker in &layout.blockers {
            assert!(!super::super::collision::intersects(&spawn, blocker));
        }
    }

    #[test]
    fn layout_scales_with_the_field() {
        let small = build_layout(800, 600);
        let large = build_layout(1600, 1200);
        let small_wood = small.station(StationKind::Resource(ResourceKind::Wood)).expect("wood");
        let large_wood = large.station(StationKind::Resource(ResourceKind::Wood)).expect("wood");
        assert!((large_wood.center.x - small_wood.center.x * 2.0).abs() < 1e-3);
    }
}
