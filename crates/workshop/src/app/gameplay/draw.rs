use engine::{Color, DrawList, Rect, Vec2, GLYPH_ADVANCE_PX, LINE_ADVANCE_PX};

use super::catalog::ResourceKind;
use super::display::{zone_hint, DisplaySnapshot, Phase};
use super::effects::EffectVisuals;
use super::motion::{Actor, Facing};
use super::proximity::{Station, StationKind, Zone};
use super::session::Session;

const BACKGROUND: Color = [0x1d, 0x2b, 0x3a, 0xff];
const FLOOR: Color = [0x2e, 0x44, 0x58, 0xff];
const PANEL: Color = [0x0b, 0x12, 0x1c, 0xc8];
const TEXT: Color = [0xf4, 0xf1, 0xe8, 0xff];
const MUTED_TEXT: Color = [0xa8, 0xb4, 0xc2, 0xff];
const ACCENT: Color = [0xff, 0xd7, 0x00, 0xff];
const CRAFTABLE: Color = [0x6b, 0xd6, 0x8a, 0xff];
const WOOD: Color = [0x8b, 0x5a, 0x2b, 0xff];
const METAL: Color = [0x8e, 0x9a, 0xa6, 0xff];
const FABRIC: Color = [0xc0, 0x4b, 0x6e, 0xff];
const BENCH: Color = [0x6a, 0x4a, 0x8c, 0xff];
const DELIVERY: Color = [0x2f, 0x8f, 0x5b, 0xff];
const ELF_BODY: Color = [0x2c, 0xa0, 0x4a, 0xff];
const ELF_HAT: Color = [0xd6, 0x2e, 0x2e, 0xff];
const PROGRESS_TRACK: Color = [0x33, 0x33, 0x44, 0xff];
const OVERLAY: Color = [0x00, 0x00, 0x00, 0xa0];

const HUD_MARGIN: f32 = 12.0;
const PANEL_PADDING: f32 = 8.0;
const ORDER_PANEL_WIDTH: f32 = 300.0;

fn resource_color(kind: ResourceKind) -> Color {
    match kind {
        ResourceKind::Wood => WOOD,
        ResourceKind::Metal => METAL,
        ResourceKind::Fabric => FABRIC,
    }
}

fn text_width(text: &str) -> f32 {
    (text.chars().count() as i32 * GLYPH_ADVANCE_PX) as f32
}

fn line_height() -> f32 {
    LINE_ADVANCE_PX as f32
}

pub(crate) fn draw_scene(
    session: &Session,
    snapshot: &DisplaySnapshot,
    visuals: &EffectVisuals,
    list: &mut DrawList,
) {
    let layout = session.layout();
    list.clear(BACKGROUND);
    list.fill_rect(layout.field.inset(4.0), FLOOR);

    for station in &layout.stations {
        draw_station(station, snapshot, list);
    }
    let delivery = layout.delivery_area.footprint;
    list.fill_rect(delivery, DELIVERY);
    draw_centered_label("DELIVERY", delivery.center(), TEXT, list);

    draw_actor(session.actor(), snapshot, list);
    draw_visuals(visuals, list);
    draw_status_panel(snapshot, list);
    draw_order_panel(snapshot, layout.field, list);
    if let Some(bench) = layout.station(StationKind::Crafting) {
        draw_bench_panel(snapshot, bench.footprint, list);
    }
    if let Some(banner) = &snapshot.banner {
        draw_banner(banner, snapshot.phase, layout.field, list);
    }
}

fn draw_station(station: &Station, snapshot: &DisplaySnapshot, list: &mut DrawList) {
    let (color, label) = match station.kind {
        StationKind::Resource(kind) => (resource_color(kind), kind.as_token().to_string()),
        StationKind::Crafting => (BENCH, "workbench".to_string()),
    };
    list.fill_rect(station.footprint, color);
    draw_centered_label(&label, station.center, TEXT, list);

    let guided = matches!(station.kind, StationKind::Resource(kind) if snapshot.guidance == Some(kind));
    if guided {
        list.outline_rect(station.footprint.inset(-6.0), ACCENT);
        list.outline_rect(station.footprint.inset(-8.0), ACCENT);
        draw_centered_label(
            "v",
            Vec2 {
                x: station.center.x,
                y: station.footprint.y - 22.0,
            },
            ACCENT,
            list,
        );
    }
    if snapshot.active_zone == Some(Zone::Station(station.kind)) {
        list.outline_rect(station.footprint.inset(-2.0), TEXT);
    }
}

fn draw_actor(actor: &Actor, snapshot: &DisplaySnapshot, list: &mut DrawList) {
    let body = actor.rect();
    list.fill_rect(body, ELF_BODY);
    let hat_height = body.height * 0.25;
    list.fill_rect(Rect::new(body.x, body.y, body.width, hat_height), ELF_HAT);

    let eye = 8.0;
    let center = body.center();
    let (dx, dy) = match actor.facing {
        Facing::Up => (0.0, -body.height * 0.2),
        Facing::Down => (0.0, body.height * 0.05),
        Facing::Left => (-body.width * 0.25, -body.height * 0.05),
        Facing::Right => (body.width * 0.25, -body.height * 0.05),
    };
    list.fill_rect(
        Rect::centered_at(
            Vec2 {
                x: center.x + dx,
                y: center.y + dy,
            },
            eye,
            eye,
        ),
        TEXT,
    );

    if let Some(label) = &snapshot.carrying {
        draw_centered_label(
            label,
            Vec2 {
                x: center.x,
                y: body.bottom() + line_height(),
            },
            ACCENT,
            list,
        );
    }
    if let Some(zone) = snapshot.active_zone {
        draw_centered_label(
            &zone_hint(zone),
            Vec2 {
                x: center.x,
                y: body.bottom() + line_height() * 2.2,
            },
            MUTED_TEXT,
            list,
        );
    }
}

fn draw_visuals(visuals: &EffectVisuals, list: &mut DrawList) {
    for particle in visuals.particles.live() {
        list.fill_rect(Rect::centered_at(particle.position(), 6.0, 6.0), particle.color());
    }
    for text in visuals.floating_texts.live() {
        let mut color = ACCENT;
        color[3] = text.alpha();
        draw_centered_label(&text.text, text.position(), color, list);
    }
}

fn draw_status_panel(snapshot: &DisplaySnapshot, list: &mut DrawList) {
    let mut lines = vec![
        (format!("Time {}", snapshot.time_text), TEXT),
        (
            format!("Level {}/{}", snapshot.level, snapshot.level_count),
            TEXT,
        ),
        (
            format!("To deliver {}", snapshot.deliveries_remaining),
            TEXT,
        ),
        (format!("Delivered {}", snapshot.total_deliveries), MUTED_TEXT),
    ];
    if let Some(difficulty) = snapshot.difficulty {
        lines.push((format!("Mode {difficulty}"), MUTED_TEXT));
    }
    if let Some(carrying) = snapshot.carrying_text() {
        lines.push((carrying, ACCENT));
    }
    if let Some(streak) = snapshot.streak_text() {
        lines.push((streak, ACCENT));
    }
    draw_text_panel(&lines, Vec2 { x: HUD_MARGIN, y: HUD_MARGIN }, list);
}

fn draw_order_panel(snapshot: &DisplaySnapshot, field: Rect, list: &mut DrawList) {
    let mut lines = vec![("Orders".to_string(), ACCENT)];
    if snapshot.orders.is_empty() {
        lines.push(("(none)".to_string(), MUTED_TEXT));
    }
    for order in &snapshot.orders {
        let (marker, color) = if order.craftable {
            ("> ", CRAFTABLE)
        } else {
            ("  ", TEXT)
        };
        lines.push((format!("{marker}{}", order.toy), color));
        lines.push((format!("    {}", order.materials), MUTED_TEXT));
    }
    let x = (field.right() - ORDER_PANEL_WIDTH - HUD_MARGIN).max(HUD_MARGIN);
    draw_text_panel(&lines, Vec2 { x, y: HUD_MARGIN }, list);
}

fn draw_bench_panel(snapshot: &DisplaySnapshot, bench: Rect, list: &mut DrawList) {
    let bar_width = bench.width.max(160.0);
    let origin = Vec2 {
        x: bench.center().x - bar_width * 0.5,
        y: bench.bottom() + 10.0,
    };

    let track = Rect::new(origin.x, origin.y, bar_width, 8.0);
    list.fill_rect(track, PROGRESS_TRACK);
    let filled = bar_width * snapshot.progress_percent() as f32 / 100.0;
    list.fill_rect(Rect::new(origin.x, origin.y, filled, 8.0), CRAFTABLE);

    let mut y = origin.y + 14.0;
    list.text(origin.x, y, snapshot.needs_text(), TEXT);
    y += line_height();
    list.text(origin.x, y, format!("Bench: {}", snapshot.bench_lines().join(", ")), MUTED_TEXT);
}

fn draw_banner(banner: &str, phase: Phase, field: Rect, list: &mut DrawList) {
    list.fill_rect(field, OVERLAY);
    let center = field.center();
    draw_centered_label(banner, center, TEXT, list);
    if phase.is_terminal() {
        draw_centered_label(
            "Press R to play again",
            Vec2 {
                x: center.x,
                y: center.y + line_height() * 2.0,
            },
            MUTED_TEXT,
            list,
        );
    }
}

fn draw_text_panel(lines: &[(String, Color)], origin: Vec2, list: &mut DrawList) {
    let width = lines
        .iter()
        .map(|(text, _)| text_width(text))
        .fold(0.0, f32::max);
    let height = lines.len() as f32 * line_height();
    list.fill_rect(
        Rect::new(
            origin.x,
            origin.y,
            width + PANEL_PADDING * 2.0,
            height + PANEL_PADDING * 2.0,
        ),
        PANEL,
    );
    for (index, (text, color)) in lines.iter().enumerate() {
        list.text(
            origin.x + PANEL_PADDING,
            origin.y + PANEL_PADDING + index as f32 * line_height(),
            text.clone(),
            *color,
        );
    }
}

fn draw_centered_label(text: &str, center: Vec2, color: Color, list: &mut DrawList) {
    list.text(
        center.x - text_width(text) * 0.5,
        center.y - line_height() * 0.5,
        text,
        color,
    );
}
