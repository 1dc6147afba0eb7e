use super::catalog::{ResourceKind, ToyKind};
use super::crafting::CraftingProgress;
use super::progress::Difficulty;
use super::proximity::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    AwaitingDifficulty,
    Running,
    Paused,
    Won,
    Lost,
}

impl Phase {
    pub(crate) fn as_token(self) -> &'static str {
        match self {
            Self::AwaitingDifficulty => "awaiting_difficulty",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    pub(crate) fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderLine {
    pub(crate) toy: ToyKind,
    pub(crate) materials: String,
    pub(crate) craftable: bool,
}

/// Everything the HUD shows, computed by the session.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DisplaySnapshot {
    pub(crate) phase: Phase,
    pub(crate) difficulty: Option<Difficulty>,
    pub(crate) time_text: String,
    pub(crate) level: u32,
    pub(crate) level_count: u32,
    pub(crate) deliveries_remaining: u32,
    pub(crate) total_deliveries: u32,
    pub(crate) carrying: Option<String>,
    pub(crate) orders: Vec<OrderLine>,
    pub(crate) bench: Vec<(ResourceKind, u32)>,
    pub(crate) progress: Option<CraftingProgress>,
    pub(crate) guidance: Option<ResourceKind>,
    pub(crate) streak_multiplier: f32,
    pub(crate) active_zone: Option<Zone>,
    pub(crate) banner: Option<String>,
}

impl DisplaySnapshot {
    pub(crate) fn carrying_text(&self) -> Option<String> {
        self.carrying
            .as_ref()
            .map(|label| format!("Carrying: {label}"))
    }

    pub(crate) fn bench_lines(&self) -> Vec<String> {
        if self.bench.is_empty() {
            return vec!["(empty)".to_string()];
        }
        self.bench
            .iter()
            .map(|(kind, count)| format!("{count}x {kind}"))
            .collect()
    }

    pub(crate) fn progress_percent(&self) -> u32 {
        self.progress.as_ref().map_or(0, CraftingProgress::percent)
    }

    pub(crate) fn needs_text(&self) -> String {
        self.progress.as_ref().map_or_else(
            || "Needs: waiting for orders".to_string(),
            CraftingProgress::needs_text,
        )
    }

    pub(crate) fn streak_text(&self) -> Option<String> {
        (self.streak_multiplier > 1.0).then(|| format!("Streak x{:.2}", self.streak_multiplier))
    }
}

pub(crate) fn materials_text(ingredients: &[(ResourceKind, u32)]) -> String {
    ingredients
        .iter()
        .map(|(kind, qty)| format!("{qty}x {kind}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn zone_hint(zone: Zone) -> String {
    use super::proximity::StationKind;
    match zone {
        Zone::Station(StationKind::Resource(kind)) => format!("E: pick up {kind}"),
        Zone::Station(StationKind::Crafting) => "E: deposit  C: craft".to_string(),
        Zone::Delivery => "E: deliver".to_string(),
    }
}
