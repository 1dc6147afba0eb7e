use std::fmt;

use super::catalog::{first_level, level_count, level_def, LevelDef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub(crate) fn as_token(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerTick {
    Counting,
    Expired,
    /// The clock was already at zero.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LevelAdvance {
    Next { level: u32, time_bonus_seconds: u32 },
    AllComplete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LevelState {
    level: u32,
    def: &'static LevelDef,
    total_deliveries: u32,
    level_deliveries: u32,
    remaining_seconds: u32,
}

impl Default for LevelState {
    fn default() -> Self {
        let def = first_level();
        Self {
            level: 1,
            def,
            total_deliveries: 0,
            level_deliveries: 0,
            remaining_seconds: def.time_allotment_seconds,
        }
    }
}

impl LevelState {
    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn def(&self) -> &'static LevelDef {
        self.def
    }

    pub(crate) fn total_deliveries(&self) -> u32 {
        self.total_deliveries
    }

    pub(crate) fn level_deliveries(&self) -> u32 {
        self.level_deliveries
    }

    pub(crate) fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub(crate) fn deliveries_remaining(&self) -> u32 {
        self.def
            .required_deliveries
            .saturating_sub(self.level_deliveries)
    }

    pub(crate) fn is_final_level(&self) -> bool {
        self.level >= level_count()
    }

    /// Counts one delivery and reports whether the level quota is met.
    pub(crate) fn record_delivery(&mut self) -> bool {
        self.total_deliveries += 1;
        self.level_deliveries += 1;
        self.level_deliveries >= self.def.required_deliveries
    }

    /// Moves to the next level, adding its allotment on top of the time left.
    pub(crate) fn advance(&mut self) -> LevelAdvance {
        let Some(next) = level_def(self.level + 1) else {
            return LevelAdvance::AllComplete;
        };
        self.level += 1;
        self.def = next;
        self.level_deliveries = 0;
        self.remaining_seconds += next.time_allotment_seconds;
        LevelAdvance::Next {
            level: self.level,
            time_bonus_seconds: next.time_allotment_seconds,
        }
    }

    pub(crate) fn tick(&mut self) -> TimerTick {
        if self.remaining_seconds == 0 {
            return TimerTick::Idle;
        }
        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            TimerTick::Expired
        } else {
            TimerTick::Counting
        }
    }

    #[cfg(test)]
    pub(crate) fn set_remaining_seconds(&mut self, seconds: u32) {
        self.remaining_seconds = seconds;
    }
}

/// The order cap grows on levels `1 + k * every`; a zero cadence never grows.
pub(crate) fn cap_grows_at(level: u32, increase_every_levels: u32) -> bool {
    increase_every_levels > 0 && level > 1 && (level - 1) % increase_every_levels == 0
}

pub(crate) fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_level_one_with_its_allotment() {
        let state = LevelState::default();
        assert_eq!(state.level(), 1);
        assert_eq!(state.remaining_seconds(), 180);
        assert_eq!(state.deliveries_remaining(), 3);
    }

    #[test]
    fn advancing_adds_allotment_to_remaining_time() {
        let mut state = LevelState::default();
        state.set_remaining_seconds(12);
        let advance = state.advance();

        assert_eq!(
            advance,
            LevelAdvance::Next {
                level: 2,
                time_bonus_seconds: 150
            }
        );
        assert_eq!(state.remaining_seconds(), 162);
        assert_eq!(state.level_deliveries(), 0);
    }

    #[test]
    fn advancing_past_the_last_level_reports_completion() {
        let mut state = LevelState::default();
        for _ in 1..level_count() {
            assert!(matches!(state.advance(), LevelAdvance::Next { .. }));
        }
        assert!(state.is_final_level());
        assert_eq!(state.advance(), LevelAdvance::AllComplete);
        assert_eq!(state.level(), level_count());
    }

    #[test]
    fn quota_is_met_on_the_required_delivery() {
        let mut state = LevelState::default();
        assert!(!state.record_delivery());
        assert!(!state.record_delivery());
        assert!(state.record_delivery());
        assert_eq!(state.total_deliveries(), 3);
        assert_eq!(state.deliveries_remaining(), 0);
    }

    #[test]
    fn timer_expires_once() {
        let mut state = LevelState::default();
        state.set_remaining_seconds(2);
        assert_eq!(state.tick(), TimerTick::Counting);
        assert_eq!(state.tick(), TimerTick::Expired);
        assert_eq!(state.tick(), TimerTick::Idle);
        assert_eq!(state.remaining_seconds(), 0);
    }

    #[test]
    fn cap_growth_follows_tier_cadence() {
        assert!(cap_grows_at(2, 1));
        assert!(cap_grows_at(3, 1));
        assert!(!cap_grows_at(2, 2));
        assert!(cap_grows_at(3, 2));
        assert!(cap_grows_at(5, 2));
        assert!(!cap_grows_at(1, 1));
        assert!(!cap_grows_at(3, 0));
    }

    #[test]
    fn clock_formats_minutes_and_padded_seconds() {
        assert_eq!(format_clock(180), "3:00");
        assert_eq!(format_clock(162), "2:42");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
    }
}
