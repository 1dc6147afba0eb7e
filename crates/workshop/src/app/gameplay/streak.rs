use crate::app::tuning::StreakTuning;

/// Back-to-back delivery bonus. Times are seconds on the session clock, which
/// only advances while play is running.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Streak {
    count: u32,
    last_delivery_at: Option<f64>,
    boost_until: Option<f64>,
}

impl Streak {
    pub(crate) fn count(&self) -> u32 {
        self.count
    }

    pub(crate) fn multiplier(&self) -> f32 {
        1.0 + self.count.saturating_sub(1) as f32 * 0.25
    }

    pub(crate) fn boost_active(&self) -> bool {
        self.boost_until.is_some()
    }

    /// Registers a delivery at `now` and returns the new count.
    pub(crate) fn record_delivery(&mut self, now: f64, tuning: &StreakTuning) -> u32 {
        let window = f64::from(tuning.window_seconds);
        let chained = self
            .last_delivery_at
            .is_some_and(|last| now - last <= window);
        self.count = if chained {
            (self.count + 1).min(tuning.max_count)
        } else {
            1
        };
        self.last_delivery_at = Some(now);
        self.boost_until = Some(now + window);
        self.count
    }

    /// Clears the speed boost once its window has passed. Returns true when
    /// the boost ended on this call.
    pub(crate) fn expire(&mut self, now: f64) -> bool {
        match self.boost_until {
            Some(until) if now >= until => {
                self.boost_until = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn speed(&self, base_speed: f32, tuning: &StreakTuning) -> f32 {
        if !self.boost_active() {
            return base_speed;
        }
        base_speed + self.count.saturating_sub(1) as f32 * tuning.speed_bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_delivery_starts_at_one_without_boost() {
        let tuning = StreakTuning::default();
        let mut streak = Streak::default();
        assert_eq!(streak.record_delivery(10.0, &tuning), 1);
        assert_eq!(streak.multiplier(), 1.0);
        assert_eq!(streak.speed(280.0, &tuning), 280.0);
    }

    #[test]
    fn quick_deliveries_chain_up_to_the_cap() {
        let tuning = StreakTuning::default();
        let mut streak = Streak::default();
        streak.record_delivery(0.0, &tuning);
        assert_eq!(streak.record_delivery(2.0, &tuning), 2);
        assert_eq!(streak.speed(280.0, &tuning), 340.0);
        assert_eq!(streak.record_delivery(6.5, &tuning), 3);
        assert_eq!(streak.record_delivery(7.0, &tuning), 3);
        assert_eq!(streak.multiplier(), 1.5);
        assert_eq!(streak.speed(280.0, &tuning), 400.0);
    }

    #[test]
    fn slow_delivery_resets_the_count() {
        let tuning = StreakTuning::default();
        let mut streak = Streak::default();
        streak.record_delivery(0.0, &tuning);
        streak.record_delivery(1.0, &tuning);
        assert_eq!(streak.record_delivery(6.0, &tuning), 1);
    }

    #[test]
    fn boost_expires_after_the_window() {
        let tuning = StreakTuning::default();
        let mut streak = Streak::default();
        streak.record_delivery(0.0, &tuning);
        streak.record_delivery(1.0, &tuning);

        assert!(!streak.expire(5.0));
        assert_eq!(streak.speed(280.0, &tuning), 340.0);
        assert!(streak.expire(5.5));
        assert_eq!(streak.speed(280.0, &tuning), 280.0);
        assert!(!streak.expire(9.0));
        assert_eq!(streak.count(), 2);
    }
}
