use std::time::Duration;

/// Fixed-period trigger fed by frame deltas, independent of the simulation
/// tick rate. Re-arming discards any partial period.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    period: Duration,
    accumulated: Duration,
}

impl Cadence {
    pub fn new(period: Duration) -> Self {
        let period = if period.is_zero() {
            Duration::from_secs(1)
        } else {
            period
        };
        Self {
            period,
            accumulated: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns how many whole periods completed during `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated = self.accumulated.saturating_add(elapsed);
        let mut fired = 0u32;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            fired = fired.saturating_add(1);
        }
        fired
    }

    pub fn rearm(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
