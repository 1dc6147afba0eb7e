//! Feedback cues emitted by the session and the short-lived visuals the
//! scene keeps for them. Nothing here is read back by gameplay.

use engine::{Color, Vec2};

use super::catalog::{ResourceKind, ToyKind};

pub(crate) const FLOATING_TEXT_POOL_SIZE: usize = 16;
pub(crate) const PARTICLE_POOL_SIZE: usize = 24;
pub(crate) const FLOATING_TEXT_TTL_SECONDS: f32 = 0.82;
pub(crate) const PARTICLE_TTL_SECONDS: f32 = 0.52;
pub(crate) const PARTICLES_PER_BURST: u32 = 4;
const FLOATING_TEXT_RISE_PX_PER_SECOND: f32 = 48.0;
const PARTICLE_COLORS: [Color; 3] = [
    [0xff, 0xd7, 0x00, 0xff],
    [0xff, 0x8c, 0x42, 0xff],
    [0x7a, 0xd7, 0xf0, 0xff],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionOutcome {
    Won { total_deliveries: u32, levels: u32 },
    Lost { total_deliveries: u32, level: u32 },
}

impl SessionOutcome {
    pub(crate) fn summary(self) -> String {
        match self {
            Self::Won {
                total_deliveries,
                levels,
            } => format!(
                "Congratulations! You completed all {levels} levels with {total_deliveries} total deliveries!"
            ),
            Self::Lost {
                total_deliveries,
                level,
            } => format!(
                "Game Over! You completed {total_deliveries} deliveries across {level} level(s)!"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Effect {
    Pickup { resource: ResourceKind, at: Vec2 },
    Deposit { resource: ResourceKind, at: Vec2 },
    CraftSuccess { toy: ToyKind, at: Vec2 },
    DeliverySuccess { toy: ToyKind, at: Vec2, streak: u32 },
    FloatingText { text: String, at: Vec2 },
    ParticleBurst { at: Vec2, count: u32 },
    Announcement(String),
    LevelComplete {
        completed_level: u32,
        next_level: u32,
        time_bonus_seconds: u32,
    },
    SessionEnded(SessionOutcome),
}

impl Effect {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Pickup { .. } => "pickup",
            Self::Deposit { .. } => "deposit",
            Self::CraftSuccess { .. } => "craft_success",
            Self::DeliverySuccess { .. } => "delivery_success",
            Self::FloatingText { .. } => "floating_text",
            Self::ParticleBurst { .. } => "particle_burst",
            Self::Announcement(_) => "announcement",
            Self::LevelComplete { .. } => "level_complete",
            Self::SessionEnded(_) => "session_ended",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FloatingText {
    pub(crate) text: String,
    pub(crate) at: Vec2,
    pub(crate) age_seconds: f32,
}

impl FloatingText {
    pub(crate) fn position(&self) -> Vec2 {
        Vec2 {
            x: self.at.x,
            y: self.at.y - self.age_seconds * FLOATING_TEXT_RISE_PX_PER_SECOND,
        }
    }

    /// 255 when fresh, fading to 0 at the end of its lifetime.
    pub(crate) fn alpha(&self) -> u8 {
        fade_alpha(self.age_seconds, FLOATING_TEXT_TTL_SECONDS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Particle {
    pub(crate) at: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) color: Color,
    pub(crate) age_seconds: f32,
}

impl Particle {
    pub(crate) fn position(&self) -> Vec2 {
        Vec2 {
            x: self.at.x + self.velocity.x * self.age_seconds,
            y: self.at.y + self.velocity.y * self.age_seconds,
        }
    }

    pub(crate) fn color(&self) -> Color {
        let mut color = self.color;
        color[3] = fade_alpha(self.age_seconds, PARTICLE_TTL_SECONDS);
        color
    }
}

fn fade_alpha(age: f32, ttl: f32) -> u8 {
    let remaining = (1.0 - age / ttl).clamp(0.0, 1.0);
    (remaining * 255.0).round() as u8
}

/// Fixed-size slot pool. A spawn takes the first free slot, or recycles
/// slot 0 when every slot is busy.
#[derive(Debug, Clone)]
pub(crate) struct EffectPool<T> {
    slots: Vec<Option<T>>,
    ttl_seconds: f32,
}

pub(crate) trait Aging {
    fn age_mut(&mut self) -> &mut f32;
}

impl Aging for FloatingText {
    fn age_mut(&mut self) -> &mut f32 {
        &mut self.age_seconds
    }
}

impl Aging for Particle {
    fn age_mut(&mut self) -> &mut f32 {
        &mut self.age_seconds
    }
}

impl<T: Aging> EffectPool<T> {
    pub(crate) fn new(capacity: usize, ttl_seconds: f32) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots, ttl_seconds }
    }

    pub(crate) fn spawn(&mut self, item: T) {
        let index = self.slots.iter().position(Option::is_none).unwrap_or(0);
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(item);
        }
    }

    pub(crate) fn advance(&mut self, dt_seconds: f32) {
        let ttl = self.ttl_seconds;
        for slot in &mut self.slots {
            let expired = match slot {
                Some(item) => {
                    let age = item.age_mut();
                    *age += dt_seconds;
                    *age >= ttl
                }
                None => false,
            };
            if expired {
                *slot = None;
            }
        }
    }

    pub(crate) fn live(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live().count()
    }

    pub(crate) fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}

/// Scene-side visuals for the cues that have a screen presence.
#[derive(Debug, Clone)]
pub(crate) struct EffectVisuals {
    pub(crate) floating_texts: EffectPool<FloatingText>,
    pub(crate) particles: EffectPool<Particle>,
    bursts_spawned: u32,
}

impl Default for EffectVisuals {
    fn default() -> Self {
        Self {
            floating_texts: EffectPool::new(FLOATING_TEXT_POOL_SIZE, FLOATING_TEXT_TTL_SECONDS),
            particles: EffectPool::new(PARTICLE_POOL_SIZE, PARTICLE_TTL_SECONDS),
            bursts_spawned: 0,
        }
    }
}

impl EffectVisuals {
    pub(crate) fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::FloatingText { text, at } => self.floating_texts.spawn(FloatingText {
                text: text.clone(),
                at: *at,
                age_seconds: 0.0,
            }),
            Effect::ParticleBurst { at, count } => self.spawn_burst(*at, *count),
            _ => {}
        }
    }

    fn spawn_burst(&mut self, at: Vec2, count: u32) {
        // Fan the burst out diagonally; alternate the spin per burst.
        let spin = if self.bursts_spawned % 2 == 0 { 1.0 } else { -1.0 };
        self.bursts_spawned = self.bursts_spawned.wrapping_add(1);
        for index in 0..count {
            let angle = std::f32::consts::FRAC_PI_4
                + index as f32 * std::f32::consts::FRAC_PI_2 * spin;
            self.particles.spawn(Particle {
                at,
                velocity: Vec2 {
                    x: angle.cos() * 90.0,
                    y: angle.sin() * 90.0,
                },
                color: PARTICLE_COLORS[index as usize % PARTICLE_COLORS.len()],
                age_seconds: 0.0,
            });
        }
    }

    pub(crate) fn advance(&mut self, dt_seconds: f32) {
        self.floating_texts.advance(dt_seconds);
        self.particles.advance(dt_seconds);
    }

    pub(crate) fn clear(&mut self) {
        self.floating_texts.clear();
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(label: &str) -> FloatingText {
        FloatingText {
            text: label.to_string(),
            at: Vec2::default(),
            age_seconds: 0.0,
        }
    }

    #[test]
    fn pool_reuses_slot_zero_when_full() {
        let mut pool = EffectPool::new(2, 1.0);
        pool.spawn(text("a"));
        pool.spawn(text("b"));
        pool.spawn(text("c"));

        let labels: Vec<&str> = pool.live().map(|item| item.text.as_str()).collect();
        assert_eq!(labels, vec!["c", "b"]);
    }

    #[test]
    fn pool_frees_slots_after_ttl() {
        let mut pool = EffectPool::new(4, FLOATING_TEXT_TTL_SECONDS);
        pool.spawn(text("a"));
        pool.advance(0.5);
        pool.spawn(text("b"));
        assert_eq!(pool.live_count(), 2);

        pool.advance(0.4);
        let labels: Vec<&str> = pool.live().map(|item| item.text.as_str()).collect();
        assert_eq!(labels, vec!["b"]);
    }

    #[test]
    fn burst_spawns_requested_particles_within_capacity() {
        let mut visuals = EffectVisuals::default();
        for _ in 0..10 {
            visuals.apply(&Effect::ParticleBurst {
                at: Vec2 { x: 5.0, y: 5.0 },
                count: PARTICLES_PER_BURST,
            });
        }
        assert_eq!(visuals.particles.live_count(), PARTICLE_POOL_SIZE);
        visuals.advance(PARTICLE_TTL_SECONDS);
        assert_eq!(visuals.particles.live_count(), 0);
    }

    #[test]
    fn non_visual_cues_spawn_nothing() {
        let mut visuals = EffectVisuals::default();
        visuals.apply(&Effect::Announcement("Picked up wood".to_string()));
        visuals.apply(&Effect::Pickup {
            resource: ResourceKind::Wood,
            at: Vec2::default(),
        });
        assert_eq!(visuals.floating_texts.live_count(), 0);
        assert_eq!(visuals.particles.live_count(), 0);
    }

    #[test]
    fn fade_runs_from_opaque_to_clear() {
        let mut item = text("x");
        assert_eq!(item.alpha(), 255);
        item.age_seconds = FLOATING_TEXT_TTL_SECONDS;
        assert_eq!(item.alpha(), 0);
    }

    #[test]
    fn outcome_summaries_name_the_totals() {
        let won = SessionOutcome::Won {
            total_deliveries: 25,
            levels: 5,
        };
        assert_eq!(
            won.summary(),
            "Congratulations! You completed all 5 levels with 25 total deliveries!"
        );
        let lost = SessionOutcome::Lost {
            total_deliveries: 0,
            level: 1,
        };
        assert!(lost.summary().contains("0 deliveries across 1 level(s)"));
    }
}
