//! The single owned game session. The scene feeds it fixed steps, key edges
//! and timer ticks; it answers with a display snapshot and a list of cues.

use engine::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::app::tuning::{DifficultySettings, WorkshopTuning};

use super::catalog::{level_count, ResourceKind, ToyKind};
use super::crafting::{
    attempt_craft, crafting_progress, deliver, deposit, gather, guidance_target, Carrying,
    CraftingBench, OrderQueue,
};
use super::display::{materials_text, DisplaySnapshot, OrderLine, Phase};
use super::effects::{Effect, SessionOutcome, PARTICLES_PER_BURST};
use super::layout::Layout;
use super::motion::{self, Actor, MotionBounds, MovementKeys};
use super::progress::{cap_grows_at, format_clock, Difficulty, LevelAdvance, LevelState, TimerTick};
use super::proximity::{
    crafting_station_distance, dispatch_interaction, find_active_zone, Interaction, StationKind,
    Zone,
};
use super::streak::Streak;

const FLOATING_TEXT_LIFT_PX: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InteractionOutcome {
    Ignored,
    Gathered(ResourceKind),
    Deposited(ResourceKind),
    Crafted(ToyKind),
    Delivered { toy: ToyKind, level_complete: bool },
}

pub(crate) struct Session {
    tuning: WorkshopTuning,
    layout: Layout,
    rng: StdRng,
    phase: Phase,
    difficulty: Option<(Difficulty, DifficultySettings)>,
    actor: Actor,
    bench: CraftingBench,
    queue: OrderQueue,
    level: LevelState,
    streak: Streak,
    clock_seconds: f64,
    effects: Vec<Effect>,
}

impl Session {
    pub(crate) fn new(tuning: WorkshopTuning, layout: Layout) -> Self {
        let rng = match tuning.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let elf = tuning.elf;
        let actor = Actor::new(spawn_position(&layout, &tuning), elf.width, elf.height, elf.speed);
        Self {
            tuning,
            layout,
            rng,
            phase: Phase::AwaitingDifficulty,
            difficulty: None,
            actor,
            bench: CraftingBench::default(),
            queue: OrderQueue::new(1),
            level: LevelState::default(),
            streak: Streak::default(),
            clock_seconds: 0.0,
            effects: Vec::new(),
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn actor(&self) -> &Actor {
        &self.actor
    }

    pub(crate) fn layout(&self) -> &Layout {
        &self.layout
    }

    pub(crate) fn bench(&self) -> &CraftingBench {
        &self.bench
    }

    pub(crate) fn queue(&self) -> &OrderQueue {
        &self.queue
    }

    pub(crate) fn level_state(&self) -> &LevelState {
        &self.level
    }

    pub(crate) fn timers_armed(&self) -> bool {
        self.phase == Phase::Running
    }

    pub(crate) fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.phase != Phase::AwaitingDifficulty {
            return false;
        }
        let settings = self.tuning.difficulties.settings(difficulty);
        self.difficulty = Some((difficulty, settings));
        self.queue = OrderQueue::new(settings.start_orders);
        self.phase = Phase::Running;
        info!(
            difficulty = %difficulty,
            start_orders = settings.start_orders,
            increase_every_levels = settings.increase_every_levels,
            single_quantity_chance = settings.single_quantity_chance,
            "session_started"
        );
        self.replenish_orders();
        true
    }

    pub(crate) fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Paused;
        self.actor.moving = false;
        info!("session_paused");
        true
    }

    pub(crate) fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Running;
        info!("session_resumed");
        true
    }

    pub(crate) fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Throws the whole session away and goes back to difficulty selection.
    /// A fixed seed replays the same order sequence.
    pub(crate) fn restart(&mut self) {
        info!(
            phase = self.phase.as_token(),
            level = self.level.level(),
            total_deliveries = self.level.total_deliveries(),
            "session_restarted"
        );
        *self = Self::new(self.tuning.clone(), self.layout.clone());
    }

    /// Swaps in a layout for a new field size and nudges the elf back inside
    /// it. Before play starts the elf is re-seated at the new spawn point.
    pub(crate) fn apply_layout(&mut self, layout: Layout) {
        self.layout = layout;
        if self.phase == Phase::AwaitingDifficulty {
            self.actor.position = spawn_position(&self.layout, &self.tuning);
        }
        let moving = self.actor.moving;
        self.actor = motion::step(
            &self.actor,
            MovementKeys::default(),
            0.0,
            &self.motion_bounds(),
            &self.layout.blockers,
        );
        self.actor.moving = moving;
        debug!(
            width = self.layout.field.width,
            height = self.layout.field.height,
            "layout_applied"
        );
    }

    pub(crate) fn step(&mut self, dt_seconds: f32, keys: MovementKeys) {
        if self.phase != Phase::Running {
            return;
        }
        self.clock_seconds += f64::from(dt_seconds);
        if self.streak.expire(self.clock_seconds) {
            self.actor.speed = self.actor.base_speed;
            debug!(streak = self.streak.count(), "streak_boost_expired");
        }

        self.actor = motion::step(
            &self.actor,
            keys,
            dt_seconds,
            &self.motion_bounds(),
            &self.layout.blockers,
        );
        self.auto_deposit();
    }

    pub(crate) fn interact(&mut self) -> InteractionOutcome {
        if self.phase != Phase::Running {
            return InteractionOutcome::Ignored;
        }
        match dispatch_interaction(self.active_zone(), self.actor.carrying) {
            Interaction::Gather(kind) => self.gather(kind),
            Interaction::Deposit => self.deposit(),
            Interaction::Deliver => self.deliver(),
            Interaction::Nothing => InteractionOutcome::Ignored,
        }
    }

    pub(crate) fn craft(&mut self) -> InteractionOutcome {
        if self.phase != Phase::Running
            || self.active_zone() != Some(Zone::Station(StationKind::Crafting))
        {
            return InteractionOutcome::Ignored;
        }
        let Some(order) = attempt_craft(&mut self.actor.carrying, &self.queue, &mut self.bench)
        else {
            return InteractionOutcome::Ignored;
        };
        info!(toy = %order.toy, order = %order.id, "toy_crafted");
        let at = self.cue_point();
        self.effects.push(Effect::CraftSuccess { toy: order.toy, at });
        self.push_flourish("Crafted!", at);
        self.effects
            .push(Effect::Announcement(format!("Crafted {}", order.toy)));
        InteractionOutcome::Crafted(order.toy)
    }

    pub(crate) fn timer_tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        match self.level.tick() {
            TimerTick::Expired => {
                self.end(SessionOutcome::Lost {
                    total_deliveries: self.level.total_deliveries(),
                    level: self.level.level(),
                });
            }
            TimerTick::Counting | TimerTick::Idle => {}
        }
    }

    pub(crate) fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub(crate) fn active_zone(&self) -> Option<Zone> {
        find_active_zone(
            self.actor.center(),
            &self.layout.stations,
            &self.layout.delivery_area,
            self.tuning.interaction_distance,
        )
    }

    pub(crate) fn display(&self) -> DisplaySnapshot {
        let difficulty = self.difficulty.map(|(difficulty, _)| difficulty);
        let orders = self
            .queue
            .orders()
            .iter()
            .map(|order| OrderLine {
                toy: order.toy,
                materials: materials_text(order.recipe.ingredients),
                craftable: self.bench.covers(order.recipe),
            })
            .collect();
        let guidance = match difficulty {
            Some(Difficulty::Easy) if self.phase == Phase::Running => {
                guidance_target(&self.queue, &self.bench, self.actor.carrying)
            }
            _ => None,
        };
        DisplaySnapshot {
            phase: self.phase,
            difficulty,
            time_text: format_clock(self.level.remaining_seconds()),
            level: self.level.level(),
            level_count: level_count(),
            deliveries_remaining: self.level.deliveries_remaining(),
            total_deliveries: self.level.total_deliveries(),
            carrying: self.actor.carrying.map(|item| item.label()),
            orders,
            bench: self.bench.contents().collect(),
            progress: crafting_progress(&self.queue, &self.bench),
            guidance,
            streak_multiplier: self.streak.multiplier(),
            active_zone: (self.phase == Phase::Running)
                .then(|| self.active_zone())
                .flatten(),
            banner: self.banner(),
        }
    }

    fn banner(&self) -> Option<String> {
        match self.phase {
            Phase::AwaitingDifficulty => {
                Some("Choose difficulty: 1 Easy   2 Medium   3 Hard".to_string())
            }
            Phase::Paused => Some("Paused - Esc to resume".to_string()),
            Phase::Won => Some(
                SessionOutcome::Won {
                    total_deliveries: self.level.total_deliveries(),
                    levels: level_count(),
                }
                .summary(),
            ),
            Phase::Lost => Some(
                SessionOutcome::Lost {
                    total_deliveries: self.level.total_deliveries(),
                    level: self.level.level(),
                }
                .summary(),
            ),
            Phase::Running => None,
        }
    }

    fn motion_bounds(&self) -> MotionBounds {
        MotionBounds {
            field: self.layout.field,
            margin: self.tuning.elf.margin,
        }
    }

    fn station_id(&self, kind: StationKind) -> &'static str {
        self.layout.station(kind).map_or("none", |station| station.id)
    }

    /// Screen point for cues, just above the elf.
    fn cue_point(&self) -> Vec2 {
        Vec2 {
            x: self.actor.center().x,
            y: self.actor.position.y - FLOATING_TEXT_LIFT_PX,
        }
    }

    fn push_flourish(&mut self, text: impl Into<String>, at: Vec2) {
        self.effects.push(Effect::FloatingText {
            text: text.into(),
            at,
        });
        self.effects.push(Effect::ParticleBurst {
            at,
            count: PARTICLES_PER_BURST,
        });
    }

    fn auto_deposit(&mut self) {
        if !matches!(self.actor.carrying, Some(Carrying::Resource(_))) {
            return;
        }
        let Some(distance) = crafting_station_distance(self.actor.center(), &self.layout.stations)
        else {
            return;
        };
        if distance < self.tuning.auto_deposit_factor * self.tuning.interaction_distance {
            self.deposit();
        }
    }

    fn gather(&mut self, kind: ResourceKind) -> InteractionOutcome {
        if !gather(&mut self.actor.carrying, kind) {
            return InteractionOutcome::Ignored;
        }
        debug!(
            resource = %kind,
            station = self.station_id(StationKind::Resource(kind)),
            "resource_gathered"
        );
        let at = self.cue_point();
        self.effects.push(Effect::Pickup { resource: kind, at });
        self.push_flourish(format!("+1 {kind}"), at);
        self.effects
            .push(Effect::Announcement(format!("Picked up {kind}")));
        InteractionOutcome::Gathered(kind)
    }

    fn deposit(&mut self) -> InteractionOutcome {
        let Some(kind) = deposit(&mut self.actor.carrying, &mut self.bench) else {
            return InteractionOutcome::Ignored;
        };
        debug!(
            resource = %kind,
            station = self.station_id(StationKind::Crafting),
            on_bench = self.bench.count(kind),
            "resource_deposited"
        );
        let at = self.cue_point();
        self.effects.push(Effect::Deposit { resource: kind, at });
        InteractionOutcome::Deposited(kind)
    }

    fn deliver(&mut self) -> InteractionOutcome {
        let Some(order) = deliver(&mut self.actor.carrying, &mut self.queue) else {
            return InteractionOutcome::Ignored;
        };
        let streak = self.streak.record_delivery(self.clock_seconds, &self.tuning.streak);
        self.actor.speed = self.streak.speed(self.actor.base_speed, &self.tuning.streak);
        let level_complete = self.level.record_delivery();
        info!(
            toy = %order.toy,
            order = %order.id,
            level = self.level.level(),
            level_deliveries = self.level.level_deliveries(),
            streak,
            "toy_delivered"
        );

        let at = self.cue_point();
        self.effects.push(Effect::DeliverySuccess {
            toy: order.toy,
            at,
            streak,
        });
        self.push_flourish("Delivered!", at);
        self.effects
            .push(Effect::Announcement(format!("Delivered {}", order.toy)));

        if level_complete {
            self.complete_level();
        } else {
            self.replenish_orders();
        }
        InteractionOutcome::Delivered {
            toy: order.toy,
            level_complete,
        }
    }

    fn complete_level(&mut self) {
        let completed_level = self.level.level();
        match self.level.advance() {
            LevelAdvance::AllComplete => {
                self.end(SessionOutcome::Won {
                    total_deliveries: self.level.total_deliveries(),
                    levels: level_count(),
                });
            }
            LevelAdvance::Next {
                level,
                time_bonus_seconds,
            } => {
                let every = self
                    .difficulty
                    .map_or(1, |(_, settings)| settings.increase_every_levels);
                if cap_grows_at(level, every) {
                    self.queue.grow_cap();
                }
                self.queue.clear();
                info!(
                    level,
                    time_bonus_seconds,
                    remaining_seconds = self.level.remaining_seconds(),
                    max_orders = self.queue.max_len(),
                    "level_advanced"
                );
                self.effects.push(Effect::LevelComplete {
                    completed_level,
                    next_level: level,
                    time_bonus_seconds,
                });
                let mut announcement = format!(
                    "Level {completed_level} Complete! Starting Level {level}. Time Bonus: +{time_bonus_seconds} seconds"
                );
                if self.level.is_final_level() {
                    announcement.push_str(". Final level!");
                }
                self.effects.push(Effect::Announcement(announcement));
                self.replenish_orders();
            }
        }
    }

    fn replenish_orders(&mut self) {
        let outstanding = self.level.deliveries_remaining();
        let unlocked = self.level.def().unlocked_toys;
        for order in self.queue.replenish(outstanding, unlocked, &mut self.rng) {
            debug!(toy = %order.toy, order = %order.id, "order_generated");
        }
    }

    fn end(&mut self, outcome: SessionOutcome) {
        self.phase = match outcome {
            SessionOutcome::Won { .. } => Phase::Won,
            SessionOutcome::Lost { .. } => Phase::Lost,
        };
        self.actor.moving = false;
        info!(outcome = self.phase.as_token(), summary = %outcome.summary(), "session_ended");
        self.effects.push(Effect::SessionEnded(outcome));
    }

    #[cfg(test)]
    pub(crate) fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    #[cfg(test)]
    pub(crate) fn level_state_mut(&mut self) -> &mut LevelState {
        &mut self.level
    }
}

/// Top-left position that puts the elf's center on the layout spawn point.
fn spawn_position(layout: &Layout, tuning: &WorkshopTuning) -> Vec2 {
    let spawn = layout.spawn_point();
    Vec2 {
        x: spawn.x - tuning.elf.width * 0.5,
        y: spawn.y - tuning.elf.height * 0.5,
    }
}
