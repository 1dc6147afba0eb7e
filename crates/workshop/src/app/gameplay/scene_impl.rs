use engine::{DrawList, InputAction, InputSnapshot, Scene, Viewport};
use tracing::{debug, info, warn};

use crate::app::tuning::WorkshopTuning;

use super::draw::draw_scene;
use super::effects::{Effect, EffectVisuals};
use super::layout::build_layout;
use super::motion::MovementKeys;
use super::progress::Difficulty;
use super::session::{InteractionOutcome, Session};

const DIFFICULTY_KEYS: [(InputAction, Difficulty); 3] = [
    (InputAction::SelectEasy, Difficulty::Easy),
    (InputAction::SelectMedium, Difficulty::Medium),
    (InputAction::SelectHard, Difficulty::Hard),
];

pub(crate) struct WorkshopScene {
    session: Session,
    visuals: EffectVisuals,
    viewport: Viewport,
}

impl WorkshopScene {
    pub(crate) fn new(tuning: WorkshopTuning, viewport: Viewport) -> Self {
        let layout = build_layout(viewport.width, viewport.height);
        Self {
            session: Session::new(tuning, layout),
            visuals: EffectVisuals::default(),
            viewport,
        }
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        if viewport.width == 0 || viewport.height == 0 {
            return;
        }
        self.viewport = viewport;
        self.session
            .apply_layout(build_layout(viewport.width, viewport.height));
    }

    fn handle_controls(&mut self, input: &InputSnapshot) {
        if input.was_pressed(InputAction::Restart) {
            self.session.restart();
            self.visuals.clear();
            return;
        }
        for (action, difficulty) in DIFFICULTY_KEYS {
            if input.was_pressed(action) && self.session.select_difficulty(difficulty) {
                break;
            }
        }
        if input.was_pressed(InputAction::Pause) {
            self.session.toggle_pause();
        }
    }

    fn consume_effects(&mut self) {
        for effect in self.session.drain_effects() {
            log_effect(&effect);
            self.visuals.apply(&effect);
        }
    }
}

fn movement_keys(input: &InputSnapshot) -> MovementKeys {
    MovementKeys {
        up: input.is_down(InputAction::MoveUp),
        down: input.is_down(InputAction::MoveDown),
        left: input.is_down(InputAction::MoveLeft),
        right: input.is_down(InputAction::MoveRight),
    }
}

/// Cues stand in for sound and screen-reader output, so they go to the log.
fn log_effect(effect: &Effect) {
    match effect {
        Effect::Announcement(message) => info!(message = %message, "announce"),
        Effect::LevelComplete {
            completed_level,
            next_level,
            time_bonus_seconds,
        } => info!(
            completed_level,
            next_level, time_bonus_seconds, "level_complete"
        ),
        Effect::SessionEnded(outcome) => info!(summary = %outcome.summary(), "session_summary"),
        other => debug!(kind = other.kind(), "effect_cue"),
    }
}

impl Scene for WorkshopScene {
    fn load(&mut self, viewport: Viewport) {
        self.apply_viewport(viewport);
        info!(
            width = self.viewport.width,
            height = self.viewport.height,
            "scene_loaded"
        );
    }

    fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.apply_viewport(viewport);
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        self.handle_controls(input);
        self.session.step(fixed_dt_seconds, movement_keys(input));

        if input.was_pressed(InputAction::Interact)
            && self.session.interact() == InteractionOutcome::Ignored
        {
            debug!(phase = self.session.phase().as_token(), "interact_ignored");
        }
        if input.was_pressed(InputAction::Craft)
            && self.session.craft() == InteractionOutcome::Ignored
        {
            debug!(phase = self.session.phase().as_token(), "craft_ignored");
        }
        self.consume_effects();
    }

    fn timer_tick(&mut self) {
        self.session.timer_tick();
        self.consume_effects();
    }

    fn timers_armed(&self) -> bool {
        self.session.timers_armed()
    }

    fn advance_visuals(&mut self, frame_dt_seconds: f32) {
        self.visuals.advance(frame_dt_seconds);
    }

    fn draw(&self, draw_list: &mut DrawList) {
        draw_scene(&self.session, &self.session.display(), &self.visuals, draw_list);
    }

    fn title(&self) -> Option<String> {
        let snapshot = self.session.display();
        Some(format!(
            "Elf Workshop | Level {}/{} | {} | {}",
            snapshot.level,
            snapshot.level_count,
            snapshot.time_text,
            snapshot.phase.as_token()
        ))
    }

    fn unload(&mut self) {
        let state = self.session.level_state();
        if self.session.timers_armed() {
            warn!(
                level = state.level(),
                remaining_seconds = state.remaining_seconds(),
                "session_abandoned"
            );
        }
        info!(
            level = state.level(),
            total_deliveries = state.total_deliveries(),
            "scene_unloaded"
        );
    }
}
