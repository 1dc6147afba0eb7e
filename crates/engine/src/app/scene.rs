use super::input::{ActionStates, InputAction};
use super::rendering::{DrawList, Viewport};

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    actions: ActionStates,
    window_width: u32,
    window_height: u32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(actions: ActionStates, window_width: u32, window_height: u32) -> Self {
        Self {
            actions,
            window_width,
            window_height,
        }
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    /// True only for the tick in which the key went down; held keys do not
    /// repeat.
    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.actions.was_pressed(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self.actions.set_pressed(action, false);
        self
    }

    pub fn with_action_pressed(mut self, action: InputAction) -> Self {
        self.actions.set_pressed(action, true);
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_width = window_size.0;
        self.window_height = window_size.1;
        self
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Screen-space rectangle; `x`/`y` is the top-left corner and y grows
/// downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn centered_at(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width * 0.5,
            center.y - height * 0.5,
            width,
            height,
        )
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.x + self.width * 0.5,
            y: self.y + self.height * 0.5,
        }
    }

    /// Shrinks every edge by `amount`; never produces a negative size.
    pub fn inset(&self, amount: f32) -> Self {
        let width = (self.width - amount * 2.0).max(0.0);
        let height = (self.height - amount * 2.0).max(0.0);
        Self::centered_at(self.center(), width, height)
    }
}

/// The seam between the runtime loop and a game. The loop calls `update`
/// once per fixed tick and `timer_tick` once per elapsed timer period while
/// `timers_armed` reports true.
pub trait Scene {
    fn load(&mut self, viewport: Viewport);
    fn resize(&mut self, viewport: Viewport);
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot);
    fn timer_tick(&mut self);
    fn timers_armed(&self) -> bool;
    fn advance_visuals(&mut self, frame_dt_seconds: f32) {
        let _ = frame_dt_seconds;
    }
    fn draw(&self, draw_list: &mut DrawList);
    fn title(&self) -> Option<String> {
        None
    }
    fn unload(&mut self);
}
