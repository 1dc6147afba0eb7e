mod cadence;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use cadence::Cadence;
pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{
    Color, DrawCommand, DrawList, Renderer, Viewport, GLYPH_ADVANCE_PX, LINE_ADVANCE_PX,
};
pub use scene::{InputSnapshot, Rect, Scene, Vec2};
