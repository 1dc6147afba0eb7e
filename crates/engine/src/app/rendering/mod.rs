mod draw_list;
mod renderer;
mod text;

pub use draw_list::{Color, DrawCommand, DrawList};
pub use renderer::Renderer;
pub use text::{GLYPH_ADVANCE_PX, LINE_ADVANCE_PX};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}
