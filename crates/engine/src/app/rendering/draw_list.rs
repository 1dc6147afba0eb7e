use crate::app::Rect;

pub type Color = [u8; 4];

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    OutlineRect { rect: Rect, color: Color },
    Text { x: f32, y: f32, text: String, color: Color },
}

/// Ordered drawing commands produced by a scene each frame.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn outline_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::OutlineRect { rect, color });
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, color: Color) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
