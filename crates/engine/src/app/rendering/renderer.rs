use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::Rect;

use super::text::draw_text_clipped;
use super::{Color, DrawCommand, DrawList, Viewport};

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub fn render(&mut self, draw_list: &DrawList) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }
        let Viewport { width, height } = self.viewport;
        rasterize(self.pixels.frame_mut(), width, height, draw_list);
        self.pixels.render()
    }
}

pub(crate) fn rasterize(frame: &mut [u8], width: u32, height: u32, draw_list: &DrawList) {
    for command in draw_list.commands() {
        match command {
            DrawCommand::Clear(color) => {
                for chunk in frame.chunks_exact_mut(4) {
                    chunk.copy_from_slice(color);
                }
            }
            DrawCommand::FillRect { rect, color } => {
                let (x, y, w, h) = rect_to_px(rect);
                draw_filled_rect(frame, width, height, x, y, w, h, *color);
            }
            DrawCommand::OutlineRect { rect, color } => {
                let (x, y, w, h) = rect_to_px(rect);
                draw_rect_outline(frame, width, height, x, y, w, h, *color);
            }
            DrawCommand::Text { x, y, text, color } => {
                draw_text_clipped(
                    frame,
                    width,
                    height,
                    x.round() as i32,
                    y.round() as i32,
                    text,
                    *color,
                );
            }
        }
    }
}

fn rect_to_px(rect: &Rect) -> (i32, i32, i32, i32) {
    (
        rect.x.round() as i32,
        rect.y.round() as i32,
        rect.width.round() as i32,
        rect.height.round() as i32,
    )
}

/// Source-over blend of `color` into the pixel at (`x`, `y`). Out-of-range
/// coordinates are ignored.
pub(super) fn blend_pixel(frame: &mut [u8], width: usize, x: usize, y: usize, color: Color) {
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }

    let dst = &mut frame[byte_offset..end];
    let alpha = color[3] as u32;
    if alpha == 255 {
        dst.copy_from_slice(&color);
        return;
    }
    let inv_alpha = 255 - alpha;
    for channel in 0..3 {
        dst[channel] = ((color[channel] as u32 * alpha + dst[channel] as u32 * inv_alpha) / 255) as u8;
    }
    dst[3] = 255;
}

#[allow(clippy::too_many_arguments)]
fn draw_filled_rect(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: Color,
) {
    let start_x = x.max(0);
    let start_y = y.max(0);
    let end_x = x.saturating_add(rect_width).min(width as i32);
    let end_y = y.saturating_add(rect_height).min(height as i32);
    if end_x <= start_x || end_y <= start_y {
        return;
    }

    let width_usize = width as usize;
    for py in start_y..end_y {
        for px in start_x..end_x {
            blend_pixel(frame, width_usize, px as usize, py as usize, color);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_rect_outline(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: Color,
) {
    if rect_width <= 1 || rect_height <= 1 {
        return;
    }
    draw_filled_rect(frame, width, height, x, y, rect_width, 1, color);
    draw_filled_rect(
        frame,
        width,
        height,
        x,
        y + rect_height - 1,
        rect_width,
        1,
        color,
    );
    draw_filled_rect(frame, width, height, x, y + 1, 1, rect_height - 2, color);
    draw_filled_rect(
        frame,
        width,
        height,
        x + rect_width - 1,
        y + 1,
        1,
        rect_height - 2,
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = [255, 0, 0, 255];
    const BLACK: Color = [0, 0, 0, 255];

    fn pixel(frame: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * width + x) * 4;
        [
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]
    }

    #[test]
    fn clear_then_fill_paints_only_inside_rect() {
        let mut list = DrawList::default();
        list.clear(BLACK);
        list.fill_rect(Rect::new(2.0, 2.0, 3.0, 3.0), RED);
        let mut frame = vec![0u8; 8 * 8 * 4];
        rasterize(&mut frame, 8, 8, &list);

        assert_eq!(pixel(&frame, 8, 3, 3), RED);
        assert_eq!(pixel(&frame, 8, 0, 0), BLACK);
        assert_eq!(pixel(&frame, 8, 5, 5), BLACK);
    }

    #[test]
    fn fill_rect_partially_offscreen_is_clipped() {
        let mut list = DrawList::default();
        list.fill_rect(Rect::new(-4.0, -4.0, 6.0, 6.0), RED);
        list.fill_rect(Rect::new(6.0, 6.0, 100.0, 100.0), RED);
        let mut frame = vec![0u8; 8 * 8 * 4];
        rasterize(&mut frame, 8, 8, &list);

        assert_eq!(pixel(&frame, 8, 1, 1), RED);
        assert_eq!(pixel(&frame, 8, 7, 7), RED);
        assert_eq!(pixel(&frame, 8, 4, 4), [0, 0, 0, 0]);
    }

    #[test]
    fn outline_leaves_interior_untouched() {
        let mut list = DrawList::default();
        list.outline_rect(Rect::new(0.0, 0.0, 5.0, 5.0), RED);
        let mut frame = vec![0u8; 8 * 8 * 4];
        rasterize(&mut frame, 8, 8, &list);

        assert_eq!(pixel(&frame, 8, 0, 0), RED);
        assert_eq!(pixel(&frame, 8, 4, 4), RED);
        assert_eq!(pixel(&frame, 8, 2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn translucent_fill_blends_with_background() {
        let mut list = DrawList::default();
        list.clear(BLACK);
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), [255, 255, 255, 128]);
        let mut frame = vec![0u8; 4];
        rasterize(&mut frame, 1, 1, &list);

        let blended = pixel(&frame, 1, 0, 0);
        assert_eq!(blended[0], 128);
        assert_eq!(blended[3], 255);
    }

    #[test]
    fn short_frame_buffer_never_writes_out_of_bounds() {
        let mut list = DrawList::default();
        list.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), RED);
        list.text(0.0, 0.0, "OK", RED);
        let mut frame = vec![0u8; 4 * 4];
        rasterize(&mut frame, 8, 8, &list);
        assert!(frame.chunks_exact(4).all(|px| px == RED));
    }
}
