//! Terminal presentation of a [`PixelCanvas`].

use emberdrift_canvas::PixelCanvas;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "▀";

/// Draws a canvas with two vertically stacked pixels per cell, composited
/// over black.
pub struct CanvasWidget<'a> {
    canvas: &'a PixelCanvas,
}

impl<'a> CanvasWidget<'a> {
    pub fn new(canvas: &'a PixelCanvas) -> Self {
        Self { canvas }
    }
}

impl Widget for CanvasWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = u32::from(area.width).min(self.canvas.width());
        let rows = u32::from(area.height).min(self.canvas.height().div_ceil(2));

        for row in 0..rows {
            for col in 0..cols {
                let top = pixel_color(self.canvas, col, row * 2);
                let bottom = pixel_color(self.canvas, col, row * 2 + 1);
                let position = (area.x + col as u16, area.y + row as u16);
                if let Some(cell) = buf.cell_mut(position) {
                    cell.set_symbol(HALF_BLOCK).set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}

/// Premultiplied color channels are the color over a black background.
fn pixel_color(canvas: &PixelCanvas, x: u32, y: u32) -> Color {
    let [r, g, b, _] = canvas.premul(x, y).unwrap_or([0; 4]);
    Color::Rgb(r, g, b)
}
