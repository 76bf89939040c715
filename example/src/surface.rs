//! A text canvas that renders one row of the seekbar.

use image::RgbaImage;
use seekbar_ranged::{Color, DrawSurface, Rect};

/// Paints primitives as characters, one column per `scale` pixels.
pub struct AsciiSurface {
    cells: Vec<char>,
    scale: f32,
    center_y: f32,
}

impl AsciiSurface {
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        let columns = (width / scale).ceil().max(1.0) as usize;
        Self {
            cells: vec![' '; columns],
            scale,
            center_y: height / 2.0,
        }
    }

    fn fill(&mut self, left: f32, right: f32, glyph: char) {
        let first = (left / self.scale).floor().max(0.0) as usize;
        let last = (right / self.scale).ceil().max(0.0) as usize;
        for cell in self.cells.iter_mut().take(last).skip(first) {
            *cell = glyph;
        }
    }

    pub fn render(&self) -> String {
        self.cells.iter().collect()
    }
}

impl DrawSurface for AsciiSurface {
    fn fill_round_rect(&mut self, rect: Rect, _corner_radius: f32, color: Color) {
        // The default progress color is blue, the track grey.
        let glyph = if color.b > color.r { '=' } else { '-' };
        if rect.top <= self.center_y && rect.bottom >= self.center_y {
            self.fill(rect.left, rect.right, glyph);
        }
    }

    fn fill_circle(&mut self, center_x: f32, _center_y: f32, _radius: f32, color: Color) {
        let glyph = if color.b > color.r { 'o' } else { '.' };
        self.fill(center_x, center_x + self.scale, glyph);
    }

    fn draw_bitmap(&mut self, image: &RgbaImage, left: f32, _top: f32) {
        let center = left + image.width() as f32 / 2.0;
        self.fill(center, center + self.scale, '#');
    }
}
