use crate::models::{BallColor, PixelBuffer};
use crate::utils::quantize::{QUANT_BACKGROUND, QUANT_WHITE};

/// Builder for quantized test scenes on a background canvas
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    buffer: PixelBuffer,
}

impl SceneBuilder {
    /// Background-filled canvas; `None` for a zero-sized canvas
    pub fn new(width: usize, height: usize) -> Option<Self> {
        let buffer = PixelBuffer::filled(width, height, QUANT_BACKGROUND).ok()?;
        Some(Self { buffer })
    }

    /// Filled disk of `color` (pixels with squared distance <= r^2)
    pub fn disk(mut self, cx: f32, cy: f32, r: f32, color: BallColor) -> Self {
        let [red, green, blue] = color.rgb();
        self.fill_where(
            |x, y| {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                dx * dx + dy * dy <= r * r
            },
            [red, green, blue, 255],
        );
        self
    }

    /// Filled axis-aligned rectangle of `color`
    pub fn rect(mut self, x: usize, y: usize, w: usize, h: usize, color: BallColor) -> Self {
        let [red, green, blue] = color.rgb();
        self.fill_where(
            |px, py| px >= x && px < x + w && py >= y && py < y + h,
            [red, green, blue, 255],
        );
        self
    }

    /// Full-height white stripe starting at column `x`
    pub fn white_line(mut self, x: usize, thickness: usize) -> Self {
        self.fill_where(|px, _| px >= x && px < x + thickness, QUANT_WHITE);
        self
    }

    /// Single white pixel
    pub fn white_pixel(mut self, x: usize, y: usize) -> Self {
        self.buffer.set(x, y, QUANT_WHITE);
        self
    }

    /// Finished buffer
    pub fn build(self) -> PixelBuffer {
        self.buffer
    }

    fn fill_where(&mut self, inside: impl Fn(usize, usize) -> bool, rgba: [u8; 4]) {
        for y in 0..self.buffer.height() {
            for x in 0..self.buffer.width() {
                if inside(x, y) {
                    self.buffer.set(x, y, rgba);
                }
            }
        }
    }
}
