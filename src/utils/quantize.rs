/// Reduce raw camera frames to the four-color palette the detector expects
///
/// Rows are processed in parallel with rayon; each output pixel depends only
/// on its input pixel, so the result is identical to a sequential pass.
use crate::error::BufferError;
use crate::models::PixelBuffer;
use rayon::prelude::*;

/// Palette values written by quantizers
pub const QUANT_RED: [u8; 4] = [255, 0, 0, 255];
/// Exact blue output
pub const QUANT_BLUE: [u8; 4] = [0, 0, 255, 255];
/// Exact white output
pub const QUANT_WHITE: [u8; 4] = [255, 255, 255, 255];
/// Background output
pub const QUANT_BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Anything that turns raw RGBA into a four-color [`PixelBuffer`]
pub trait Quantizer {
    /// Quantize `rgba` (4 bytes per pixel, row-major)
    fn quantize(&self, rgba: &[u8], width: usize, height: usize)
    -> Result<PixelBuffer, BufferError>;
}

/// Fixed-threshold quantizer tuned for field lighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdQuantizer {
    /// Red needs R above this
    pub red_min_red: u8,
    /// Red needs G below this
    pub red_max_green: u8,
    /// Red needs B below this
    pub red_max_blue: u8,
    /// Blue (RGB test) needs B above this
    pub blue_min_blue: u8,
    /// Blue (RGB test) needs R below this
    pub blue_max_red: u8,
    /// Blue (RGB test) needs G below this
    pub blue_max_green: u8,
    /// Blue (HSV test) hue range, in [0, 1]
    pub blue_hue_range: (f32, f32),
    /// Blue (HSV test) needs saturation above this
    pub blue_min_saturation: f32,
    /// White needs every channel above this
    pub white_min: u8,
}

impl Default for ThresholdQuantizer {
    fn default() -> Self {
        Self {
            red_min_red: 150,
            red_max_green: 100,
            red_max_blue: 100,
            blue_min_blue: 130,
            blue_max_red: 130,
            blue_max_green: 130,
            blue_hue_range: (0.55, 0.7),
            blue_min_saturation: 0.4,
            white_min: 200,
        }
    }
}

impl ThresholdQuantizer {
    /// Map one RGB pixel onto the palette
    pub fn quantize_pixel(&self, r: u8, g: u8, b: u8) -> [u8; 4] {
        if r > self.red_min_red && g < self.red_max_green && b < self.red_max_blue {
            return QUANT_RED;
        }
        if self.is_blue(r, g, b) {
            return QUANT_BLUE;
        }
        if r > self.white_min && g > self.white_min && b > self.white_min {
            return QUANT_WHITE;
        }
        QUANT_BACKGROUND
    }

    fn is_blue(&self, r: u8, g: u8, b: u8) -> bool {
        if b > self.blue_min_blue && r < self.blue_max_red && g < self.blue_max_green {
            return true;
        }
        let (hue, saturation) = hue_saturation(r, g, b);
        let (lo, hi) = self.blue_hue_range;
        (lo..=hi).contains(&hue) && saturation > self.blue_min_saturation
    }
}

impl Quantizer for ThresholdQuantizer {
    fn quantize(
        &self,
        rgba: &[u8],
        width: usize,
        height: usize,
    ) -> Result<PixelBuffer, BufferError> {
        // Validate dimensions against the input before allocating the output
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(BufferError::Overflow { width, height })?;
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroDimension { width, height });
        }
        if rgba.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: rgba.len(),
            });
        }

        let mut out = vec![0u8; expected];
        out.par_chunks_mut(width * 4)
            .zip(rgba.par_chunks(width * 4))
            .for_each(|(dst, src)| {
                for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                    d.copy_from_slice(&self.quantize_pixel(s[0], s[1], s[2]));
                }
            });

        PixelBuffer::new(width, height, out)
    }
}

/// HSV hue and saturation in [0, 1]
fn hue_saturation(r: u8, g: u8, b: u8) -> (f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if max == 0.0 || delta == 0.0 {
        return (0.0, 0.0);
    }
    let saturation = delta / max;
    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    (sector / 6.0, saturation)
}
