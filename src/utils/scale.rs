/// Nearest-neighbour downscaling for quantized buffers
///
/// Nearest sampling never blends channels, so a four-color buffer stays a
/// four-color buffer after resizing.
use crate::models::PixelBuffer;
use image::imageops::{self, FilterType};

/// Default minimum working width used by [`auto_scale_factor`]
pub const DEFAULT_MIN_WIDTH: usize = 1000;

/// Returns `true` when `scale` requests an actual downsample
pub fn is_downscale(scale: f32) -> bool {
    scale > 0.0 && scale < 1.0
}

/// Target dimensions for a downsample by `scale` (each side at least 1)
pub fn scaled_dimensions(width: usize, height: usize, scale: f32) -> (usize, usize) {
    if !is_downscale(scale) {
        return (width, height);
    }
    let w = ((width as f32 * scale).floor() as usize).max(1);
    let h = ((height as f32 * scale).floor() as usize).max(1);
    (w, h)
}

/// Downsample by `scale`; values outside (0, 1) return an unchanged copy
pub fn downscale_nearest(buffer: &PixelBuffer, scale: f32) -> PixelBuffer {
    if !is_downscale(scale) {
        return buffer.clone();
    }
    let (w, h) = scaled_dimensions(buffer.width(), buffer.height(), scale);
    let resized = imageops::resize(&buffer.to_rgba_image(), w as u32, h as u32, FilterType::Nearest);
    PixelBuffer::from_rgba_image(resized).unwrap_or_else(|_| buffer.clone())
}

/// Pick `1/d` for the largest integer divisor `d` that keeps the width at or
/// above `min_width`. Images already narrower than `min_width` get 1.0.
pub fn auto_scale_factor(width: usize, min_width: usize) -> f32 {
    if min_width == 0 {
        return 1.0;
    }
    let mut divisor = 1usize;
    while width / (divisor + 1) >= min_width {
        divisor += 1;
    }
    1.0 / divisor as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::color::PixelClass;

    #[test]
    fn test_auto_scale_factor() {
        assert_eq!(auto_scale_factor(800, 1000), 1.0);
        assert_eq!(auto_scale_factor(2000, 1000), 0.5);
        assert_eq!(auto_scale_factor(4032, 1000), 0.25);
        assert_eq!(auto_scale_factor(2999, 1000), 0.5);
    }

    #[test]
    fn test_downscale_preserves_palette() {
        let mut buf = PixelBuffer::filled(40, 20, [0, 0, 0, 255]).unwrap();
        for y in 0..20 {
            for x in 0..20 {
                buf.set(x, y, [255, 0, 0, 255]);
            }
        }
        let small = downscale_nearest(&buf, 0.5);
        assert_eq!((small.width(), small.height()), (20, 10));
        for y in 0..small.height() {
            for x in 0..small.width() {
                let class = small.classify(x, y).unwrap();
                assert!(matches!(class, PixelClass::Red | PixelClass::Background));
            }
        }
        assert_eq!(small.classify(2, 2), Some(PixelClass::Red));
        assert_eq!(small.classify(17, 2), Some(PixelClass::Background));
    }

    #[test]
    fn test_non_downscale_values_are_identity() {
        let buf = PixelBuffer::filled(4, 4, [1, 2, 3, 4]).unwrap();
        assert_eq!(downscale_nearest(&buf, 0.0), buf);
        assert_eq!(downscale_nearest(&buf, 1.0), buf);
        assert_eq!(downscale_nearest(&buf, -2.0), buf);
    }
}
