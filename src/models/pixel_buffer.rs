use super::{BallColor, PixelCoord};
use crate::error::BufferError;
use crate::utils::color::{PixelClass, classify_rgb};
use image::RgbaImage;

/// Width x height RGBA pixels, 4 bytes per pixel, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, checking that the length matches the dimensions
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroDimension { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(BufferError::Overflow { width, height })?;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer where every pixel has the same RGBA value
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self, BufferError> {
        let pixels = width
            .checked_mul(height)
            .ok_or(BufferError::Overflow { width, height })?;
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(pixels.saturating_mul(4))
            .collect();
        Self::new(width, height, data)
    }

    /// Take ownership of an `image` RGBA buffer
    pub fn from_rgba_image(img: RgbaImage) -> Result<Self, BufferError> {
        let (width, height) = img.dimensions();
        Self::new(width as usize, height as usize, img.into_raw())
    }

    /// Copy into an `image` RGBA buffer
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
            .unwrap_or_else(|| RgbaImage::new(self.width as u32, self.height as u32))
    }

    /// Get buffer width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get buffer height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total pixel count
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Raw RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Bounds-checked RGBA read
    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Classify the pixel at (x, y); `None` when out of bounds
    pub fn classify(&self, x: usize, y: usize) -> Option<PixelClass> {
        self.get(x, y).map(|[r, g, b, _]| classify_rgb(r, g, b))
    }

    /// Classify by row-major index (caller guarantees the index is in range)
    pub(crate) fn classify_index(&self, index: usize) -> PixelClass {
        let i = index * 4;
        classify_rgb(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Overwrite a pixel with a ball color's exact RGB at full opacity
    pub fn paint(&mut self, at: PixelCoord, color: BallColor) {
        if at.x >= self.width || at.y >= self.height {
            return;
        }
        let [r, g, b] = color.rgb();
        let i = at.index(self.width) * 4;
        self.data[i..i + 4].copy_from_slice(&[r, g, b, 255]);
    }

    /// Overwrite a pixel with an arbitrary RGBA value
    pub fn set(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y * self.width + x) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }
}
