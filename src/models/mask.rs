/// Compact per-pixel flag storage (visited and exclusion bitmaps)
#[derive(Debug, Clone)]
pub struct PixelMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelMask {
    /// Create a cleared mask with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Get mask width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get mask height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get flag at (x, y); out-of-bounds reads are `false`
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.get_index(y * self.width + x)
    }

    /// Set flag at (x, y); out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.set_index(y * self.width + x, value);
    }

    /// Get flag by row-major index
    pub fn get_index(&self, index: usize) -> bool {
        if index >= self.width * self.height {
            return false;
        }
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set flag by row-major index
    pub fn set_index(&mut self, index: usize, value: bool) {
        if index >= self.width * self.height {
            return;
        }
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Number of set flags
    pub fn count(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_mask() {
        let mut mask = PixelMask::new(8, 8);
        assert_eq!(mask.width(), 8);
        assert_eq!(mask.height(), 8);

        mask.set(3, 4, true);
        assert!(mask.get(3, 4));
        assert!(!mask.get(3, 3));
        assert!(mask.get_index(4 * 8 + 3));
        assert_eq!(mask.count(), 1);

        mask.set(3, 4, false);
        assert!(!mask.get(3, 4));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut mask = PixelMask::new(8, 8);
        mask.set(10, 10, true); // Should not panic
        assert!(!mask.get(10, 10));
        assert_eq!(mask.count(), 0);
    }
}
