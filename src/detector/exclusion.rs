/// Exclusion disks around accepted balls
/// Marked pixels can no longer seed or join a cluster in the main scan.
/// Marks are never cleared within a run.
use crate::models::{PixelMask, Point};

/// Exclusion bitmap in working coordinates
#[derive(Debug, Clone)]
pub struct ExclusionZones {
    mask: PixelMask,
    radius: f32,
}

impl ExclusionZones {
    /// Empty zones for a `width` x `height` buffer with disks of `radius` pixels
    pub fn new(width: usize, height: usize, radius: f32) -> Self {
        Self {
            mask: PixelMask::new(width, height),
            radius: radius.max(0.0),
        }
    }

    /// Disk radius in working pixels
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Mark every pixel within the disk radius of `center`; returns how many
    /// pixels were newly marked
    pub fn mark(&mut self, center: Point) -> usize {
        let width = self.mask.width();
        let height = self.mask.height();
        if width == 0 || height == 0 {
            return 0;
        }
        let r = self.radius;
        let r2 = r * r;
        let x0 = (center.x - r).floor().max(0.0) as usize;
        let y0 = (center.y - r).floor().max(0.0) as usize;
        let x1 = ((center.x + r).ceil().max(0.0) as usize).min(width - 1);
        let y1 = ((center.y + r).ceil().max(0.0) as usize).min(height - 1);

        let mut marked = 0;
        for y in y0..=y1 {
            let dy = y as f32 - center.y;
            for x in x0..=x1 {
                let dx = x as f32 - center.x;
                if dx * dx + dy * dy <= r2 && !self.mask.get(x, y) {
                    self.mask.set(x, y, true);
                    marked += 1;
                }
            }
        }
        marked
    }

    /// Whether (x, y) lies inside any marked disk
    pub fn is_excluded(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    /// Whether the pixel nearest to `p` is excluded; points off the buffer are not
    pub fn contains_point(&self, p: Point) -> bool {
        let x = p.x.round();
        let y = p.y.round();
        if x < 0.0 || y < 0.0 {
            return false;
        }
        self.mask.get(x as usize, y as usize)
    }

    /// Underlying bitmap
    pub fn mask(&self) -> &PixelMask {
        &self.mask
    }

    /// Consume into the underlying bitmap
    pub fn into_mask(self) -> PixelMask {
        self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_disk() {
        let mut zones = ExclusionZones::new(20, 20, 2.0);
        // Radius 2 disk on the integer grid has 13 pixels
        assert_eq!(zones.mark(Point::new(10.0, 10.0)), 13);
        assert!(zones.is_excluded(12, 10));
        assert!(!zones.is_excluded(12, 12));
        assert!(zones.contains_point(Point::new(9.6, 10.4)));
    }

    #[test]
    fn test_marks_are_monotonic() {
        let mut zones = ExclusionZones::new(20, 20, 2.0);
        zones.mark(Point::new(10.0, 10.0));
        // Overlapping disk only adds the pixels not yet marked
        let added = zones.mark(Point::new(11.0, 10.0));
        assert_eq!(added, 5);
        assert_eq!(zones.mask().count(), 18);
        assert!(zones.is_excluded(8, 10));
    }

    #[test]
    fn test_disk_clipped_at_edges() {
        let mut zones = ExclusionZones::new(5, 5, 3.0);
        let marked = zones.mark(Point::new(0.0, 0.0));
        assert!(marked > 0);
        assert!(zones.is_excluded(0, 0));
        assert!(!zones.is_excluded(3, 3));
        assert!(!zones.contains_point(Point::new(-1.0, 0.0)));
    }
}
