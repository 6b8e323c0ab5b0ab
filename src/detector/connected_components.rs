/// Connected components for color clusters
/// Breadth-first flood fill over 4-connected pixels of one classified color,
/// with an explicit queue so large regions cannot overflow the stack.
use crate::models::{PixelBuffer, PixelCoord, PixelMask, Point};
use crate::utils::color::PixelClass;
use std::collections::VecDeque;
use std::ops::Range;

/// A maximal 4-connected region of same-class pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Class shared by every member
    pub class: PixelClass,
    /// Row-major index of the pixel the fill started from
    pub seed: usize,
    /// Member pixels in discovery order
    pub pixels: Vec<PixelCoord>,
}

impl Cluster {
    /// Number of member pixels
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True for a cluster without members
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Mean pixel position
    pub fn centroid(&self) -> Point {
        centroid(&self.pixels)
    }
}

/// Mean position of a pixel set; the origin for an empty set
pub fn centroid(pixels: &[PixelCoord]) -> Point {
    if pixels.is_empty() {
        return Point::default();
    }
    let (sx, sy) = pixels.iter().fold((0.0f64, 0.0f64), |(sx, sy), p| {
        (sx + p.x as f64, sy + p.y as f64)
    });
    let n = pixels.len() as f64;
    Point::new((sx / n) as f32, (sy / n) as f32)
}

/// Sort clusters largest first; equal sizes keep the earlier seed first
pub fn sort_by_size_desc(clusters: &mut [Cluster]) {
    clusters.sort_by(|a, b| b.len().cmp(&a.len()).then(a.seed.cmp(&b.seed)));
}

/// Flood-fill driver over one buffer
pub struct ClusterFinder<'a> {
    buffer: &'a PixelBuffer,
    columns: Range<usize>,
    excluded: Option<&'a PixelMask>,
}

impl<'a> ClusterFinder<'a> {
    /// Finder over the whole buffer with no exclusion mask
    pub fn new(buffer: &'a PixelBuffer) -> Self {
        Self {
            buffer,
            columns: 0..buffer.width(),
            excluded: None,
        }
    }

    /// Restrict fills (and scans) to a column band
    pub fn with_columns(mut self, columns: Range<usize>) -> Self {
        self.columns = columns.start.min(self.buffer.width())..columns.end.min(self.buffer.width());
        self
    }

    /// Skip pixels set in `excluded`; they are never added to any cluster
    pub fn with_exclusion(mut self, excluded: &'a PixelMask) -> Self {
        self.excluded = Some(excluded);
        self
    }

    fn admits(&self, x: usize, y: usize, target: PixelClass, visited: &PixelMask) -> bool {
        self.columns.contains(&x)
            && y < self.buffer.height()
            && !visited.get(x, y)
            && !self.excluded.is_some_and(|m| m.get(x, y))
            && self.buffer.classify(x, y) == Some(target)
    }

    /// Fill the region of `target` pixels containing `start`.
    ///
    /// Returns `None` when `start` is not an admissible pixel (wrong class,
    /// already visited, excluded, or outside the band). Every member is marked
    /// in `visited`.
    pub fn fill(
        &self,
        start: PixelCoord,
        target: PixelClass,
        visited: &mut PixelMask,
    ) -> Option<Cluster> {
        if !self.admits(start.x, start.y, target, visited) {
            return None;
        }

        let width = self.buffer.width();
        let mut pixels = Vec::new();
        let mut queue = VecDeque::new();
        visited.set(start.x, start.y, true);
        queue.push_back(start);

        while let Some(p) = queue.pop_front() {
            pixels.push(p);

            let neighbors = [
                (p.x.wrapping_sub(1), p.y),
                (p.x + 1, p.y),
                (p.x, p.y.wrapping_sub(1)),
                (p.x, p.y + 1),
            ];
            for (nx, ny) in neighbors {
                // wrapping_sub turns -1 into usize::MAX, which fails the bounds check
                if self.admits(nx, ny, target, visited) {
                    visited.set(nx, ny, true);
                    queue.push_back(PixelCoord::new(nx, ny));
                }
            }
        }

        Some(Cluster {
            class: target,
            seed: start.index(width),
            pixels,
        })
    }

    /// Row-major scan producing every cluster of the given classes
    pub fn find_all(&self, targets: &[PixelClass], visited: &mut PixelMask) -> Vec<Cluster> {
        let mut clusters = Vec::new();
        for y in 0..self.buffer.height() {
            for x in self.columns.clone() {
                if visited.get(x, y) {
                    continue;
                }
                let Some(class) = self.buffer.classify(x, y) else {
                    continue;
                };
                if !targets.contains(&class) {
                    continue;
                }
                if let Some(cluster) = self.fill(PixelCoord::new(x, y), class, visited) {
                    clusters.push(cluster);
                }
            }
        }
        clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn buffer_with(width: usize, height: usize, cells: &[(usize, usize, [u8; 4])]) -> PixelBuffer {
        let mut buf = PixelBuffer::filled(width, height, [0, 0, 0, 255]).unwrap();
        for &(x, y, rgba) in cells {
            buf.set(x, y, rgba);
        }
        buf
    }

    #[test]
    fn test_fill_is_four_connected() {
        // Diagonal neighbours do not join
        let buf = buffer_with(4, 4, &[(0, 0, RED), (1, 0, RED), (2, 1, RED)]);
        let mut visited = PixelMask::new(4, 4);
        let clusters = ClusterFinder::new(&buf).find_all(&[PixelClass::Red], &mut visited);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].len(), 2);
        assert_eq!(clusters[0].seed, 0);
        assert_eq!(clusters[1].len(), 1);
    }

    #[test]
    fn test_colors_do_not_mix() {
        let buf = buffer_with(3, 1, &[(0, 0, RED), (1, 0, BLUE), (2, 0, RED)]);
        let mut visited = PixelMask::new(3, 1);
        let clusters =
            ClusterFinder::new(&buf).find_all(&[PixelClass::Red, PixelClass::Blue], &mut visited);
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[1].class, PixelClass::Blue);
    }

    #[test]
    fn test_excluded_pixels_are_skipped() {
        let buf = buffer_with(3, 1, &[(0, 0, RED), (1, 0, RED), (2, 0, RED)]);
        let mut excluded = PixelMask::new(3, 1);
        excluded.set(1, 0, true);
        let mut visited = PixelMask::new(3, 1);
        let finder = ClusterFinder::new(&buf).with_exclusion(&excluded);
        let clusters = finder.find_all(&[PixelClass::Red], &mut visited);
        assert_eq!(clusters.len(), 2);
        assert!(clusters.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_column_band_limits_fill() {
        let cells: Vec<_> = (0..8).map(|x| (x, 0, RED)).collect();
        let buf = buffer_with(8, 1, &cells);
        let mut visited = PixelMask::new(8, 1);
        let clusters = ClusterFinder::new(&buf)
            .with_columns(2..6)
            .find_all(&[PixelClass::Red], &mut visited);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 4);
        assert!(!visited.get(0, 0));
    }

    #[test]
    fn test_fill_rejects_visited_start() {
        let buf = buffer_with(2, 1, &[(0, 0, RED)]);
        let mut visited = PixelMask::new(2, 1);
        let finder = ClusterFinder::new(&buf);
        assert!(finder.fill(PixelCoord::new(0, 0), PixelClass::Red, &mut visited).is_some());
        assert!(finder.fill(PixelCoord::new(0, 0), PixelClass::Red, &mut visited).is_none());
    }

    #[test]
    fn test_centroid_of_square() {
        let pixels: Vec<_> = (0..3)
            .flat_map(|y| (0..3).map(move |x| PixelCoord::new(x + 10, y + 20)))
            .collect();
        let c = centroid(&pixels);
        assert!((c.x - 11.0).abs() < 1e-6);
        assert!((c.y - 21.0).abs() < 1e-6);
    }
}
