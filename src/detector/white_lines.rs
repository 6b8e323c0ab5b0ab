/// Boundary line search
/// The two largest white regions in the middle column band mark the edges of
/// the scoring zone on a long pipe.
use super::connected_components::{ClusterFinder, sort_by_size_desc};
use crate::models::{PixelBuffer, PixelCoord, PixelMask};
use crate::utils::color::PixelClass;
use serde::Serialize;

/// Number of boundary lines kept per run
pub const MAX_LINES: usize = 2;

/// A white region used as a zone boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhiteLine {
    /// Mean x of the member pixels
    pub mean_x: f32,
    /// Mean y of the member pixels
    pub mean_y: f32,
    /// Member pixels
    #[serde(skip)]
    pub pixels: Vec<PixelCoord>,
}

impl WhiteLine {
    /// Number of member pixels
    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    /// Same line with its mean position divided by the per-axis scale
    pub fn to_original(&self, scale_x: f32, scale_y: f32) -> WhiteLine {
        WhiteLine {
            mean_x: self.mean_x / scale_x,
            mean_y: self.mean_y / scale_y,
            pixels: self.pixels.clone(),
        }
    }
}

/// Column band searched for lines: `[width / 4, 3 * width / 4)`
pub fn search_band(width: usize) -> std::ops::Range<usize> {
    width / 4..(3 * width) / 4
}

/// Find up to two white regions larger than `min_size`, largest first.
///
/// A non-positive `min_size` disables the search.
pub fn detect_white_lines(buffer: &PixelBuffer, min_size: i32) -> Vec<WhiteLine> {
    if min_size <= 0 {
        return Vec::new();
    }
    let min_size = min_size as usize;

    let mut visited = PixelMask::new(buffer.width(), buffer.height());
    let mut candidates: Vec<_> = ClusterFinder::new(buffer)
        .with_columns(search_band(buffer.width()))
        .find_all(&[PixelClass::White], &mut visited)
        .into_iter()
        .filter(|c| c.len() > min_size)
        .collect();
    let found = candidates.len();

    sort_by_size_desc(&mut candidates);
    candidates.truncate(MAX_LINES);

    let lines: Vec<WhiteLine> = candidates
        .into_iter()
        .map(|c| {
            let mean = c.centroid();
            WhiteLine {
                mean_x: mean.x,
                mean_y: mean.y,
                pixels: c.pixels,
            }
        })
        .collect();

    tracing::debug!(candidates = found, kept = lines.len(), "white line search");
    for line in &lines {
        tracing::trace!(x = line.mean_x, y = line.mean_y, size = line.size(), "boundary line");
    }

    lines
}
