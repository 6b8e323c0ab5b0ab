//! Point inspection for calibration
//!
//! Re-runs a flood fill at a single point against the finished run's working
//! buffer. The fill uses its own visited mask and ignores exclusion, so the
//! run's balls and counts are never touched.

use crate::detector::connected_components::ClusterFinder;
use crate::models::{BallColor, PixelCoord, PixelMask};
use crate::pipeline::Detection;
use crate::utils::color::PixelClass;
use serde::Serialize;

/// What the detector saw at one point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    /// Queried pixel in working coordinates; `None` when off the buffer
    pub pixel: Option<PixelCoord>,
    /// Inside an accepted ball's exclusion disk
    pub excluded: bool,
    /// Ball color of the pixel, if it has one
    pub color: Option<BallColor>,
    /// Size of the cluster containing the pixel
    pub cluster_size: Option<usize>,
    /// Minimum cluster size for the run's parameters
    pub min_cluster_size: f32,
    /// Distance from the pixel to the nearest accepted ball center, working pixels
    pub nearest_ball_distance: Option<f32>,
    /// Human-readable summary
    pub reason: String,
}

impl Detection {
    /// Inspect the point (x, y) given in original image coordinates
    pub fn inspect(&self, x: f32, y: f32) -> Inspection {
        let mut report = Inspection {
            pixel: None,
            excluded: false,
            color: None,
            cluster_size: None,
            min_cluster_size: self.min_cluster_size,
            nearest_ball_distance: None,
            reason: String::from("not a recognized color"),
        };

        let (Some(working), Some(excluded)) = (&self.working, &self.excluded) else {
            return report;
        };
        let wx = (x * self.axes.x).round();
        let wy = (y * self.axes.y).round();
        if wx < 0.0 || wy < 0.0 || wx >= working.width() as f32 || wy >= working.height() as f32 {
            return report;
        }
        let at = PixelCoord::new(wx as usize, wy as usize);
        report.pixel = Some(at);

        if excluded.get(at.x, at.y) {
            report.excluded = true;
            report.reason = String::from("inside the exclusion zone of an accepted ball");
            return report;
        }

        let Some(color) = working.classify(at.x, at.y).and_then(PixelClass::ball_color) else {
            return report;
        };
        report.color = Some(color);

        let mut visited = PixelMask::new(working.width(), working.height());
        let size = ClusterFinder::new(working)
            .fill(at, PixelClass::from(color), &mut visited)
            .map_or(0, |c| c.len());
        report.cluster_size = Some(size);

        let here = at.to_point();
        report.nearest_ball_distance = self
            .working_centers()
            .map(|(c, _)| c.distance(&here))
            .min_by(f32::total_cmp);

        report.reason = describe(size, self.min_cluster_size, report.nearest_ball_distance);
        tracing::debug!(x = at.x, y = at.y, size, reason = %report.reason, "inspect");
        report
    }
}

fn describe(size: usize, min_size: f32, nearest: Option<f32>) -> String {
    if (size as f32) < min_size {
        return format!("cluster too small ({size} < {min_size:.0} px)");
    }
    let nearest = match nearest {
        Some(d) => format!("nearest ball {d:.1} px away"),
        None => String::from("no ball accepted yet"),
    };
    format!("cluster meets the minimum size ({size} \u{2265} {min_size:.0} px); {nearest}")
}
