//! RoboScore Vision - ball counting for quantized goal-pipe captures
//!
//! The detector takes a buffer already reduced to four exact colors (red,
//! blue, white, background) and reports how many red and blue balls sit in
//! the middle zone between two white boundary lines, and how many sit outside.
//!
//! A run goes through these stages:
//! 1. Optional nearest-neighbour downscale
//! 2. Boundary line search (long pipes only)
//! 3. White-seam reclassification around large colored clusters
//! 4. Row-major scan: flood fill, size gate, multi-ball split, exclusion
//! 5. Zone assignment and counting
//!
//! Every run owns its scratch state, so detection is a pure function of the
//! buffer, the parameters and the principal angle.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Detection parameters and pipe type
pub mod config;
/// Ball detection stages (clusters, reclassification, lines, blobs, zones)
pub mod detector;
/// Error types for buffer construction and parameter loading
pub mod error;
/// Point inspection for calibration
pub mod inspect;
/// Core data structures (PixelBuffer, Ball, ZoneCounts, etc.)
pub mod models;
/// Review overlay rendering
pub mod overlay;
/// Main scan tying the stages together
pub mod pipeline;
/// Image loading and dataset helpers for the CLI, tests and benches
pub mod tools;
/// Utility functions (color classification, scaling, quantization)
pub mod utils;

pub use config::{DetectionParameters, PipeType};
pub use detector::white_lines::WhiteLine;
pub use error::{BufferError, LoadError, ParamsError};
pub use inspect::Inspection;
pub use models::{Ball, BallColor, PixelBuffer, PixelCoord, Point, ZoneCounts};
pub use pipeline::Detection;

use rayon::prelude::*;

/// Detect balls in a quantized buffer
///
/// `params.pipe_type` selects the ball size and zone policy. No principal
/// angle correction is applied; use [`Detector`] for tilted captures.
pub fn detect(buffer: &PixelBuffer, params: &DetectionParameters) -> Detection {
    pipeline::run(buffer, params, 0.0)
}

/// Detect balls in raw RGBA bytes
///
/// # Arguments
/// * `rgba` - Raw RGBA bytes (4 bytes per pixel, row-major)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `params` - Detection parameters
///
/// # Returns
/// The detection, or [`Detection::empty`] when the bytes cannot form a buffer
pub fn detect_rgba(
    rgba: &[u8],
    width: usize,
    height: usize,
    params: &DetectionParameters,
) -> Detection {
    match PixelBuffer::new(width, height, rgba.to_vec()) {
        Ok(buffer) => detect(&buffer, params),
        Err(err) => {
            tracing::warn!(%err, "unusable input buffer");
            Detection::empty()
        }
    }
}

/// Detect balls in several buffers in parallel
///
/// Each buffer gets its own independent run; results keep the input order.
pub fn detect_batch(buffers: &[PixelBuffer], params: &DetectionParameters) -> Vec<Detection> {
    buffers.par_iter().map(|b| detect(b, params)).collect()
}

/// Reusable detector holding parameters and a principal-angle hint
#[derive(Debug, Clone, Default)]
pub struct Detector {
    params: DetectionParameters,
    principal_angle: f32,
}

impl Detector {
    /// Detector with the given parameters and no angle correction
    pub fn new(params: DetectionParameters) -> Self {
        Self {
            params,
            principal_angle: 0.0,
        }
    }

    /// Rotate cluster geometry by `-angle` radians before split analysis
    pub fn with_principal_angle(mut self, angle: f32) -> Self {
        self.principal_angle = angle;
        self
    }

    /// Parameters in use
    pub fn params(&self) -> &DetectionParameters {
        &self.params
    }

    /// Principal-angle hint in radians
    pub fn principal_angle(&self) -> f32 {
        self.principal_angle
    }

    /// Run one detection
    pub fn detect(&self, buffer: &PixelBuffer) -> Detection {
        pipeline::run(buffer, &self.params, self.principal_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_rgba_bad_buffer_is_empty() {
        let d = detect_rgba(&[0u8; 10], 2, 2, &DetectionParameters::default());
        assert!(d.counts.is_empty());
        assert!(d.balls.is_empty());
        assert!(!d.has_run_state());
    }

    #[test]
    fn test_detect_rgba_background() {
        let bytes = [0u8, 0, 0, 255].repeat(64 * 32);
        let d = detect_rgba(&bytes, 64, 32, &DetectionParameters::default());
        assert!(d.counts.is_empty());
        assert!(d.has_run_state());
    }

    #[test]
    fn test_detector_defaults() {
        let det = Detector::new(DetectionParameters::default()).with_principal_angle(0.25);
        assert_eq!(det.principal_angle(), 0.25);
        assert_eq!(det.params().pipe_type, PipeType::Long);
    }

    #[test]
    fn test_batch_keeps_order() {
        let empty = PixelBuffer::filled(100, 50, [0, 0, 0, 255]).unwrap();
        let mut one = empty.clone();
        for y in 20..30 {
            for x in 45..55 {
                one.set(x, y, [0, 0, 255, 255]);
            }
        }
        let params = DetectionParameters {
            ball_radius_ratio: 0.05,
            ..DetectionParameters::default()
        };
        let results = detect_batch(&[empty, one], &params);
        assert_eq!(results[0].counts.total(), 0);
        assert_eq!(results[1].counts.blue_outside, 1);
    }
}
