//! Detection parameters
//!
//! Parameters load from JSON (missing fields fall back to defaults) and can be
//! overridden from `ROBOSCORE_*` environment variables. The detector never
//! reads the environment itself; callers opt in with
//! [`DetectionParameters::with_env_overrides`].

use crate::error::ParamsError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Ball radius as a fraction of image width for short pipes
pub const SHORT_PIPE_RADIUS_RATIO: f32 = 0.045;

/// Which goal the capture shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipeType {
    /// Short goal: larger balls, every ball scores as middle, no line search
    Short,
    /// Long goal: boundary lines split middle from outside
    #[default]
    Long,
    /// No hint; treated like a long goal
    None,
}

impl FromStr for PipeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(PipeType::Short),
            "long" => Ok(PipeType::Long),
            "none" => Ok(PipeType::None),
            other => Err(format!("unknown pipe type: {other}")),
        }
    }
}

/// Tunable parameters for one detection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParameters {
    /// Ball radius as a fraction of the original image width
    pub ball_radius_ratio: f32,
    /// Exclusion disk radius as a multiple of the ball radius
    pub exclusion_radius_multiplier: f32,
    /// Minimum cluster area, as a percentage of a full ball disk
    pub ball_area_percentage: f32,
    /// White clusters must be strictly larger than this to be boundary lines;
    /// zero or negative disables line detection
    pub min_white_line_size: i32,
    /// Downsample factor applied before analysis; only values in (0, 1) scale
    pub image_scale: f32,
    /// Upper bound on balls produced by splitting one cluster
    pub max_balls_in_cluster: usize,
    /// Rotated bounding-box width/height ratio at which splitting starts
    pub cluster_split_threshold: f32,
    /// Minimum distance between split centers, as a fraction of the ball diameter
    pub min_cluster_separation: f32,
    /// Breadth-first steps taken outward from a cluster border when reclaiming white
    pub white_pixel_expansion_distance: usize,
    /// Per color, at most this many of the largest clusters are expanded
    pub max_clusters_to_expand: usize,
    /// Clusters below this pixel count are never expanded
    pub min_cluster_size_to_expand: usize,
    /// Pipe hint
    pub pipe_type: PipeType,
}

impl Default for DetectionParameters {
    fn default() -> Self {
        Self {
            ball_radius_ratio: 0.025,
            exclusion_radius_multiplier: 0.8,
            ball_area_percentage: 40.0,
            min_white_line_size: 100,
            image_scale: 1.0,
            max_balls_in_cluster: 6,
            cluster_split_threshold: 1.5,
            min_cluster_separation: 0.7,
            white_pixel_expansion_distance: 3,
            max_clusters_to_expand: 20,
            min_cluster_size_to_expand: 50,
            pipe_type: PipeType::Long,
        }
    }
}

impl DetectionParameters {
    /// Parse parameters from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse parameters from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, ParamsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Same parameters with a different pipe type
    pub fn with_pipe_type(mut self, pipe_type: PipeType) -> Self {
        self.pipe_type = pipe_type;
        self
    }

    /// Apply `ROBOSCORE_<FIELD>` environment overrides; unparsable values are ignored
    pub fn with_env_overrides(mut self) -> Self {
        self.ball_radius_ratio = parse_env("ROBOSCORE_BALL_RADIUS_RATIO", self.ball_radius_ratio);
        self.exclusion_radius_multiplier = parse_env(
            "ROBOSCORE_EXCLUSION_RADIUS_MULTIPLIER",
            self.exclusion_radius_multiplier,
        );
        self.ball_area_percentage =
            parse_env("ROBOSCORE_BALL_AREA_PERCENTAGE", self.ball_area_percentage);
        self.min_white_line_size =
            parse_env("ROBOSCORE_MIN_WHITE_LINE_SIZE", self.min_white_line_size);
        self.image_scale = parse_env("ROBOSCORE_IMAGE_SCALE", self.image_scale);
        self.max_balls_in_cluster =
            parse_env("ROBOSCORE_MAX_BALLS_IN_CLUSTER", self.max_balls_in_cluster);
        self.cluster_split_threshold = parse_env(
            "ROBOSCORE_CLUSTER_SPLIT_THRESHOLD",
            self.cluster_split_threshold,
        );
        self.min_cluster_separation =
            parse_env("ROBOSCORE_MIN_CLUSTER_SEPARATION", self.min_cluster_separation);
        self.white_pixel_expansion_distance = parse_env(
            "ROBOSCORE_WHITE_PIXEL_EXPANSION_DISTANCE",
            self.white_pixel_expansion_distance,
        );
        self.max_clusters_to_expand =
            parse_env("ROBOSCORE_MAX_CLUSTERS_TO_EXPAND", self.max_clusters_to_expand);
        self.min_cluster_size_to_expand = parse_env(
            "ROBOSCORE_MIN_CLUSTER_SIZE_TO_EXPAND",
            self.min_cluster_size_to_expand,
        );
        self.pipe_type = parse_env("ROBOSCORE_PIPE_TYPE", self.pipe_type);
        self
    }

    /// Ball radius as a fraction of image width, after the pipe-type override
    pub fn effective_radius_ratio(&self) -> f32 {
        match self.pipe_type {
            PipeType::Short => SHORT_PIPE_RADIUS_RATIO,
            PipeType::Long | PipeType::None => self.ball_radius_ratio,
        }
    }

    /// Whether the boundary-line search runs at all
    pub fn line_detection_enabled(&self) -> bool {
        self.pipe_type != PipeType::Short && self.min_white_line_size > 0
    }
}

fn parse_env<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let params =
            DetectionParameters::from_json_str(r#"{"pipe_type": "short", "image_scale": 0.5}"#)
                .unwrap();
        assert_eq!(params.pipe_type, PipeType::Short);
        assert_eq!(params.image_scale, 0.5);
        assert_eq!(
            params.max_clusters_to_expand,
            DetectionParameters::default().max_clusters_to_expand
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(DetectionParameters::from_json_str("{ nope").is_err());
    }

    #[test]
    fn test_short_pipe_radius_and_lines() {
        let params = DetectionParameters::default().with_pipe_type(PipeType::Short);
        assert_eq!(params.effective_radius_ratio(), SHORT_PIPE_RADIUS_RATIO);
        assert!(!params.line_detection_enabled());

        let long = DetectionParameters::default();
        assert_eq!(long.effective_radius_ratio(), long.ball_radius_ratio);
        assert!(long.line_detection_enabled());

        let disabled = DetectionParameters {
            min_white_line_size: 0,
            ..DetectionParameters::default()
        };
        assert!(!disabled.line_detection_enabled());
    }

    #[test]
    fn test_pipe_type_from_str() {
        assert_eq!("Short".parse::<PipeType>(), Ok(PipeType::Short));
        assert_eq!(" long ".parse::<PipeType>(), Ok(PipeType::Long));
        assert!("medium".parse::<PipeType>().is_err());
    }

    #[test]
    fn test_unset_env_keeps_value() {
        assert_eq!(parse_env("ROBOSCORE_TEST_SURELY_UNSET_VAR", 7usize), 7);
    }
}
