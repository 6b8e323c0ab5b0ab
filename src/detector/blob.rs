//! Ball-sized cluster analysis
//!
//! A cluster that covers enough of a theoretical ball disk is turned into one
//! or more candidate centers. Wide clusters (several balls touching side by
//! side) are cut into equal-width vertical segments in a frame rotated by the
//! principal angle, and each segment contributes its own centroid.

use super::connected_components::{Cluster, centroid};
use crate::config::DetectionParameters;
use crate::models::{PixelCoord, Point};
use std::f32::consts::PI;

/// Axis-aligned extent of a point set, measured in whole pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Smallest x
    pub min_x: f32,
    /// Pixel width (`max - min + 1`)
    pub width: f32,
    /// Pixel height (`max - min + 1`)
    pub height: f32,
}

impl Extent {
    /// Extent of `points`; `None` for an empty slice
    pub fn of(points: &[Point]) -> Option<Extent> {
        let first = points.first()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        Some(Extent {
            min_x,
            width: max_x - min_x + 1.0,
            height: max_y - min_y + 1.0,
        })
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Size gate and splitter for colored clusters, in working coordinates
#[derive(Debug, Clone, Copy)]
pub struct BlobAnalyzer {
    radius: f32,
    min_cluster_size: f32,
    split_threshold: f32,
    max_balls: usize,
    min_separation: f32,
    principal_angle: f32,
}

impl BlobAnalyzer {
    /// Analyzer for balls of `radius` working pixels
    pub fn new(radius: f32, params: &DetectionParameters, principal_angle: f32) -> Self {
        Self {
            radius,
            min_cluster_size: PI * radius * radius * (params.ball_area_percentage / 100.0),
            split_threshold: params.cluster_split_threshold,
            max_balls: params.max_balls_in_cluster,
            min_separation: 2.0 * radius * params.min_cluster_separation,
            principal_angle,
        }
    }

    /// Ball radius in working pixels
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Minimum member count for a cluster to be analyzed
    pub fn min_cluster_size(&self) -> f32 {
        self.min_cluster_size
    }

    /// Whether `cluster` covers enough area to be a ball
    pub fn is_ball_sized(&self, cluster: &Cluster) -> bool {
        cluster.len() as f32 >= self.min_cluster_size
    }

    /// Candidate centers for a ball-sized cluster, in working coordinates
    pub fn candidate_centers(&self, cluster: &Cluster) -> Vec<Point> {
        if cluster.is_empty() {
            return Vec::new();
        }
        let center = cluster.centroid();

        let rotated: Vec<Point> = cluster
            .pixels
            .iter()
            .map(|p| p.to_point().rotate_about(&center, -self.principal_angle))
            .collect();
        let Some(extent) = Extent::of(&rotated) else {
            return vec![center];
        };

        let aspect = extent.aspect();
        tracing::trace!(
            size = cluster.len(),
            width = extent.width,
            height = extent.height,
            aspect,
            "cluster geometry"
        );
        if aspect < self.split_threshold {
            return vec![center];
        }

        let segments = (aspect.floor() as usize).min(self.max_balls);
        if segments < 2 {
            return vec![center];
        }

        let split = self.split(cluster, &rotated, extent, segments);
        if split.len() < 2 {
            return vec![center];
        }
        split
    }

    fn split(
        &self,
        cluster: &Cluster,
        rotated: &[Point],
        extent: Extent,
        segments: usize,
    ) -> Vec<Point> {
        let segment_width = extent.width / segments as f32;
        let mut buckets: Vec<Vec<PixelCoord>> = vec![Vec::new(); segments];
        for (pixel, r) in cluster.pixels.iter().zip(rotated) {
            let k = ((r.x - extent.min_x) / segment_width).floor().max(0.0) as usize;
            buckets[k.min(segments - 1)].push(*pixel);
        }

        let mut accepted: Vec<Point> = Vec::with_capacity(segments);
        for bucket in buckets.iter().filter(|b| !b.is_empty()) {
            let candidate = centroid(bucket);
            if accepted
                .iter()
                .all(|a| a.distance(&candidate) >= self.min_separation)
            {
                accepted.push(candidate);
            }
        }
        accepted
    }
}
