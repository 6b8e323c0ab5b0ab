use crate::config::DetectionParameters;
use crate::detector::blob::BlobAnalyzer;
use crate::detector::connected_components::ClusterFinder;
use crate::detector::exclusion::ExclusionZones;
use crate::detector::reclassify::{Reclassification, reclassify_white_pixels};
use crate::detector::white_lines::{WhiteLine, detect_white_lines};
use crate::detector::zones::ZonePolicy;
use crate::models::{Ball, BallColor, PixelBuffer, PixelCoord, PixelMask, Point, ZoneCounts};
use crate::utils::color::PixelClass;
use crate::utils::scale::{downscale_nearest, is_downscale};
use serde::Serialize;

/// Result of one detection run
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    /// Per-color, per-zone ball counts
    pub counts: ZoneCounts,
    /// Accepted balls in acceptance order, original coordinates
    pub balls: Vec<Ball>,
    /// Boundary lines, largest first; means are in original coordinates,
    /// member pixels stay in working coordinates
    pub lines: Vec<WhiteLine>,
    /// White pixels repainted by reclassification, working coordinates
    #[serde(skip)]
    pub reclassified: Vec<PixelCoord>,
    /// Configured working scale (1.0 when the buffer was analyzed at full size)
    pub scale: f32,
    /// Ball radius in working pixels
    pub working_radius: f32,
    /// Minimum cluster size in working pixels
    pub min_cluster_size: f32,
    #[serde(skip)]
    pub(crate) axes: AxisScale,
    #[serde(skip)]
    pub(crate) working: Option<PixelBuffer>,
    #[serde(skip)]
    pub(crate) excluded: Option<PixelMask>,
}

impl Detection {
    /// Result for unusable input: zero counts, nothing to inspect or draw
    pub fn empty() -> Self {
        Self {
            counts: ZoneCounts::default(),
            balls: Vec::new(),
            lines: Vec::new(),
            reclassified: Vec::new(),
            scale: 1.0,
            working_radius: 0.0,
            min_cluster_size: 0.0,
            axes: AxisScale::IDENTITY,
            working: None,
            excluded: None,
        }
    }

    /// Whether this result carries run state (false for [`Detection::empty`])
    pub fn has_run_state(&self) -> bool {
        self.working.is_some()
    }

    /// Working-space centers of accepted balls
    pub(crate) fn working_centers(&self) -> impl Iterator<Item = (Point, BallColor)> + '_ {
        self.balls
            .iter()
            .map(|b| (self.axes.to_working(b.center), b.color))
    }
}

/// Per-axis working/original size ratio.
///
/// The downscale floors each dimension, so these differ slightly from the
/// configured scale (401 px at 0.5 gives 200 px, not 200.5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AxisScale {
    pub x: f32,
    pub y: f32,
}

impl AxisScale {
    pub const IDENTITY: AxisScale = AxisScale { x: 1.0, y: 1.0 };

    pub fn between(original: &PixelBuffer, working: &PixelBuffer) -> Self {
        Self {
            x: working.width() as f32 / original.width() as f32,
            y: working.height() as f32 / original.height() as f32,
        }
    }

    pub fn to_working(&self, p: Point) -> Point {
        Point::new(p.x * self.x, p.y * self.y)
    }

    pub fn to_original(&self, p: Point) -> Point {
        Point::new(p.x / self.x, p.y / self.y)
    }
}

/// Scratch state for the main raster scan; lives for one run only
struct ScanState<'a> {
    working: &'a PixelBuffer,
    analyzer: BlobAnalyzer,
    policy: ZonePolicy,
    zones: ExclusionZones,
    visited: PixelMask,
    accepted: Vec<(Point, BallColor)>,
    duplicate_distance: f32,
}

impl ScanState<'_> {
    /// A candidate passes when its center pixel is not excluded and no ball of
    /// the same color from an earlier cluster is closer than two exclusion
    /// radii. Only `accepted[..earlier]` is checked, so siblings from one
    /// split are bound by the split separation alone.
    fn admits(&self, center: Point, color: BallColor, earlier: usize) -> bool {
        if self.zones.contains_point(center) {
            return false;
        }
        let limit = self.duplicate_distance * self.duplicate_distance;
        !self.accepted[..earlier]
            .iter()
            .any(|(p, c)| *c == color && p.distance_squared(&center) < limit)
    }
}

/// Run the full detection on `original`
pub(crate) fn run(
    original: &PixelBuffer,
    params: &DetectionParameters,
    principal_angle: f32,
) -> Detection {
    let scale = if is_downscale(params.image_scale) {
        params.image_scale
    } else {
        1.0
    };
    let scaled = downscale_nearest(original, scale);
    let axes = AxisScale::between(original, &scaled);
    let radius_original = original.width() as f32 * params.effective_radius_ratio();
    let working_radius = radius_original * scale;

    // Lines are searched on the buffer before any white is reclaimed
    let lines = if params.line_detection_enabled() {
        detect_white_lines(&scaled, params.min_white_line_size)
    } else {
        Vec::new()
    };
    let policy = ZonePolicy::resolve(params, &lines);

    let Reclassification { working, converted } = reclassify_white_pixels(&scaled, params);

    let exclusion_radius = working_radius * params.exclusion_radius_multiplier;
    let mut state = ScanState {
        working: &working,
        analyzer: BlobAnalyzer::new(working_radius, params, principal_angle),
        policy,
        zones: ExclusionZones::new(working.width(), working.height(), exclusion_radius),
        visited: PixelMask::new(working.width(), working.height()),
        accepted: Vec::new(),
        duplicate_distance: 2.0 * exclusion_radius,
    };

    let mut balls = Vec::new();
    let mut clusters = 0usize;
    let mut too_small = 0usize;
    let mut rejected = 0usize;

    for y in 0..working.height() {
        for x in 0..working.width() {
            if state.visited.get(x, y) || state.zones.is_excluded(x, y) {
                continue;
            }
            let Some(color) = working.classify(x, y).and_then(PixelClass::ball_color) else {
                continue;
            };
            let Some(cluster) = ClusterFinder::new(state.working)
                .with_exclusion(state.zones.mask())
                .fill(PixelCoord::new(x, y), PixelClass::from(color), &mut state.visited)
            else {
                continue;
            };
            clusters += 1;

            if !state.analyzer.is_ball_sized(&cluster) {
                too_small += 1;
                continue;
            }

            let earlier = state.accepted.len();
            for center in state.analyzer.candidate_centers(&cluster) {
                if !state.admits(center, color, earlier) {
                    rejected += 1;
                    continue;
                }
                state.zones.mark(center);
                state.accepted.push((center, color));
                balls.push(Ball {
                    center: axes.to_original(center),
                    radius: radius_original,
                    color,
                    in_middle: state.policy.is_middle(center.x, working_radius),
                });
            }
        }
    }

    let counts = ZoneCounts::from_balls(&balls);
    tracing::debug!(
        clusters,
        too_small,
        rejected,
        accepted = balls.len(),
        "main scan"
    );
    tracing::info!(
        red_middle = counts.red_middle,
        red_outside = counts.red_outside,
        blue_middle = counts.blue_middle,
        blue_outside = counts.blue_outside,
        lines = lines.len(),
        reclassified = converted.len(),
        "detection complete"
    );

    let min_cluster_size = state.analyzer.min_cluster_size();
    let excluded = state.zones.into_mask();

    Detection {
        counts,
        balls,
        lines: lines.iter().map(|l| l.to_original(axes.x, axes.y)).collect(),
        reclassified: converted.into_iter().map(|(p, _)| p).collect(),
        scale,
        working_radius,
        min_cluster_size,
        axes,
        working: Some(working),
        excluded: Some(excluded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipeType;

    fn disk(buf: &mut PixelBuffer, cx: f32, cy: f32, r: f32, rgba: [u8; 4]) {
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= r * r {
                    buf.set(x, y, rgba);
                }
            }
        }
    }

    #[test]
    fn test_empty_has_zero_counts() {
        let d = Detection::empty();
        assert!(d.counts.is_empty());
        assert!(!d.has_run_state());
    }

    #[test]
    fn test_single_disk_scaled() {
        // 400 wide: radius 10 at full size, 5 at half scale
        let mut buf = PixelBuffer::filled(400, 200, [0, 0, 0, 255]).unwrap();
        disk(&mut buf, 200.0, 100.0, 10.0, [255, 0, 0, 255]);
        let params = DetectionParameters {
            image_scale: 0.5,
            ..DetectionParameters::default()
        };
        let d = run(&buf, &params, 0.0);
        assert_eq!(d.counts.red_outside, 1);
        assert_eq!(d.scale, 0.5);
        assert!((d.working_radius - 5.0).abs() < 1e-4);
        let ball = d.balls[0];
        assert!((ball.radius - 10.0).abs() < 1e-4);
        assert!((ball.center.x - 200.0).abs() < 2.0);
        assert!((ball.center.y - 100.0).abs() < 2.0);
    }

    #[test]
    fn test_short_pipe_counts_middle() {
        // Short pipe radius is 0.045 * 400 = 18
        let mut buf = PixelBuffer::filled(400, 200, [0, 0, 0, 255]).unwrap();
        disk(&mut buf, 100.0, 100.0, 18.0, [0, 0, 255, 255]);
        let params = DetectionParameters::default().with_pipe_type(PipeType::Short);
        let d = run(&buf, &params, 0.0);
        assert_eq!(d.counts.blue_middle, 1);
        assert_eq!(d.counts.total(), 1);
    }

    #[test]
    fn test_odd_width_maps_back_with_real_ratio() {
        // 401 px at 0.5 is 200 px wide, so x maps back by 401/200
        let mut buf = PixelBuffer::filled(401, 200, [0, 0, 0, 255]).unwrap();
        disk(&mut buf, 370.0, 100.0, 20.0, [0, 0, 255, 255]);
        let params = DetectionParameters {
            image_scale: 0.5,
            ball_radius_ratio: 20.0 / 401.0,
            ..DetectionParameters::default()
        };
        let d = run(&buf, &params, 0.0);
        assert_eq!(d.counts.blue_outside, 1);
        assert_eq!(d.axes, AxisScale { x: 200.0 / 401.0, y: 0.5 });

        let working = d.working.as_ref().unwrap();
        let (mut sum_x, mut n) = (0.0f32, 0.0f32);
        for y in 0..working.height() {
            for x in 0..working.width() {
                if working.classify(x, y) == Some(PixelClass::Blue) {
                    sum_x += x as f32;
                    n += 1.0;
                }
            }
        }
        let working_x = sum_x / n;
        assert!((d.balls[0].center.x - working_x * 401.0 / 200.0).abs() < 1e-3);
        assert!((d.balls[0].center.x - working_x * 2.0).abs() > 0.5);
    }

    #[test]
    fn test_split_siblings_skip_duplicate_distance() {
        // 45 x 15 at r = 10: three segments 15 px apart, inside the 16 px
        // duplicate distance but past the 14 px split separation
        let mut buf = PixelBuffer::filled(400, 200, [0, 0, 0, 255]).unwrap();
        for y in 90..105 {
            for x in 150..195 {
                buf.set(x, y, [255, 0, 0, 255]);
            }
        }
        let d = run(&buf, &DetectionParameters::default(), 0.0);
        assert_eq!(d.counts.red_outside, 3);
    }

    #[test]
    fn test_excluded_mask_covers_ball() {
        let mut buf = PixelBuffer::filled(400, 200, [0, 0, 0, 255]).unwrap();
        disk(&mut buf, 200.0, 100.0, 10.0, [255, 0, 0, 255]);
        let d = run(&buf, &DetectionParameters::default(), 0.0);
        let mask = d.excluded.as_ref().unwrap();
        assert!(mask.get(200, 100));
        assert!(!mask.get(10, 10));
    }
}
