/// Middle/outside zone policy
use super::white_lines::WhiteLine;
use crate::config::{DetectionParameters, PipeType};

/// Minimum clearance between a ball edge and a boundary line, in pixels
pub const LINE_EDGE_BUFFER: f32 = 2.0;

/// How balls are assigned to the middle zone for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZonePolicy {
    /// Short pipe: every ball scores as middle
    AllMiddle,
    /// Line search disabled or inconclusive: every ball is outside
    AllOutside,
    /// Middle is the span strictly between two boundary lines
    Between {
        /// Smaller line x
        left: f32,
        /// Larger line x
        right: f32,
    },
}

impl ZonePolicy {
    /// Pick the policy for `params` given the lines found (working coordinates).
    ///
    /// Short pipes count every ball as middle; disabled or insufficient lines
    /// count every ball as outside.
    pub fn resolve(params: &DetectionParameters, lines: &[WhiteLine]) -> Self {
        if params.pipe_type == PipeType::Short {
            return ZonePolicy::AllMiddle;
        }
        if !params.line_detection_enabled() || lines.len() < 2 {
            return ZonePolicy::AllOutside;
        }
        let (a, b) = (lines[0].mean_x, lines[1].mean_x);
        ZonePolicy::Between {
            left: a.min(b),
            right: a.max(b),
        }
    }

    /// Whether a ball at `x` with `radius` (same coordinate space as the lines)
    /// sits in the middle zone
    pub fn is_middle(&self, x: f32, radius: f32) -> bool {
        match *self {
            ZonePolicy::AllMiddle => true,
            ZonePolicy::AllOutside => false,
            ZonePolicy::Between { left, right } => {
                x > left
                    && x < right
                    && x - radius > left + LINE_EDGE_BUFFER
                    && x + radius < right - LINE_EDGE_BUFFER
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x: f32) -> WhiteLine {
        WhiteLine {
            mean_x: x,
            mean_y: 0.0,
            pixels: Vec::new(),
        }
    }

    #[test]
    fn test_between_lines() {
        let params = DetectionParameters::default();
        let policy = ZonePolicy::resolve(&params, &[line(300.0), line(100.0)]);
        assert_eq!(
            policy,
            ZonePolicy::Between {
                left: 100.0,
                right: 300.0
            }
        );
        assert!(policy.is_middle(200.0, 10.0));
        assert!(!policy.is_middle(105.0, 10.0));
        assert!(!policy.is_middle(50.0, 10.0));
        // Edge exactly on the buffer is not clear of it
        assert!(!policy.is_middle(112.0, 10.0));
        assert!(policy.is_middle(112.5, 10.0));
    }

    #[test]
    fn test_short_pipe_is_all_middle() {
        let params = DetectionParameters::default().with_pipe_type(PipeType::Short);
        let policy = ZonePolicy::resolve(&params, &[line(100.0), line(300.0)]);
        assert_eq!(policy, ZonePolicy::AllMiddle);
        assert!(policy.is_middle(0.0, 10.0));
    }

    #[test]
    fn test_missing_lines_are_all_outside() {
        let params = DetectionParameters::default();
        assert_eq!(ZonePolicy::resolve(&params, &[line(100.0)]), ZonePolicy::AllOutside);

        let disabled = DetectionParameters {
            min_white_line_size: 0,
            ..DetectionParameters::default()
        };
        let policy = ZonePolicy::resolve(&disabled, &[line(100.0), line(300.0)]);
        assert_eq!(policy, ZonePolicy::AllOutside);
        assert!(!policy.is_middle(200.0, 10.0));
    }

    #[test]
    fn test_none_pipe_uses_lines() {
        let params = DetectionParameters::default().with_pipe_type(PipeType::None);
        let policy = ZonePolicy::resolve(&params, &[line(100.0), line(300.0)]);
        assert!(policy.is_middle(200.0, 10.0));
    }
}
