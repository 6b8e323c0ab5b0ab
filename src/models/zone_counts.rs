use super::{Ball, BallColor};
use serde::Serialize;

/// Per-color, per-zone ball tallies for one detection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ZoneCounts {
    /// Red balls in the middle zone
    pub red_middle: u32,
    /// Red balls outside the middle zone
    pub red_outside: u32,
    /// Blue balls in the middle zone
    pub blue_middle: u32,
    /// Blue balls outside the middle zone
    pub blue_outside: u32,
}

impl ZoneCounts {
    /// Tally a ball list in a single pass
    pub fn from_balls(balls: &[Ball]) -> Self {
        let mut counts = Self::default();
        for ball in balls {
            counts.record(ball.color, ball.in_middle);
        }
        counts
    }

    /// Increment the counter matching (color, zone)
    pub fn record(&mut self, color: BallColor, in_middle: bool) {
        let slot = match (color, in_middle) {
            (BallColor::Red, true) => &mut self.red_middle,
            (BallColor::Red, false) => &mut self.red_outside,
            (BallColor::Blue, true) => &mut self.blue_middle,
            (BallColor::Blue, false) => &mut self.blue_outside,
        };
        *slot += 1;
    }

    /// Red middle + red outside
    pub fn red_total(&self) -> u32 {
        self.red_middle + self.red_outside
    }

    /// Blue middle + blue outside
    pub fn blue_total(&self) -> u32 {
        self.blue_middle + self.blue_outside
    }

    /// Total for one color
    pub fn total_for(&self, color: BallColor) -> u32 {
        match color {
            BallColor::Red => self.red_total(),
            BallColor::Blue => self.blue_total(),
        }
    }

    /// All balls of both colors
    pub fn total(&self) -> u32 {
        self.red_total() + self.blue_total()
    }

    /// True when nothing was counted
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
