use super::Point;
use serde::Serialize;

/// Color of a scoring ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BallColor {
    /// Red alliance ball
    Red,
    /// Blue alliance ball
    Blue,
}

impl BallColor {
    /// Both colors, in scan/report order
    pub const ALL: [BallColor; 2] = [BallColor::Red, BallColor::Blue];

    /// Exact quantized RGB value for this color
    pub fn rgb(self) -> [u8; 3] {
        match self {
            BallColor::Red => [255, 0, 0],
            BallColor::Blue => [0, 0, 255],
        }
    }

    /// Lower-case display name
    pub fn name(self) -> &'static str {
        match self {
            BallColor::Red => "red",
            BallColor::Blue => "blue",
        }
    }
}

/// An accepted ball detection, in original image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ball {
    /// Center in original (unscaled) image space
    pub center: Point,
    /// Radius in original image space
    pub radius: f32,
    /// Classified color
    pub color: BallColor,
    /// Whether the ball sits in the middle zone between the boundary lines
    pub in_middle: bool,
}
