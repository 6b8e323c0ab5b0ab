/// Pixel classification against the four quantized reference colors
///
/// The quantizer upstream writes only exact red, blue, white and background
/// values, so the red/blue tolerance is tight. White uses a threshold rather
/// than an exact match.
use crate::models::BallColor;

/// Normalized reference RGB for red pixels
pub const RED_REFERENCE: [f32; 3] = [1.0, 0.0, 0.0];
/// Normalized reference RGB for blue pixels
pub const BLUE_REFERENCE: [f32; 3] = [0.0, 0.0, 1.0];
/// Absolute per-channel tolerance for red/blue matches
pub const COLOR_TOLERANCE: f32 = 0.01;
/// Every channel must exceed this for a pixel to count as white
pub const WHITE_THRESHOLD: f32 = 0.95;

/// Classification of a single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelClass {
    /// Matches the red reference
    Red,
    /// Matches the blue reference
    Blue,
    /// All channels above [`WHITE_THRESHOLD`]
    White,
    /// Anything else; never clustered
    Background,
}

impl PixelClass {
    /// Ball color for red/blue classes
    pub fn ball_color(self) -> Option<BallColor> {
        match self {
            PixelClass::Red => Some(BallColor::Red),
            PixelClass::Blue => Some(BallColor::Blue),
            PixelClass::White | PixelClass::Background => None,
        }
    }
}

impl From<BallColor> for PixelClass {
    fn from(color: BallColor) -> Self {
        match color {
            BallColor::Red => PixelClass::Red,
            BallColor::Blue => PixelClass::Blue,
        }
    }
}

/// Classify 8-bit RGB
pub fn classify_rgb(r: u8, g: u8, b: u8) -> PixelClass {
    classify_normalized(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Classify RGB components in [0, 1]. Red is tested before blue before white.
pub fn classify_normalized(r: f32, g: f32, b: f32) -> PixelClass {
    let rgb = [r, g, b];
    if matches_reference(&rgb, &RED_REFERENCE) {
        PixelClass::Red
    } else if matches_reference(&rgb, &BLUE_REFERENCE) {
        PixelClass::Blue
    } else if r > WHITE_THRESHOLD && g > WHITE_THRESHOLD && b > WHITE_THRESHOLD {
        PixelClass::White
    } else {
        PixelClass::Background
    }
}

fn matches_reference(rgb: &[f32; 3], reference: &[f32; 3]) -> bool {
    rgb.iter()
        .zip(reference)
        .all(|(c, r)| (c - r).abs() <= COLOR_TOLERANCE)
}
