/// Ball color and accepted ball detections
pub mod ball;
/// Bit-packed per-pixel flags
pub mod mask;
/// RGBA pixel buffer with color classification
pub mod pixel_buffer;
/// Float points and integer pixel coordinates
pub mod point;
/// Per-color, per-zone tallies
pub mod zone_counts;

pub use ball::{Ball, BallColor};
pub use mask::PixelMask;
pub use pixel_buffer::PixelBuffer;
pub use point::{PixelCoord, Point};
pub use zone_counts::ZoneCounts;
