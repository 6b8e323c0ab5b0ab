//! Pixel-level helpers
//!
//! - Color classification (quantized RGBA to red/blue/white/background)
//! - Nearest-neighbour downscaling that preserves the quantized palette
//! - A threshold quantizer for raw camera frames

pub mod color;
pub mod quantize;
pub mod scale;
