//! Review overlay
//!
//! Draws a run's results onto a copy of the original image. Purely visual:
//! nothing here feeds back into counting.

use crate::models::{BallColor, PixelBuffer};
use crate::pipeline::Detection;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};

/// Tint for reclassified pixels
pub const RECLASSIFIED_COLOR: Rgba<u8> = Rgba([255, 0, 255, 255]);
/// Boundary line color
pub const LINE_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
/// Ring color for red balls
pub const RED_BALL_MARKER: Rgba<u8> = Rgba([255, 255, 0, 255]);
/// Ring color for blue balls
pub const BLUE_BALL_MARKER: Rgba<u8> = Rgba([0, 255, 0, 255]);

fn marker_color(color: BallColor) -> Rgba<u8> {
    match color {
        BallColor::Red => RED_BALL_MARKER,
        BallColor::Blue => BLUE_BALL_MARKER,
    }
}

impl Detection {
    /// Render the overlay at the original resolution.
    ///
    /// Returns `None` for an empty detection, which has nothing to draw.
    pub fn render_overlay(&self, original: &PixelBuffer) -> Option<RgbaImage> {
        if !self.has_run_state() {
            return None;
        }
        let mut canvas = original.to_rgba_image();
        let (width, height) = canvas.dimensions();

        // Each working pixel covers a block of original pixels
        let block = (1.0 / self.axes.x.min(self.axes.y)).ceil().max(1.0) as u32;
        for p in &self.reclassified {
            let x0 = (p.x as f32 / self.axes.x).floor() as u32;
            let y0 = (p.y as f32 / self.axes.y).floor() as u32;
            for y in y0..(y0 + block).min(height) {
                for x in x0..(x0 + block).min(width) {
                    canvas.put_pixel(x, y, RECLASSIFIED_COLOR);
                }
            }
        }

        for line in &self.lines {
            draw_line_segment_mut(
                &mut canvas,
                (line.mean_x, 0.0),
                (line.mean_x, height.saturating_sub(1) as f32),
                LINE_COLOR,
            );
        }

        for ball in &self.balls {
            let color = marker_color(ball.color);
            let center = (ball.center.x.round() as i32, ball.center.y.round() as i32);
            let radius = ball.radius.round().max(1.0) as i32;
            draw_hollow_circle_mut(&mut canvas, center, radius, color);
            if ball.in_middle {
                draw_hollow_circle_mut(&mut canvas, center, (radius - 3).max(1), color);
            }

            let arm = (ball.radius / 3.0).max(2.0);
            let (cx, cy) = (ball.center.x, ball.center.y);
            draw_line_segment_mut(&mut canvas, (cx - arm, cy), (cx + arm, cy), color);
            draw_line_segment_mut(&mut canvas, (cx, cy - arm), (cx, cy + arm), color);
        }

        Some(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectionParameters;

    #[test]
    fn test_overlay_marks_ball_and_keeps_size() {
        let mut buf = PixelBuffer::filled(400, 200, [0, 0, 0, 255]).unwrap();
        for y in 0..200 {
            for x in 0..400 {
                let (dx, dy) = (x as f32 - 200.0, y as f32 - 100.0);
                if dx * dx + dy * dy <= 100.0 {
                    buf.set(x, y, [255, 0, 0, 255]);
                }
            }
        }
        let d = crate::detect(&buf, &DetectionParameters::default());
        let img = d.render_overlay(&buf).unwrap();
        assert_eq!(img.dimensions(), (400, 200));
        // Crosshair passes through the center
        assert_eq!(*img.get_pixel(200, 100), RED_BALL_MARKER);
        // Far background untouched
        assert_eq!(*img.get_pixel(5, 5), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_overlay_tints_reclassified_pixels() {
        let mut buf = PixelBuffer::filled(400, 200, [0, 0, 0, 255]).unwrap();
        for y in 80..120 {
            for x in 40..80 {
                buf.set(x, y, [0, 0, 255, 255]);
            }
        }
        buf.set(80, 100, [255, 255, 255, 255]);
        let d = crate::detect(&buf, &DetectionParameters::default());
        assert!(!d.reclassified.is_empty());
        let img = d.render_overlay(&buf).unwrap();
        assert_eq!(*img.get_pixel(80, 100), RECLASSIFIED_COLOR);
    }

    #[test]
    fn test_empty_detection_has_no_overlay() {
        let buf = PixelBuffer::filled(4, 4, [0, 0, 0, 255]).unwrap();
        assert!(Detection::empty().render_overlay(&buf).is_none());
    }
}
