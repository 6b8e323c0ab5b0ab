use serde::Serialize;

/// 2D point with floating point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Calculate squared distance (faster, no sqrt)
    pub fn distance_squared(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Rotate by `angle` radians about `pivot`
    pub fn rotate_about(&self, pivot: &Point, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Self {
            x: pivot.x + dx * cos - dy * sin,
            y: pivot.y + dx * sin + dy * cos,
        }
    }
}

/// Integer pixel coordinate inside a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct PixelCoord {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl PixelCoord {
    /// Create a new pixel coordinate
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Row-major index for a buffer of the given width
    pub fn index(&self, width: usize) -> usize {
        self.y * width + self.x
    }

    /// Inverse of [`PixelCoord::index`]
    pub fn from_index(index: usize, width: usize) -> Self {
        Self {
            x: index % width,
            y: index / width,
        }
    }

    /// Pixel center as a float point
    pub fn to_point(&self) -> Point {
        Point::new(self.x as f32, self.y as f32)
    }
}
