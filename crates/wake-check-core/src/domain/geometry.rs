//! Geometry primitives in frame pixel space.

use serde::{Deserialize, Serialize};

/// A 2-D point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point2D {
    /// Creates a point from pixel coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size of the rectangular region extracted around each eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSize {
    /// Region width in pixels.
    pub width: u32,
    /// Region height in pixels.
    pub height: u32,
}

impl RegionSize {
    /// Creates a region size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for RegionSize {
    /// The 30x20 default used by the analysis pipeline.
    fn default() -> Self {
        Self {
            width: 30,
            height: 20,
        }
    }
}

/// Axis-aligned face bounding box in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Box width.
    pub width: f32,
    /// Box height.
    pub height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region_size() {
        let size = RegionSize::default();
        assert_eq!(size.width, 30);
        assert_eq!(size.height, 20);
    }

    #[test]
    fn test_point_construction() {
        let p = Point2D::new(12.5, -3.0);
        assert!((p.x - 12.5).abs() < f32::EPSILON);
        assert!((p.y - -3.0).abs() < f32::EPSILON);
    }
}
