use serde::Serialize;

/// Axis-aligned rectangle in position + extent form.
///
/// Used for template fields and their pixel-space projections. Coordinates
/// are `f32` because template space and the alignment-scaled space are
/// fractional; conversion to integer pixels happens only at crop time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Far corner (`x + w`, `y + h`).
    pub fn max_corner(&self) -> [f32; 2] {
        [self.x + self.w, self.y + self.h]
    }

    pub fn area(&self) -> f32 {
        self.w * self.h
    }
}

/// Per-digit bounding box in a cell's local pixel space.
///
/// Corners are inclusive; `x1 <= x2` and `y1 <= y2` by construction of the
/// projection scan that emits them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1 + 1
    }

    /// True when the two boxes share at least one pixel.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x1 <= other.x2 && other.x1 <= self.x2 && self.y1 <= other.y2 && other.y1 <= self.y2
    }
}
