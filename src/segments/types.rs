use serde::Serialize;

/// Squared Euclidean distance between two points.
#[inline]
pub fn sqdist(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Straight line segment produced by the voting detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LineSegment {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
}

impl LineSegment {
    pub fn new(p0: [f32; 2], p1: [f32; 2]) -> Self {
        Self { p0, p1 }
    }

    pub fn midpoint(&self) -> [f32; 2] {
        [
            (self.p0[0] + self.p1[0]) * 0.5,
            (self.p0[1] + self.p1[1]) * 0.5,
        ]
    }

    pub fn length_sq(&self) -> f32 {
        sqdist(self.p0, self.p1)
    }

    pub fn length(&self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Orientation angle `atan2(Δy, Δx)` in radians.
    pub fn orientation(&self) -> f32 {
        (self.p1[1] - self.p0[1]).atan2(self.p1[0] - self.p0[0])
    }

    /// Reorders endpoints so `p0` is the one nearer the image origin.
    /// Idempotent: applying it to its own output changes nothing.
    pub fn toward_origin(self) -> Self {
        let d0 = self.p0[0] * self.p0[0] + self.p0[1] * self.p0[1];
        let d1 = self.p1[0] * self.p1[0] + self.p1[1] * self.p1[1];
        if d1 < d0 {
            Self::new(self.p1, self.p0)
        } else {
            self
        }
    }

    /// Canonical form for vertical segments: smaller `y` first.
    pub fn canonical_vertical(self) -> Self {
        if self.p1[1] < self.p0[1] {
            Self::new(self.p1, self.p0)
        } else {
            self
        }
    }

    /// Canonical form for horizontal segments: smaller `x` first.
    pub fn canonical_horizontal(self) -> Self {
        if self.p1[0] < self.p0[0] {
            Self::new(self.p1, self.p0)
        } else {
            self
        }
    }
}

/// Axis-aligned detection output, split by orientation. Horizontal segments
/// are in smaller-`x`-first form, vertical segments smaller-`y`-first.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AxisLines {
    pub horizontal: Vec<LineSegment>,
    pub vertical: Vec<LineSegment>,
}

impl AxisLines {
    pub fn total(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }
}
