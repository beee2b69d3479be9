//! Rectangle reconstruction from detected grid lines.
//!
//! A quad is closed by chaining endpoint adjacency: a vertical segment
//! supplies the left edge, horizontal segments whose start points sit near
//! its endpoints supply top and bottom edges, and a second vertical segment
//! whose endpoints sit near those edges' end points closes the rectangle.
//!
//! ```text
//!      (A)     HL0        (B)
//!       +------------------+
//!       |                  |
//!       | VL0          VL1 |
//!       |                  |
//!       |      HL1         |
//!       +------------------+
//!      (C)                (D)
//! ```
//!
//! Matching is greedy nearest-neighbour, not exhaustive; near-duplicate
//! detections of the same physical rectangle may produce multiple quads.
//! Downstream overlap scoring tolerates that.

use crate::segments::{sqdist, AxisLines};
use crate::types::RectF;
use serde::Serialize;

/// Axis-aligned rectangle in corner form with `x1 <= x2`, `y1 <= y2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Quad {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Quad {
    /// Builds a quad from two opposite corners, normalizing the order.
    pub fn from_corners(a: [f32; 2], b: [f32; 2]) -> Self {
        Self {
            x1: a[0].min(b[0]),
            y1: a[1].min(b[1]),
            x2: a[0].max(b[0]),
            y2: a[1].max(b[1]),
        }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn as_rect(&self) -> RectF {
        RectF::new(self.x1, self.y1, self.width(), self.height())
    }
}

/// Chains canonicalized horizontal/vertical segments into closed quads.
///
/// `tol_sq` is the squared endpoint-adjacency tolerance in pixels.
pub fn build_quads(axis: &AxisLines, tol_sq: f32) -> Vec<Quad> {
    let mut quads = Vec::new();

    for vl0 in &axis.vertical {
        // Top edges: horizontals starting near the top endpoint of vl0.
        let top_edges: Vec<_> = axis
            .horizontal
            .iter()
            .filter(|hl| sqdist(vl0.p0, hl.p0) < tol_sq)
            .collect();
        if top_edges.is_empty() {
            continue;
        }

        // Bottom edges: horizontals starting near the bottom endpoint.
        let bottom_edges: Vec<_> = axis
            .horizontal
            .iter()
            .filter(|hl| sqdist(vl0.p1, hl.p0) < tol_sq)
            .collect();
        if bottom_edges.is_empty() {
            continue;
        }

        for vl1 in &axis.vertical {
            for hl0 in &top_edges {
                if sqdist(vl1.p0, hl0.p1) >= tol_sq {
                    continue;
                }
                for hl1 in &bottom_edges {
                    if sqdist(vl1.p1, hl1.p1) < tol_sq {
                        quads.push(Quad::from_corners(vl0.p0, vl1.p1));
                        // First closing bottom edge wins; kept as-is from the
                        // reference behaviour even though a geometrically
                        // better duplicate may exist.
                        break;
                    }
                }
            }
        }
    }

    quads
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::LineSegment;

    fn grid_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> AxisLines {
        AxisLines {
            horizontal: vec![
                LineSegment::new([x1, y1], [x2, y1]),
                LineSegment::new([x1, y2], [x2, y2]),
            ],
            vertical: vec![
                LineSegment::new([x1, y1], [x1, y2]),
                LineSegment::new([x2, y1], [x2, y2]),
            ],
        }
    }

    #[test]
    fn closed_rectangle_yields_one_quad() {
        let axis = grid_rect(10.0, 20.0, 110.0, 80.0);
        let quads = build_quads(&axis, 100.0);
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0], Quad::from_corners([10.0, 20.0], [110.0, 80.0]));
    }

    #[test]
    fn emitted_quads_are_normalized() {
        let axis = grid_rect(10.0, 20.0, 110.0, 80.0);
        for q in build_quads(&axis, 100.0) {
            assert!(q.x1 <= q.x2 && q.y1 <= q.y2);
        }
        let q = Quad::from_corners([50.0, 90.0], [5.0, 9.0]);
        assert!(q.x1 <= q.x2 && q.y1 <= q.y2);
    }

    #[test]
    fn missing_edge_produces_no_quad() {
        let mut axis = grid_rect(10.0, 20.0, 110.0, 80.0);
        axis.horizontal.pop(); // drop the bottom edge
        assert!(build_quads(&axis, 100.0).is_empty());
    }

    #[test]
    fn slightly_misaligned_corners_still_close() {
        let mut axis = grid_rect(10.0, 20.0, 110.0, 80.0);
        // Nudge every horizontal start within the tolerance radius.
        for hl in &mut axis.horizontal {
            hl.p0[0] += 4.0;
            hl.p0[1] -= 3.0;
        }
        assert_eq!(build_quads(&axis, 100.0).len(), 1);
    }
}
