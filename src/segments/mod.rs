//! Line segment detection via probabilistic randomized voting.
//!
//! Two entry points cover the pipeline's needs:
//!
//! - [`detect_segments`] runs a full angular sweep and returns raw segments.
//!   The rotation estimator feeds on this unfiltered output.
//! - [`detect_axis_lines`] assumes a rectified image, searches only the 0°
//!   and 90° normals, drops degenerate detections longer than the shorter
//!   image dimension, and splits the result into canonicalized horizontal
//!   and vertical collections. An optional simplify pass merges
//!   near-duplicate detections of the same physical grid line.
//!
//! Canonical endpoint ordering (smaller `x` first for horizontal, smaller
//! `y` first for vertical) is what the quad builder's endpoint-adjacency
//! matching relies on.

mod hough;
mod options;
mod simplify;
mod types;

pub use options::{AngleSet, HoughOptions};
pub use simplify::merge_duplicates;
pub use types::{sqdist, AxisLines, LineSegment};

use image::GrayImage;

/// Detects segments over the full angle sweep; no orientation filtering.
pub fn detect_segments(img: &GrayImage, opts: &HoughOptions) -> Vec<LineSegment> {
    hough::vote_lines(img, opts)
}

/// Detects axis-aligned grid lines in a rectified binary image.
///
/// `simplify_tol_sq`, when set, enables the duplicate-merging pass with the
/// given squared endpoint tolerance.
pub fn detect_axis_lines(
    img: &GrayImage,
    opts: &HoughOptions,
    simplify_tol_sq: Option<f32>,
) -> AxisLines {
    let min_dim = img.width().min(img.height()) as f32;
    let mut axis = AxisLines::default();
    for seg in hough::vote_lines(img, opts) {
        // Longer than the shorter image dimension means a degenerate walk
        // chained across unrelated collinear strokes.
        if seg.length() > min_dim {
            continue;
        }
        if (seg.p0[0] - seg.p1[0]).abs() < f32::EPSILON {
            axis.vertical.push(seg.canonical_vertical());
        } else {
            axis.horizontal.push(seg.canonical_horizontal());
        }
    }
    if let Some(tol_sq) = simplify_tol_sq {
        axis.horizontal = merge_duplicates(&axis.horizontal, tol_sq);
        axis.vertical = merge_duplicates(&axis.vertical, tol_sq);
    }
    axis
}
