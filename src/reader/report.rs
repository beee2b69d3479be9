//! Machine-readable record of one processed form.

use crate::align::AlignmentTransform;
use crate::keypatch::AnchorMatch;
use crate::types::{BoundingBox, RectF};
use serde::Serialize;

/// Wall-clock stage timings in milliseconds.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct StageTimings {
    pub binarize_ms: f64,
    pub rotation_ms: f64,
    pub lines_ms: f64,
    pub anchor_ms: f64,
    pub align_ms: f64,
    pub extract_ms: f64,
    pub total_ms: f64,
}

/// One projected table field.
#[derive(Clone, Debug, Serialize)]
pub struct TableReport {
    pub id: String,
    /// Projected position, detection-scale pixel space.
    pub rect: RectF,
}

/// One projected cell field with its segmentation outcome.
#[derive(Clone, Debug, Serialize)]
pub struct CellReport {
    pub id: String,
    /// Projected position, detection-scale pixel space.
    pub rect: RectF,
    /// Digit bounding boxes, left to right, in the cleaned crop's space.
    pub digit_boxes: Vec<BoundingBox>,
    /// Set when the cell content could not be cut into digits.
    pub segmentation_anomaly: bool,
}

/// Full report for one form image.
#[derive(Clone, Debug, Serialize)]
pub struct FormReport {
    /// Estimated skew, degrees; the image was rectified by this amount.
    pub rotation_deg: f32,
    pub anchor: AnchorMatch,
    pub horizontal_lines: usize,
    pub vertical_lines: usize,
    pub quad_count: usize,
    pub transform: AlignmentTransform,
    /// (quad, table) pairs that cleared the overlap threshold.
    pub alignment_matches: usize,
    /// True when the scale correction fell back to identity.
    pub degraded_alignment: bool,
    pub tables: Vec<TableReport>,
    pub cells: Vec<CellReport>,
    pub timings: StageTimings,
}
