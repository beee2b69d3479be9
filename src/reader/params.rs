use crate::segments::HoughOptions;
use serde::{Deserialize, Serialize};

/// Reader-wide parameters controlling the extraction pipeline.
///
/// Defaults reproduce the reference tuning for 200-300 dpi form scans. The
/// detection stages run on a downscaled copy; crops are always taken at the
/// source resolution.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderParams {
    /// Downscale factor applied before rotation/line/anchor detection.
    pub processing_scale: f32,
    /// Minimum connected-component area kept on the detection image.
    pub speckle_min_size: u32,
    /// Line-voting options for the full-sweep skew estimator.
    pub rotation_hough: HoughOptions,
    /// Line-voting options for axis-aligned grid-line detection.
    pub axis_hough: HoughOptions,
    /// Enables merging of near-duplicate grid-line detections.
    pub simplify_lines: bool,
    /// Squared endpoint tolerance used by the duplicate-merging pass.
    pub simplify_tol_sq: f32,
    /// Squared endpoint tolerance for quad corner adjacency.
    pub adjacency_tol_sq: f32,
    /// Fraction of the correlation-response range the anchor peak must clear.
    pub peak_rel_threshold: f32,
    /// Overlap score a (quad, table) pair must exceed to refine the scale.
    pub min_match_overlap: f32,
}

impl Default for ReaderParams {
    fn default() -> Self {
        Self {
            processing_scale: 0.5,
            speckle_min_size: 64,
            rotation_hough: HoughOptions::rotation(),
            axis_hough: HoughOptions::axis(),
            simplify_lines: false,
            simplify_tol_sq: 100.0,
            adjacency_tol_sq: 100.0,
            peak_rel_threshold: 0.75,
            min_match_overlap: 0.5,
        }
    }
}
