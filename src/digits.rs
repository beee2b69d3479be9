//! Digit segmentation inside a cleaned cell.
//!
//! Digits are cut by projection: the vertical extent is the single band the
//! row profile spans, and each run of the column profile becomes one digit.
//! Profiles are median-filtered first so single-column gaps inside a stroke
//! do not split a digit in two.

use crate::bitmap::{self, remove_small_components};
use crate::types::BoundingBox;
use image::GrayImage;
use serde::Serialize;

/// Connected components below this area are treated as residue of the cell
/// cleaning step, not digit strokes.
pub const DIGIT_MIN_SIZE: u32 = 32;
/// Window of the median filter applied to both projection profiles.
const PROFILE_MEDFILT: usize = 5;

/// Per-cell segmentation outcome.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DigitSegmentation {
    /// Digit bounding boxes, left to right.
    pub boxes: Vec<BoundingBox>,
    /// Set when the column profile's rising and falling edges disagree in
    /// count or pair crosswise; the cell content could not be cut into
    /// digits.
    pub anomaly: bool,
}

/// Splits a cleaned cell into per-digit bounding boxes.
///
/// An empty cell yields no boxes and no anomaly.
pub fn segment_digits(cell: &GrayImage) -> DigitSegmentation {
    let img = remove_small_components(cell, DIGIT_MIN_SIZE);

    let rows = bitmap::median_filter_1d(&bitmap::row_ink(&img), PROFILE_MEDFILT);
    let y1 = rows.iter().position(|&v| v > 0);
    let y2 = rows.iter().rposition(|&v| v > 0);
    let (y1, y2) = match (y1, y2) {
        (Some(a), Some(b)) => (a as u32, b as u32),
        _ => return DigitSegmentation::default(),
    };

    let cols = bitmap::median_filter_1d(&bitmap::column_ink(&img), PROFILE_MEDFILT);
    let mut rising = Vec::new();
    let mut falling = Vec::new();
    for i in 1..cols.len() {
        if cols[i - 1] == 0 && cols[i] > 0 {
            rising.push(i as u32);
        }
    }
    for i in 0..cols.len().saturating_sub(1) {
        if cols[i] > 0 && cols[i + 1] == 0 {
            falling.push(i as u32);
        }
    }

    // Counts also come out equal when ink touches both vertical borders:
    // the lone rising edge then sits right of the lone falling edge. Such
    // crosswise pairs would produce boxes with x1 > x2.
    let crossed = rising.iter().zip(&falling).any(|(r, f)| r > f);
    if rising.len() != falling.len() || crossed {
        return DigitSegmentation {
            boxes: Vec::new(),
            anomaly: true,
        };
    }

    let boxes = rising
        .into_iter()
        .zip(falling)
        .map(|(x1, x2)| BoundingBox {
            x1,
            y1,
            x2,
            y2,
        })
        .collect();
    DigitSegmentation {
        boxes,
        anomaly: false,
    }
}
