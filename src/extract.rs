//! Region cropping and cell cleaning.
//!
//! Crops are taken from the full-resolution binarized source using the
//! aligned detection-scale rectangles. Cell cleaning removes long grid-line
//! artifacts with directional masks, then isolates the digit-bearing block
//! with median-filtered projection profiles, reconnecting strokes the line
//! mask broke.

use crate::bitmap::{self, INK};
use crate::types::{BoundingBox, RectF};
use image::{imageops, GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, erode};

/// A column whose ink count reaches this fraction of the cell height is
/// treated as a vertical grid-line artifact.
const COLUMN_LINE_FRACTION: f32 = 0.8;
/// Same for rows, against the cell width.
const ROW_LINE_FRACTION: f32 = 0.5;
/// Window of the 1-D median filter applied to projection profiles.
const PROFILE_MEDFILT: usize = 5;
/// Profile samples must exceed this fraction of the profile's own median to
/// count as digit area.
const PROFILE_FRACTION: f32 = 0.8;

/// Crops a detection-scale rectangle out of the full-resolution source.
///
/// `processing_scale` converts the rectangle back to source resolution.
/// Coordinates beyond the source are clamped, never wrapped; pixels of the
/// target with no source counterpart stay background.
pub fn crop_region(src: &GrayImage, rect: RectF, processing_scale: f32) -> GrayImage {
    let x1 = (rect.x / processing_scale) as i64;
    let y1 = (rect.y / processing_scale) as i64;
    let w = ((rect.w / processing_scale) as i64).max(1);
    let h = ((rect.h / processing_scale) as i64).max(1);

    let mut out = GrayImage::new(w as u32, h as u32);
    let (sw, sh) = (src.width() as i64, src.height() as i64);
    for oy in 0..h {
        let sy = y1 + oy;
        if sy < 0 || sy >= sh {
            continue;
        }
        for ox in 0..w {
            let sx = x1 + ox;
            if sx < 0 || sx >= sw {
                continue;
            }
            let v = src.get_pixel(sx as u32, sy as u32).0[0];
            out.put_pixel(ox as u32, oy as u32, Luma([v]));
        }
    }
    out
}

/// Crops an inclusive bounding box out of a cell-local raster. The start
/// corner and the extent are clamped to the image bounds, so a box that
/// reaches (or lies) outside yields the in-bounds part instead of a view
/// past the buffer.
pub fn crop_box(img: &GrayImage, b: &BoundingBox) -> GrayImage {
    let x = b.x1.min(img.width().saturating_sub(1));
    let y = b.y1.min(img.height().saturating_sub(1));
    let w = b.width().min(img.width() - x).max(1);
    let h = b.height().min(img.height() - y).max(1);
    imageops::crop_imm(img, x, y, w, h).to_image()
}

/// Builds the outer-product mask of two boolean axis profiles.
fn mask_from(keep_col: &[bool], keep_row: &[bool]) -> GrayImage {
    let mut out = GrayImage::new(keep_col.len() as u32, keep_row.len() as u32);
    for (x, y, p) in out.enumerate_pixels_mut() {
        p.0[0] = if keep_col[x as usize] && keep_row[y as usize] {
            INK
        } else {
            0
        };
    }
    out
}

/// Median-filters an ink profile and thresholds it against a fraction of its
/// own median, then closes the result to the contiguous maximal run between
/// the first and last crossing. Isolated spikes outside the run are gone
/// after the median filter; the plateau keeps the digit block in one piece.
fn digit_band(profile: &[u32]) -> Vec<bool> {
    let smoothed = bitmap::median_filter_1d(profile, PROFILE_MEDFILT);
    let as_f32: Vec<f32> = smoothed.iter().map(|&v| v as f32).collect();
    let median = bitmap::median(&as_f32).unwrap_or(0.0);
    let active: Vec<bool> = as_f32
        .iter()
        .map(|&v| v > PROFILE_FRACTION * median)
        .collect();
    plateau(&active)
}

/// Fills everything between the first and last `true` sample.
fn plateau(active: &[bool]) -> Vec<bool> {
    let first = active.iter().position(|&v| v);
    let last = active.iter().rposition(|&v| v);
    let mut out = vec![false; active.len()];
    if let (Some(first), Some(last)) = (first, last) {
        for v in &mut out[first..=last] {
            *v = true;
        }
    }
    out
}

/// Removes long grid-line artifacts from a cropped cell and isolates the
/// digit-bearing sub-region.
pub fn clean_cell(cell: &GrayImage) -> GrayImage {
    let (w, h) = cell.dimensions();
    if w == 0 || h == 0 {
        return cell.clone();
    }

    // Directional long-line masks: keep columns/rows whose ink stays below
    // the grid-line fractions.
    let keep_col: Vec<bool> = bitmap::column_ink(cell)
        .iter()
        .map(|&c| (c as f32) < COLUMN_LINE_FRACTION * h as f32)
        .collect();
    let keep_row: Vec<bool> = bitmap::row_ink(cell)
        .iter()
        .map(|&c| (c as f32) < ROW_LINE_FRACTION * w as f32)
        .collect();
    let mask_lines = mask_from(&keep_col, &keep_row);

    // Eroded copy drops isolated mask noise before profiling.
    let mask = erode(&mask_lines, Norm::LInf, 2);
    let profiled = bitmap::and(&mask, cell);

    let col_band = digit_band(&bitmap::column_ink(&profiled));
    let row_band = digit_band(&bitmap::row_ink(&profiled));
    let region = dilate(&mask_from(&col_band, &row_band), Norm::LInf, 1);

    // Strip lines from the raw cell, then reconnect strokes the mask broke.
    let stripped = bitmap::and(&mask_lines, cell);
    let reconnected = erode(&dilate(&stripped, Norm::L1, 1), Norm::L1, 1);

    bitmap::and(&region, &reconnected)
}
