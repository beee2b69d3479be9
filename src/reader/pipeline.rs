//! End-to-end extraction pipeline for one form image.
//!
//! Stage order: binarize at source resolution, estimate skew on a downscaled
//! despeckled copy, rectify the source, re-downscale, detect grid lines and
//! the keyword anchor, chain lines into quads, align the template, then crop
//! every field from the rectified source and post-process cells.

use crate::align::{self, AlignmentOutcome};
use crate::binarize::binarize;
use crate::bitmap::{downscale_binary, remove_small_components};
use crate::digits::segment_digits;
use crate::errors::FormError;
use crate::extract::{clean_cell, crop_box, crop_region};
use crate::keypatch::detect_keypatch;
use crate::model::TemplateModel;
use crate::quads::build_quads;
use crate::rotation::{deskew, estimate_rotation};
use crate::segments::detect_axis_lines;
use image::GrayImage;
use log::{debug, info};
use std::time::Instant;

use super::params::ReaderParams;
use super::report::{CellReport, FormReport, StageTimings, TableReport};

/// Cropped table artifact.
pub struct TableExtraction {
    pub id: String,
    pub crop: GrayImage,
}

/// Cropped cell artifact with its cleaned and per-digit derivatives.
pub struct CellExtraction {
    pub id: String,
    pub raw: GrayImage,
    pub cleaned: GrayImage,
    pub digits: Vec<GrayImage>,
}

/// Everything extracted from one form: the report plus image artifacts.
pub struct FormExtraction {
    pub report: FormReport,
    pub tables: Vec<TableExtraction>,
    pub cells: Vec<CellExtraction>,
}

fn ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1e3
}

/// Form reader binding a parsed template, a prepared keyword patch and the
/// pipeline parameters. One reader serves any number of [`process`] calls;
/// it holds no per-image state.
///
/// [`process`]: FormReader::process
pub struct FormReader {
    params: ReaderParams,
    model: TemplateModel,
    /// Keyword patch, binarized and pre-downscaled to the processing scale.
    patch: GrayImage,
}

impl FormReader {
    /// Builds a reader from a template model and a keyword patch image at
    /// source resolution.
    pub fn new(params: ReaderParams, model: TemplateModel, patch: &GrayImage) -> Self {
        let patch = downscale_binary(&binarize(patch), params.processing_scale);
        Self {
            params,
            model,
            patch,
        }
    }

    pub fn params(&self) -> &ReaderParams {
        &self.params
    }

    /// Runs the full pipeline on one grayscale form image.
    pub fn process(&self, img: &GrayImage) -> Result<FormExtraction, FormError> {
        let p = &self.params;
        let total = Instant::now();
        let mut timings = StageTimings::default();

        let t = Instant::now();
        let full = binarize(img);
        let small = remove_small_components(
            &downscale_binary(&full, p.processing_scale),
            p.speckle_min_size,
        );
        timings.binarize_ms = ms(t);

        let t = Instant::now();
        let rotation_deg = estimate_rotation(&small, &p.rotation_hough)?;
        let full = deskew(&full, rotation_deg);
        let small = remove_small_components(
            &downscale_binary(&full, p.processing_scale),
            p.speckle_min_size,
        );
        timings.rotation_ms = ms(t);
        debug!("rotation: {rotation_deg:.2} deg");

        let t = Instant::now();
        let simplify = p.simplify_lines.then_some(p.simplify_tol_sq);
        let axis = detect_axis_lines(&small, &p.axis_hough, simplify);
        timings.lines_ms = ms(t);
        debug!(
            "lines: {} horizontal, {} vertical",
            axis.horizontal.len(),
            axis.vertical.len()
        );

        let t = Instant::now();
        let anchor = detect_keypatch(&small, &self.patch, p.peak_rel_threshold)?;
        timings.anchor_ms = ms(t);

        let t = Instant::now();
        let quads = build_quads(&axis, p.adjacency_tol_sq);
        let outcome: AlignmentOutcome = align::align(
            &self.model,
            &quads,
            [anchor.x, anchor.y],
            p.processing_scale,
            p.min_match_overlap,
        );
        timings.align_ms = ms(t);
        if outcome.degraded {
            info!("alignment degraded: no quad matched a table, identity scale");
        }

        let t = Instant::now();
        let mut tables = Vec::with_capacity(self.model.tables.len());
        let mut table_reports = Vec::with_capacity(self.model.tables.len());
        for field in &self.model.tables {
            let rect = outcome.transform.project(field.rect);
            tables.push(TableExtraction {
                id: field.id.clone(),
                crop: crop_region(&full, rect, p.processing_scale),
            });
            table_reports.push(TableReport {
                id: field.id.clone(),
                rect,
            });
        }

        let mut cells = Vec::with_capacity(self.model.cells.len());
        let mut cell_reports = Vec::with_capacity(self.model.cells.len());
        for field in &self.model.cells {
            let rect = outcome.transform.project(field.rect);
            let raw = crop_region(&full, rect, p.processing_scale);
            let cleaned = clean_cell(&raw);
            let seg = segment_digits(&cleaned);
            let digits = seg.boxes.iter().map(|b| crop_box(&cleaned, b)).collect();
            cell_reports.push(CellReport {
                id: field.id.clone(),
                rect,
                digit_boxes: seg.boxes,
                segmentation_anomaly: seg.anomaly,
            });
            cells.push(CellExtraction {
                id: field.id.clone(),
                raw,
                cleaned,
                digits,
            });
        }
        timings.extract_ms = ms(t);
        timings.total_ms = ms(total);

        Ok(FormExtraction {
            report: FormReport {
                rotation_deg,
                anchor,
                horizontal_lines: axis.horizontal.len(),
                vertical_lines: axis.vertical.len(),
                quad_count: quads.len(),
                transform: outcome.transform,
                alignment_matches: outcome.matches,
                degraded_alignment: outcome.degraded,
                tables: table_reports,
                cells: cell_reports,
                timings,
            },
            tables,
            cells,
        })
    }
}
