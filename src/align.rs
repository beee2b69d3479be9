//! Template-to-image alignment.
//!
//! Coarse placement maps template fields through the processing scale and
//! the detected anchor. The mapping is then refined by matching detected
//! quads against coarse-placed tables with an overlap score and taking the
//! median of per-edge extent ratios as corrected scale factors. The median
//! keeps the correction robust to spurious quads from noise or partial line
//! detections; with zero matches the correction falls back to identity and
//! the result is flagged as degraded.

use crate::bitmap::median;
use crate::model::TemplateModel;
use crate::quads::Quad;
use crate::types::RectF;
use log::debug;
use serde::Serialize;

/// Affine mapping from template space to pixel space:
/// `pixel = template * scale + anchor` (template coordinates are already
/// relative to the reference origin).
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AlignmentTransform {
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl AlignmentTransform {
    pub fn project(&self, r: RectF) -> RectF {
        RectF::new(
            r.x * self.scale_x + self.anchor_x,
            r.y * self.scale_y + self.anchor_y,
            r.w * self.scale_x,
            r.h * self.scale_y,
        )
    }
}

/// Result of the scale-refinement step.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AlignmentOutcome {
    pub transform: AlignmentTransform,
    /// Number of (quad, table) pairs that cleared the overlap threshold.
    pub matches: usize,
    /// True when no pair matched and the scale fell back to identity.
    pub degraded: bool,
}

/// Overlap score `sqrt(intersection / union)`; zero for disjoint rectangles.
pub fn overlap(a: &RectF, b: &RectF) -> f32 {
    let [ax2, ay2] = a.max_corner();
    let [bx2, by2] = b.max_corner();
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = ax2.min(bx2);
    let y2 = ay2.min(by2);
    if x2 <= x1 || y2 <= y1 {
        return 0.0;
    }
    let inter = (x2 - x1) * (y2 - y1);
    let union = a.area() + b.area() - inter;
    if union <= 0.0 {
        return 0.0;
    }
    (inter / union).sqrt()
}

fn push_ratio(dst: &mut Vec<f32>, num: f32, den: f32) {
    // A template edge sitting on the anchor line would divide by ~zero;
    // skip the sample rather than feeding NaN into the median.
    if den.abs() > 1e-6 {
        dst.push(num / den);
    }
}

/// Refines the coarse anchor placement against the detected quads.
///
/// `processing_scale` is the downscale factor the detection image was
/// produced with; the returned transform maps template space directly to
/// detection-image pixel space.
pub fn align(
    model: &TemplateModel,
    quads: &[Quad],
    anchor: [f32; 2],
    processing_scale: f32,
    min_match_overlap: f32,
) -> AlignmentOutcome {
    let coarse = AlignmentTransform {
        anchor_x: anchor[0],
        anchor_y: anchor[1],
        scale_x: processing_scale,
        scale_y: processing_scale,
    };

    let mut xratio = Vec::new();
    let mut yratio = Vec::new();
    let mut matches = 0usize;

    for quad in quads {
        for table in &model.tables {
            let placed = coarse.project(table.rect);
            if overlap(&quad.as_rect(), &placed) <= min_match_overlap {
                continue;
            }
            matches += 1;
            // Near- and far-edge extent ratios relative to the anchor; the
            // far template edge is the inclusive pixel corner (x + w - 1).
            let [px2, py2] = placed.max_corner();
            push_ratio(&mut xratio, quad.x1 - anchor[0], placed.x - anchor[0]);
            push_ratio(&mut xratio, quad.x2 - anchor[0], px2 - 1.0 - anchor[0]);
            push_ratio(&mut yratio, quad.y1 - anchor[1], placed.y - anchor[1]);
            push_ratio(&mut yratio, quad.y2 - anchor[1], py2 - 1.0 - anchor[1]);
        }
    }

    let mx = median(&xratio).unwrap_or(1.0);
    let my = median(&yratio).unwrap_or(1.0);
    debug!(
        "align: {} matches, scale correction ({:.4}, {:.4})",
        matches, mx, my
    );

    AlignmentOutcome {
        transform: AlignmentTransform {
            anchor_x: anchor[0],
            anchor_y: anchor[1],
            scale_x: processing_scale * mx,
            scale_y: processing_scale * my,
        },
        matches,
        degraded: matches == 0,
    }
}
