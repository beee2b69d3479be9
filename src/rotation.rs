//! Skew estimation from line orientations, plus the deskew warp.
//!
//! The estimator runs the general (full-sweep) line detector on a
//! morphological-gradient image — the gradient suppresses solid filled
//! regions so the voting stage only sees outlines — and votes segment
//! orientations into a histogram over [-45°, +45°]. The modal bin's centre
//! is the estimated skew.

use crate::bitmap::INK;
use crate::errors::FormError;
use crate::segments::{detect_segments, HoughOptions, LineSegment};
use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use imageproc::morphology::{dilate, erode};
use log::debug;

/// Histogram over a symmetric angle range used to pick the dominant skew.
pub(crate) struct SkewHistogram {
    bins: Vec<u32>,
    bin_width_deg: f32,
    half_range_deg: f32,
}

impl SkewHistogram {
    pub(crate) fn new(half_range_deg: f32, bin_width_deg: f32) -> Self {
        let nbins = (2.0 * half_range_deg / bin_width_deg).round().max(1.0) as usize;
        Self {
            bins: vec![0; nbins],
            bin_width_deg,
            half_range_deg,
        }
    }

    pub(crate) fn accumulate(&mut self, angle_deg: f32) {
        if !angle_deg.is_finite()
            || angle_deg < -self.half_range_deg
            || angle_deg > self.half_range_deg
        {
            return;
        }
        let mut idx = ((angle_deg + self.half_range_deg) / self.bin_width_deg) as usize;
        if idx >= self.bins.len() {
            idx = self.bins.len() - 1;
        }
        self.bins[idx] += 1;
    }

    /// Centre of the modal bin: bin start offset by half a bin width.
    pub(crate) fn modal_angle(&self) -> f32 {
        let mut best = 0usize;
        for (i, &v) in self.bins.iter().enumerate() {
            if v > self.bins[best] {
                best = i;
            }
        }
        -self.half_range_deg + (best as f32 + 0.5) * self.bin_width_deg
    }
}

/// Morphological gradient (dilation minus erosion, 3x3 square element).
fn edge_emphasis(img: &GrayImage) -> GrayImage {
    let dilated = dilate(img, Norm::LInf, 1);
    let eroded = erode(img, Norm::LInf, 1);
    let mut out = GrayImage::new(img.width(), img.height());
    for ((pd, pe), po) in dilated.pixels().zip(eroded.pixels()).zip(out.pixels_mut()) {
        po.0[0] = if pd.0[0] == INK && pe.0[0] != INK { INK } else { 0 };
    }
    out
}

/// Estimates the dominant skew angle (degrees) of a binary form image.
///
/// Fails with [`FormError::NoLinesDetected`] when the voting stage finds no
/// segments at all; an empty histogram is a hard failure, not a default.
pub fn estimate_rotation(img: &GrayImage, opts: &HoughOptions) -> Result<f32, FormError> {
    let edges = edge_emphasis(img);
    let lines = detect_segments(&edges, opts);
    if lines.is_empty() {
        return Err(FormError::NoLinesDetected);
    }
    debug!("rotation: {} raw segments", lines.len());

    let mut hist = SkewHistogram::new(45.0, 0.2);
    for seg in &lines {
        let canon: LineSegment = seg.toward_origin();
        hist.accumulate(canon.orientation().to_degrees());
    }
    Ok(hist.modal_angle())
}

/// Rotates a binary image by `-angle_deg` so that structures detected at
/// `angle_deg` become axis-aligned. The canvas expands to fit the rotated
/// bounds; nearest-neighbour sampling keeps the raster two-valued.
pub fn deskew(img: &GrayImage, angle_deg: f32) -> GrayImage {
    let phi = -angle_deg.to_radians();
    let (w, h) = (img.width() as f32, img.height() as f32);
    let (sin, cos) = phi.sin_cos();

    let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)];
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for (x, y) in corners {
        let rx = x * cos - y * sin;
        let ry = x * sin + y * cos;
        min_x = min_x.min(rx);
        min_y = min_y.min(ry);
        max_x = max_x.max(rx);
        max_y = max_y.max(ry);
    }

    let out_w = (max_x - min_x).ceil().max(1.0) as u32;
    let out_h = (max_y - min_y).ceil().max(1.0) as u32;
    let forward = Projection::translate(-min_x, -min_y) * Projection::rotate(phi);
    let mut out = GrayImage::new(out_w, out_h);
    // warp_into inverts the projection itself (it maps output pixels back to
    // the source), so it receives the forward map.
    warp_into(img, &forward, Interpolation::Nearest, Luma([0u8]), &mut out);
    out
}
