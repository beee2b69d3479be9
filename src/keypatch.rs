//! Keyword anchor localization via normalized cross-correlation.
//!
//! The form's printed keyword is matched against the rectified image at the
//! processing scale. The response map is computed in valid mode, so the peak
//! coordinate is directly the top-left corner of the match in image space.

use crate::errors::FormError;
use image::GrayImage;
use imageproc::template_matching::{match_template, MatchTemplateMethod};
use log::debug;
use serde::Serialize;

/// Location and strength of the strongest keyword correlation peak.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AnchorMatch {
    /// Top-left corner of the match, image pixel space.
    pub x: f32,
    pub y: f32,
    pub score: f32,
}

/// Finds the single strongest correlation peak of `patch` inside `img`.
///
/// Negative correlation is clipped to zero before peak picking; the peak
/// must exceed `rel_threshold` of the response range, otherwise no anchor
/// exists and alignment cannot proceed.
pub fn detect_keypatch(
    img: &GrayImage,
    patch: &GrayImage,
    rel_threshold: f32,
) -> Result<AnchorMatch, FormError> {
    if patch.width() == 0
        || patch.height() == 0
        || patch.width() > img.width()
        || patch.height() > img.height()
    {
        return Err(FormError::AnchorNotFound {
            threshold: rel_threshold * 100.0,
        });
    }

    let response = match_template(img, patch, MatchTemplateMethod::CrossCorrelationNormalized);

    let mut max = f32::MIN;
    let mut min = f32::MAX;
    let mut best = (0u32, 0u32);
    for (x, y, p) in response.enumerate_pixels() {
        let v = p.0[0].max(0.0); // clip negative correlation, swallow NaN
        if v > max {
            max = v;
            best = (x, y);
        }
        if v < min {
            min = v;
        }
    }

    if max <= 0.0 || max < rel_threshold * (max - min) {
        return Err(FormError::AnchorNotFound {
            threshold: rel_threshold * 100.0,
        });
    }
    debug!("keypatch: peak {:.3} at ({}, {})", max, best.0, best.1);
    Ok(AnchorMatch {
        x: best.0 as f32,
        y: best.1 as f32,
        score: max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::INK;
    use image::Luma;

    fn patch_5x3() -> GrayImage {
        let mut p = GrayImage::new(5, 3);
        for x in 0..5 {
            p.put_pixel(x, 0, Luma([INK]));
            p.put_pixel(x, 2, Luma([INK]));
        }
        p.put_pixel(2, 1, Luma([INK]));
        p
    }

    fn paste(img: &mut GrayImage, patch: &GrayImage, x0: u32, y0: u32) {
        for (x, y, p) in patch.enumerate_pixels() {
            img.put_pixel(x0 + x, y0 + y, *p);
        }
    }

    #[test]
    fn finds_embedded_patch_top_left() {
        let patch = patch_5x3();
        let mut img = GrayImage::new(64, 48);
        paste(&mut img, &patch, 31, 17);
        let anchor = detect_keypatch(&img, &patch, 0.75).unwrap();
        assert!((anchor.x - 31.0).abs() <= 2.0, "x={}", anchor.x);
        assert!((anchor.y - 17.0).abs() <= 2.0, "y={}", anchor.y);
        assert!(anchor.score > 0.9);
    }

    #[test]
    fn blank_image_yields_no_anchor() {
        let patch = patch_5x3();
        let img = GrayImage::new(64, 48);
        let err = detect_keypatch(&img, &patch, 0.75).unwrap_err();
        assert!(matches!(err, FormError::AnchorNotFound { .. }));
    }

    #[test]
    fn patch_larger_than_image_yields_no_anchor() {
        let patch = patch_5x3();
        let img = GrayImage::new(4, 2);
        assert!(detect_keypatch(&img, &patch, 0.75).is_err());
    }
}
