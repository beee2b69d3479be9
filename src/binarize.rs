//! Binarization with the minority-ink convention.
//!
//! Grayscale input is split with an Otsu threshold; already-binary input is
//! passed through. Either way, if ink would cover more than half of the
//! image the raster is inverted: downstream stages require ink to be the
//! minority class.

use crate::bitmap::{self, INK};
use crate::errors::FormError;
use image::GrayImage;
use imageproc::contrast::otsu_level;
use std::path::Path;

/// Converts a grayscale raster into a two-valued one (ink = [`INK`]).
///
/// Idempotent: feeding back an image that already satisfies the minority-ink
/// convention returns it unchanged.
pub fn binarize(img: &GrayImage) -> GrayImage {
    let mut out = if bitmap::is_binary(img) {
        img.clone()
    } else {
        let level = otsu_level(img);
        let mut bin = GrayImage::new(img.width(), img.height());
        for (src, dst) in img.pixels().zip(bin.pixels_mut()) {
            dst.0[0] = if src.0[0] > level { INK } else { 0 };
        }
        bin
    };
    let total = u64::from(out.width()) * u64::from(out.height());
    if bitmap::ink_count(&out) * 2 > total {
        bitmap::invert(&mut out);
    }
    out
}

/// Loads an image from disk, converts to 8-bit grayscale and binarizes.
pub fn load_binary_image(path: &Path) -> Result<GrayImage, FormError> {
    let img = image::open(path)
        .map_err(|source| FormError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .into_luma8();
    Ok(binarize(&img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn grayscale_input_splits_into_two_classes() {
        let mut img = GrayImage::from_pixel(16, 16, Luma([230u8]));
        for x in 0..4 {
            img.put_pixel(x, 0, Luma([20u8]));
        }
        let bin = binarize(&img);
        assert!(bitmap::is_binary(&bin));
        // Dark strokes on light paper: dark side must come out as ink.
        assert_eq!(bitmap::ink_count(&bin), 4);
        assert_eq!(bin.get_pixel(0, 0).0[0], INK);
    }

    #[test]
    fn binarize_is_idempotent_on_minority_ink_input() {
        let mut img = GrayImage::new(8, 8);
        img.put_pixel(3, 3, Luma([INK]));
        img.put_pixel(4, 3, Luma([INK]));
        let once = binarize(&img);
        assert_eq!(once, img);
        assert_eq!(binarize(&once), once);
    }

    #[test]
    fn majority_ink_input_is_inverted() {
        let mut img = GrayImage::from_pixel(8, 8, Luma([INK]));
        img.put_pixel(0, 0, Luma([0u8]));
        let bin = binarize(&img);
        assert_eq!(bitmap::ink_count(&bin), 1);
        assert_eq!(bin.get_pixel(0, 0).0[0], INK);
    }
}
