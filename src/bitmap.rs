//! Helpers over [`GrayImage`] buffers treated as two-valued rasters.
//!
//! The pipeline-wide convention is `INK = 255`, background = 0, with ink the
//! minority class (enforced by [`crate::binarize`]). Everything downstream of
//! the binarizer assumes it.

use image::{imageops, GrayImage, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};

/// Pixel value representing ink in a binary raster.
pub const INK: u8 = 255;

/// True when every pixel is exactly 0 or [`INK`].
pub fn is_binary(img: &GrayImage) -> bool {
    img.pixels().all(|p| p.0[0] == 0 || p.0[0] == INK)
}

/// Number of ink pixels.
pub fn ink_count(img: &GrayImage) -> u64 {
    img.pixels().filter(|p| p.0[0] == INK).count() as u64
}

/// Swaps ink and background in place.
pub fn invert(img: &mut GrayImage) {
    for p in img.pixels_mut() {
        p.0[0] = INK - p.0[0];
    }
}

/// Per-column ink counts (length = width).
pub fn column_ink(img: &GrayImage) -> Vec<u32> {
    let mut sums = vec![0u32; img.width() as usize];
    for (x, _, p) in img.enumerate_pixels() {
        if p.0[0] == INK {
            sums[x as usize] += 1;
        }
    }
    sums
}

/// Per-row ink counts (length = height).
pub fn row_ink(img: &GrayImage) -> Vec<u32> {
    let mut sums = vec![0u32; img.height() as usize];
    for (_, y, p) in img.enumerate_pixels() {
        if p.0[0] == INK {
            sums[y as usize] += 1;
        }
    }
    sums
}

/// Pixel-wise AND of two same-sized binary rasters.
pub fn and(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    let mut out = GrayImage::new(a.width(), a.height());
    for ((pa, pb), po) in a.pixels().zip(b.pixels()).zip(out.pixels_mut()) {
        po.0[0] = if pa.0[0] == INK && pb.0[0] == INK { INK } else { 0 };
    }
    out
}

/// Downscales a binary raster by `scale`, re-thresholding so that any pixel
/// touched by ink during interpolation stays ink. Matches the behaviour of a
/// bilinear rescale followed by `> 0`.
pub fn downscale_binary(img: &GrayImage, scale: f32) -> GrayImage {
    let w = ((img.width() as f32 * scale).round() as u32).max(1);
    let h = ((img.height() as f32 * scale).round() as u32).max(1);
    let mut out = imageops::resize(img, w, h, imageops::FilterType::Triangle);
    for p in out.pixels_mut() {
        p.0[0] = if p.0[0] > 0 { INK } else { 0 };
    }
    out
}

/// Removes 8-connected ink components with fewer than `min_size` pixels.
pub fn remove_small_components(img: &GrayImage, min_size: u32) -> GrayImage {
    let labels = connected_components(img, Connectivity::Eight, Luma([0u8]));
    let max_label = labels.pixels().map(|p| p.0[0]).max().unwrap_or(0) as usize;
    let mut areas = vec![0u32; max_label + 1];
    for p in labels.pixels() {
        areas[p.0[0] as usize] += 1;
    }
    let mut out = img.clone();
    for (po, pl) in out.pixels_mut().zip(labels.pixels()) {
        let label = pl.0[0] as usize;
        if label != 0 && areas[label] < min_size {
            po.0[0] = 0;
        }
    }
    out
}

/// Median of a sample set, averaging the two middle values for even sizes.
/// Returns `None` for an empty slice.
pub fn median(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some(0.5 * (sorted[n / 2 - 1] + sorted[n / 2]))
    }
}

/// 1-D median filter with odd window `k`, zero-padded at both ends.
pub fn median_filter_1d(signal: &[u32], k: usize) -> Vec<u32> {
    debug_assert!(k % 2 == 1, "median window must be odd");
    let half = k / 2;
    let mut out = Vec::with_capacity(signal.len());
    let mut window = Vec::with_capacity(k);
    for i in 0..signal.len() {
        window.clear();
        for j in 0..k {
            let idx = i as isize + j as isize - half as isize;
            if idx < 0 || idx as usize >= signal.len() {
                window.push(0);
            } else {
                window.push(signal[idx as usize]);
            }
        }
        window.sort_unstable();
        out.push(window[half]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(img: &mut GrayImage, x0: u32, y0: u32, side: u32) {
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                img.put_pixel(x, y, Luma([INK]));
            }
        }
    }

    #[test]
    fn small_components_are_removed() {
        let mut img = GrayImage::new(40, 40);
        blob(&mut img, 2, 2, 8); // 64 px, kept
        blob(&mut img, 30, 30, 3); // 9 px, dropped
        let out = remove_small_components(&img, 32);
        assert_eq!(ink_count(&out), 64);
        assert_eq!(out.get_pixel(31, 31).0[0], 0);
    }

    #[test]
    fn median_averages_middles_for_even_counts() {
        assert_eq!(median(&[1.0, 3.0]), Some(2.0));
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn median_filter_suppresses_spikes() {
        let signal = [0, 0, 9, 0, 0, 4, 4, 4, 4, 4];
        let smoothed = median_filter_1d(&signal, 5);
        assert_eq!(smoothed[2], 0, "isolated spike should vanish");
        assert_eq!(smoothed[7], 4, "plateau should survive");
        assert_eq!(smoothed.len(), signal.len());
    }

    #[test]
    fn downscale_keeps_binary_convention() {
        let mut img = GrayImage::new(20, 20);
        blob(&mut img, 4, 4, 6);
        let half = downscale_binary(&img, 0.5);
        assert_eq!(half.dimensions(), (10, 10));
        assert!(is_binary(&half));
        assert!(ink_count(&half) > 0);
    }
}
