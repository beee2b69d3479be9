//! Probabilistic randomized line voting.
//!
//! Ink pixels are visited in a shuffled order; each visit votes into a
//! (normal angle, offset) accumulator. When a pixel's strongest bin clears
//! the vote threshold, the image is walked along that bin's line direction
//! with a bounded gap budget. Walks long enough to qualify become segments;
//! their pixels are consumed and their votes retracted so the same physical
//! line is not reported twice.

use super::options::{AngleSet, HoughOptions};
use super::types::LineSegment;
use crate::bitmap::INK;
use image::GrayImage;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::f32::consts::{FRAC_PI_2, PI};

struct Accumulator {
    bins: Vec<i32>,
    n_rho: usize,
    rho_offset: i32,
    trig: Vec<(f32, f32)>,
}

impl Accumulator {
    fn new(width: u32, height: u32, angles: &AngleSet) -> Self {
        let thetas: Vec<f32> = match angles {
            AngleSet::Axis => vec![0.0, FRAC_PI_2],
            AngleSet::Sweep(n) => (0..*n)
                .map(|i| -FRAC_PI_2 + PI * i as f32 / *n as f32)
                .collect(),
        };
        let trig: Vec<(f32, f32)> = thetas.iter().map(|t| (t.cos(), t.sin())).collect();
        let diag = ((width * width + height * height) as f32).sqrt().ceil() as i32;
        let n_rho = (2 * diag + 1) as usize;
        Self {
            bins: vec![0; trig.len() * n_rho],
            n_rho,
            rho_offset: diag,
            trig,
        }
    }

    fn bin_index(&self, theta_idx: usize, x: i32, y: i32) -> usize {
        let (c, s) = self.trig[theta_idx];
        let rho = (x as f32 * c + y as f32 * s).round() as i32 + self.rho_offset;
        theta_idx * self.n_rho + rho.clamp(0, self.n_rho as i32 - 1) as usize
    }

    /// Adds one vote per angle, returning the strongest (votes, theta index).
    fn vote(&mut self, x: i32, y: i32) -> (i32, usize) {
        let mut best = (i32::MIN, 0);
        for ti in 0..self.trig.len() {
            let idx = self.bin_index(ti, x, y);
            self.bins[idx] += 1;
            if self.bins[idx] > best.0 {
                best = (self.bins[idx], ti);
            }
        }
        best
    }

    fn retract(&mut self, x: i32, y: i32) {
        for ti in 0..self.trig.len() {
            let idx = self.bin_index(ti, x, y);
            self.bins[idx] -= 1;
        }
    }

    /// Unit direction along the line whose normal is `theta_idx`.
    fn direction(&self, theta_idx: usize) -> (f32, f32) {
        let (c, s) = self.trig[theta_idx];
        (-s, c)
    }
}

struct InkMask {
    width: i32,
    height: i32,
    live: Vec<bool>,
}

impl InkMask {
    fn new(img: &GrayImage) -> Self {
        Self {
            width: img.width() as i32,
            height: img.height() as i32,
            live: img.pixels().map(|p| p.0[0] == INK).collect(),
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn is_live(&self, x: i32, y: i32) -> bool {
        self.contains(x, y) && self.live[(y * self.width + x) as usize]
    }

    fn clear(&mut self, x: i32, y: i32) {
        self.live[(y * self.width + x) as usize] = false;
    }
}

/// Walks from `seed` along `dir`, tolerating up to `max_gap` consecutive
/// background pixels, and returns the last ink pixel reached.
fn walk(mask: &InkMask, seed: (i32, i32), dir: (f32, f32), max_gap: i32) -> (i32, i32) {
    let mut last = seed;
    let mut gap = 0;
    let mut t = 1.0f32;
    loop {
        let x = (seed.0 as f32 + t * dir.0).round() as i32;
        let y = (seed.1 as f32 + t * dir.1).round() as i32;
        if !mask.contains(x, y) {
            break;
        }
        if mask.is_live(x, y) {
            last = (x, y);
            gap = 0;
        } else {
            gap += 1;
            if gap > max_gap {
                break;
            }
        }
        t += 1.0;
    }
    last
}

/// Consumes the ink pixels between the segment endpoints and retracts their
/// accumulator votes.
fn consume(mask: &mut InkMask, acc: &mut Accumulator, seg: &LineSegment) {
    let len = seg.length().ceil() as i32;
    if len == 0 {
        return;
    }
    let dx = (seg.p1[0] - seg.p0[0]) / len as f32;
    let dy = (seg.p1[1] - seg.p0[1]) / len as f32;
    for t in 0..=len {
        let x = (seg.p0[0] + t as f32 * dx).round() as i32;
        let y = (seg.p0[1] + t as f32 * dy).round() as i32;
        if mask.is_live(x, y) {
            mask.clear(x, y);
            acc.retract(x, y);
        }
    }
}

/// Runs the voting detector over a binary image.
pub(super) fn vote_lines(img: &GrayImage, opts: &HoughOptions) -> Vec<LineSegment> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let min_length = opts.min_length_factor * width.min(height) as f32;
    let max_gap = ((opts.gap_factor * min_length).floor() as i32).max(1);

    let mut mask = InkMask::new(img);
    let mut acc = Accumulator::new(width, height, &opts.angles);

    let mut points: Vec<(i32, i32)> = img
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[0] == INK)
        .map(|(x, y, _)| (x as i32, y as i32))
        .collect();
    let mut rng = StdRng::seed_from_u64(opts.seed);
    points.shuffle(&mut rng);

    let mut segments = Vec::new();
    for &(x, y) in &points {
        if !mask.is_live(x, y) {
            continue;
        }
        let (votes, theta_idx) = acc.vote(x, y);
        if votes < opts.vote_threshold as i32 {
            continue;
        }
        let dir = acc.direction(theta_idx);
        let fwd = walk(&mask, (x, y), dir, max_gap);
        let back = walk(&mask, (x, y), (-dir.0, -dir.1), max_gap);
        let seg = LineSegment::new(
            [back.0 as f32, back.1 as f32],
            [fwd.0 as f32, fwd.1 as f32],
        );
        if seg.length() < min_length {
            continue;
        }
        consume(&mut mask, &mut acc, &seg);
        segments.push(seg);
    }
    segments
}
