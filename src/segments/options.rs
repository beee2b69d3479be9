use serde::{Deserialize, Serialize};

/// Set of line-normal angles searched by the voting stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleSet {
    /// Normals at 0° and 90° only; assumes a rectified image.
    Axis,
    /// Full sweep of `n` normals across [-90°, 90°).
    Sweep(usize),
}

/// Options controlling the probabilistic line-voting detector.
///
/// Lengths are expressed as fractions of the shorter image dimension so the
/// same options work across processing scales:
/// - `min_length_factor`: minimum accepted segment length.
/// - `gap_factor`: maximum in-line gap, as a fraction of the minimum length.
///   The axis-aligned path uses a larger gap to tolerate broken grid lines.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HoughOptions {
    pub angles: AngleSet,
    /// Accumulator votes required before a walk is attempted.
    pub vote_threshold: u32,
    pub min_length_factor: f32,
    pub gap_factor: f32,
    /// Seed for the randomized pixel visiting order; fixed by default so
    /// repeated runs over the same form are reproducible.
    pub seed: u64,
}

impl HoughOptions {
    /// Defaults for the general (rotation-estimation) path.
    pub fn rotation() -> Self {
        Self {
            angles: AngleSet::Sweep(180),
            vote_threshold: 50,
            min_length_factor: 0.1,
            gap_factor: 0.01,
            seed: 0,
        }
    }

    /// Defaults for axis-aligned grid-line detection.
    pub fn axis() -> Self {
        Self {
            angles: AngleSet::Axis,
            vote_threshold: 10,
            min_length_factor: 0.1,
            gap_factor: 0.1,
            seed: 0,
        }
    }
}
