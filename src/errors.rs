//! Error taxonomy for the form-extraction pipeline.
//!
//! Fatal errors abort the current form only; batch drivers report them with
//! the form identifier and move on. Degraded-but-usable conditions (identity
//! scale fallback, per-cell segmentation anomalies) are not errors — they are
//! flags on the report types in [`crate::reader`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort processing of a single form.
#[derive(Debug, Error)]
pub enum FormError {
    /// The input raster could not be read or decoded.
    #[error("failed to load image {path}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The master template file could not be read from disk.
    #[error("failed to read template {path}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The master template is structurally invalid (unparseable XML, missing
    /// reference rectangle or background image element).
    #[error("malformed template {path}: {reason}")]
    MalformedTemplate { path: PathBuf, reason: String },

    /// No line segments were found, so the skew angle cannot be estimated.
    #[error("no lines detected; rotation cannot be estimated")]
    NoLinesDetected,

    /// No correlation peak cleared the relative threshold; without the
    /// keyword anchor the template cannot be placed in the image.
    #[error("keyword anchor not found (no correlation peak above {threshold:.0}% of response range)")]
    AnchorNotFound { threshold: f32 },
}
