#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod errors;
pub mod export;
pub mod model;
pub mod reader;
pub mod types;

// Stage modules – still public, but considered unstable internals.
pub mod align;
pub mod binarize;
pub mod bitmap;
pub mod digits;
pub mod extract;
pub mod keypatch;
pub mod quads;
pub mod rotation;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

// Main entry points: reader + results.
pub use crate::errors::FormError;
pub use crate::model::{parse_model, TemplateModel};
pub use crate::reader::{FormExtraction, FormReader, FormReport, ReaderParams};

// Convenience helpers generally useful alongside the reader.
pub use crate::binarize::load_binary_image;
pub use crate::export::export_extraction;
