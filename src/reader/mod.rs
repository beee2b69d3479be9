//! High-level form reader.
//!
//! [`FormReader`] binds a parsed template model, a keyword patch and the
//! pipeline parameters; [`FormReader::process`] turns one grayscale scan
//! into a [`FormExtraction`] of cropped tables, cleaned cells, per-digit
//! images and a serializable [`FormReport`].

mod params;
mod pipeline;
mod report;

pub use params::ReaderParams;
pub use pipeline::{CellExtraction, FormExtraction, FormReader, TableExtraction};
pub use report::{CellReport, FormReport, StageTimings, TableReport};
