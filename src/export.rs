//! Artifact export: PNG crops and JSON reports.
//!
//! Crops are stored inverted (black ink on white paper) so the artifacts are
//! readable directly; the pipeline-internal convention stays ink = 255.
//!
//! Naming scheme under the output directory, with `base` the image stem:
//! - `<base>-<id>.png` for a table or a raw cell crop,
//! - `<base>-<id>-0.png` for the cleaned cell,
//! - `<base>-<id>-<k>.png` for the k-th digit (1-based, left to right),
//! - `<base>.json` for the report.

use crate::bitmap;
use crate::reader::FormExtraction;
use image::GrayImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Saves a binary crop as a white-background PNG.
pub fn save_crop(path: &Path, img: &GrayImage) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = img.clone();
    bitmap::invert(&mut out);
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

/// Writes every artifact of one processed form under `dir`.
pub fn export_extraction(dir: &Path, base: &str, fx: &FormExtraction) -> Result<(), String> {
    for table in &fx.tables {
        save_crop(&dir.join(format!("{base}-{}.png", table.id)), &table.crop)?;
    }
    for cell in &fx.cells {
        save_crop(&dir.join(format!("{base}-{}.png", cell.id)), &cell.raw)?;
        save_crop(&dir.join(format!("{base}-{}-0.png", cell.id)), &cell.cleaned)?;
        for (k, digit) in cell.digits.iter().enumerate() {
            save_crop(&dir.join(format!("{base}-{}-{}.png", cell.id, k + 1)), digit)?;
        }
    }
    write_json_file(&dir.join(format!("{base}.json")), &fx.report)
}
