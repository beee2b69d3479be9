//! Runtime configuration for the batch CLI.

use crate::reader::ReaderParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Batch-run description loaded from a JSON file.
#[derive(Clone, Deserialize)]
pub struct RuntimeConfig {
    /// Master template (SVG) describing the form layout.
    pub model_path: PathBuf,
    /// Keyword patch image used to anchor the template.
    pub keypatch_path: PathBuf,
    /// Form images to process.
    pub images: Vec<PathBuf>,
    /// Directory crops and reports are written into.
    pub output_dir: PathBuf,
    #[serde(default)]
    pub reader_params: ReaderParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    if config.images.is_empty() {
        return Err(format!("Config {} lists no images", path.display()));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_default_params() {
        let json = r#"{
            "model_path": "master.svg",
            "keypatch_path": "keyword.png",
            "images": ["scan-001.png"],
            "output_dir": "out"
        }"#;
        let config: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.reader_params.processing_scale, 0.5);
        assert_eq!(config.reader_params.speckle_min_size, 64);
    }

    #[test]
    fn params_can_be_overridden_partially() {
        let json = r#"{
            "model_path": "master.svg",
            "keypatch_path": "keyword.png",
            "images": ["scan-001.png"],
            "output_dir": "out",
            "reader_params": { "processing_scale": 0.25, "simplify_lines": true }
        }"#;
        let config: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.reader_params.processing_scale, 0.25);
        assert!(config.reader_params.simplify_lines);
        assert_eq!(config.reader_params.min_match_overlap, 0.5);
    }
}
