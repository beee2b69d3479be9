use rayon::prelude::*;
use std::env;
use std::path::Path;
use telegrama::config::{self, RuntimeConfig};
use telegrama::{export_extraction, load_binary_image, parse_model, FormReader};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args()
        .nth(1)
        .ok_or_else(|| "usage: telegrama <config.json>".to_string())?;
    let config = config::load_config(Path::new(&config_path))?;

    let model = parse_model(&config.model_path).map_err(|e| e.to_string())?;
    let patch = load_binary_image(&config.keypatch_path).map_err(|e| e.to_string())?;
    let reader = FormReader::new(config.reader_params.clone(), model, &patch);

    // One failing form never aborts the batch; failures are reported per
    // image in the summary.
    let outcomes: Vec<(String, Result<String, String>)> = config
        .images
        .par_iter()
        .map(|path| {
            (
                path.display().to_string(),
                process_one(&reader, path, &config),
            )
        })
        .collect();

    let mut failed = 0usize;
    for (image, outcome) in &outcomes {
        match outcome {
            Ok(summary) => println!("{image}: {summary}"),
            Err(reason) => {
                failed += 1;
                eprintln!("{image}: FAILED: {reason}");
            }
        }
    }
    println!(
        "{} of {} forms extracted, artifacts in {}",
        outcomes.len() - failed,
        outcomes.len(),
        config.output_dir.display()
    );
    Ok(())
}

fn process_one(reader: &FormReader, path: &Path, config: &RuntimeConfig) -> Result<String, String> {
    let img = load_binary_image(path).map_err(|e| e.to_string())?;
    let fx = reader.process(&img).map_err(|e| e.to_string())?;
    let base = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("image path {} has no usable stem", path.display()))?;
    export_extraction(&config.output_dir, base, &fx)?;

    let r = &fx.report;
    Ok(format!(
        "rot {:.2} deg, {} quads, {} matches{}, {} cells, {:.1} ms",
        r.rotation_deg,
        r.quad_count,
        r.alignment_matches,
        if r.degraded_alignment { " (degraded)" } else { "" },
        r.cells.len(),
        r.timings.total_ms
    ))
}
