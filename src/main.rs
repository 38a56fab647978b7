use std::path::Path;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use facebatch::{BatchProcessor, RustfaceDetector};

// Input and output locations are fixed relative paths, not flags.
const INPUT_DIR: &str = "images";
const OUTPUT_DIR: &str = "output";
const MODEL_PATH: &str = "models/seeta_fd_frontal_v1.0.bin";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("processing...");

    let detector = RustfaceDetector::from_model_file(MODEL_PATH)
        .with_context(|| format!("loading face detection model from {MODEL_PATH}"))?;

    let summary = BatchProcessor::new(Box::new(detector))
        .run(Path::new(INPUT_DIR), Path::new(OUTPUT_DIR))
        .with_context(|| format!("processing directory {INPUT_DIR}"))?;

    info!(
        files = summary.files,
        images = summary.images,
        faces = summary.faces,
        failures = summary.failures,
        "finished"
    );
    Ok(())
}
