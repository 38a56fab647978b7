use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use rayon::prelude::*;
use tracing::{debug, error, info};

use crate::crop::padded_region;
use crate::error::FaceBatchError;
use crate::face_detector::FaceDetector;
use crate::media::sniff_format;
use crate::{output, RunSummary};

/// Outline color for annotated face rectangles.
const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// What happened to a single directory entry.
enum FileOutcome {
    /// Not a file, or content did not sniff as an image. No artifacts.
    Skipped,
    /// Decoded and written, with this many detected faces.
    Processed { faces: usize },
}

/// Run the batch: reset the output directory, list `input_dir` (direct
/// entries only), and process every image in a bounded worker pool.
///
/// Per-file errors are contained and logged; the only run-level failure is
/// being unable to list the input directory (or build the pool).
pub(crate) fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    detector: &dyn FaceDetector,
    padding: f64,
    workers: Option<usize>,
) -> Result<RunSummary, FaceBatchError> {
    output::prepare(output_dir);
    info!(output = %output_dir.display(), "output directory ready");

    let entries: Vec<_> = fs::read_dir(input_dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    info!(input = %input_dir.display(), entries = entries.len(), "processing");

    // num_threads(0) lets rayon pick the hardware parallelism
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.unwrap_or(0))
        .build()
        .map_err(|e| FaceBatchError::Pool(e.to_string()))?;

    let images = AtomicUsize::new(0);
    let faces = AtomicUsize::new(0);
    let failures = AtomicUsize::new(0);

    pool.install(|| {
        entries.par_iter().for_each(|path| {
            match process_file(path, output_dir, detector, padding) {
                Ok(FileOutcome::Processed { faces: n }) => {
                    images.fetch_add(1, Ordering::Relaxed);
                    faces.fetch_add(n, Ordering::Relaxed);
                }
                Ok(FileOutcome::Skipped) => {}
                Err(e) => {
                    failures.fetch_add(1, Ordering::Relaxed);
                    error!(file = %path.display(), error = %e, "failed to process file");
                }
            }
        });
    });

    let summary = RunSummary {
        files: entries.len(),
        images: images.into_inner(),
        faces: faces.into_inner(),
        failures: failures.into_inner(),
    };
    info!(
        files = summary.files,
        images = summary.images,
        faces = summary.faces,
        failures = summary.failures,
        "batch complete"
    );
    Ok(summary)
}

/// Process one directory entry: sniff, decode, detect, write crops, write
/// the annotated copy.
fn process_file(
    path: &Path,
    output_dir: &Path,
    detector: &dyn FaceDetector,
    padding: f64,
) -> Result<FileOutcome, FaceBatchError> {
    if !path.is_file() {
        debug!(entry = %path.display(), "skipping non-file entry");
        return Ok(FileOutcome::Skipped);
    }

    let bytes = fs::read(path)?;
    let Some(format) = sniff_format(&bytes) else {
        debug!(file = %path.display(), "skipping non-image file");
        return Ok(FileOutcome::Skipped);
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!(file = %file_name, size = bytes.len(), "processing image");

    let decoded = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| FaceBatchError::Decode(e.to_string()))?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(FaceBatchError::ZeroDimensions);
    }

    let gray = decoded.to_luma8();
    let mut rgb = decoded.to_rgb8();

    // A broken detector must not take the whole batch down with it.
    let faces = panic::catch_unwind(AssertUnwindSafe(|| {
        detector.detect(gray.as_raw(), gray.width(), gray.height())
    }))
    .map_err(|payload| FaceBatchError::DetectorPanic(panic_message(&payload)))?;
    info!(file = %file_name, faces = faces.len(), "detected faces");

    let mut regions = Vec::with_capacity(faces.len());
    for face in &faces {
        match padded_region(face, padding, rgb.width(), rgb.height()) {
            Ok(region) => regions.push(region),
            Err(e) => error!(file = %file_name, error = %e, "dropping unusable face region"),
        }
    }

    // Crops are taken from the pristine buffer before any rectangle is
    // drawn. Every face writes to the same crop path, so with multiple
    // faces only the last one's crop survives.
    let crop_path = output_dir.join(artifact_name(&file_name, &extension, "CROP"));
    for region in &regions {
        let crop = image::imageops::crop_imm(&rgb, region.x, region.y, region.width, region.height)
            .to_image();
        if let Err(e) = crop.save_with_format(&crop_path, format) {
            error!(file = %file_name, path = %crop_path.display(), error = %e, "failed to write crop");
        }
    }

    for region in &regions {
        let rect = Rect::at(region.x as i32, region.y as i32).of_size(region.width, region.height);
        draw_hollow_rect_mut(&mut rgb, rect, BOX_COLOR);
    }

    let annotated_path = output_dir.join(artifact_name(&file_name, &extension, "DETECTED"));
    rgb.save_with_format(&annotated_path, format)
        .map_err(|e| FaceBatchError::Encode {
            path: annotated_path,
            reason: e.to_string(),
        })?;

    Ok(FileOutcome::Processed { faces: faces.len() })
}

/// Artifact name for a source file: `{file-name}_{suffix}.{extension}`.
///
/// `file_name` is the full source name including its extension, so `a.jpg`
/// becomes `a.jpg_CROP.jpg`.
fn artifact_name(file_name: &str, extension: &str, suffix: &str) -> String {
    format!("{file_name}_{suffix}.{extension}")
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_name_repeats_the_extension() {
        assert_eq!(artifact_name("a.jpg", "jpg", "CROP"), "a.jpg_CROP.jpg");
        assert_eq!(
            artifact_name("photo.png", "png", "DETECTED"),
            "photo.png_DETECTED.png"
        );
    }

    #[test]
    fn artifact_name_without_extension() {
        // matches the source naming scheme: trailing dot, encoder picks the
        // actual format from content sniffing, not from this name
        assert_eq!(artifact_name("photo", "", "CROP"), "photo_CROP.");
    }

    #[test]
    fn panic_message_extracts_str_payloads() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
