//! Batch face detection over a directory of images.
//!
//! For every file in an input directory that content-sniffs as an image, the
//! pipeline decodes it, detects frontal faces, writes one padded crop per
//! face (`{name}_CROP.{ext}`) and one annotated copy with green bounding
//! boxes (`{name}_DETECTED.{ext}`) into a freshly reset output directory.
//! Non-image files are skipped; per-file failures are logged and never abort
//! the batch.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use facebatch::{BatchProcessor, RustfaceDetector};
//!
//! let detector = RustfaceDetector::from_model_file("models/seeta_fd_frontal_v1.0.bin").unwrap();
//! let summary = BatchProcessor::new(Box::new(detector))
//!     .run(Path::new("images"), Path::new("output"))
//!     .unwrap();
//! println!("{} faces in {} images", summary.faces, summary.images);
//! ```
#![warn(missing_docs)]

mod crop;
mod error;
/// Face detection traits and data types.
pub mod face_detector;
mod media;
mod output;
mod pipeline;
#[cfg(feature = "rustface")]
/// Built-in SeetaFace-based face detector backend.
pub mod rustface_backend;

/// Error type returned by facebatch operations.
pub use error::FaceBatchError;
/// Face detection trait and face bounding-box type.
pub use face_detector::{FaceBounds, FaceDetector};
#[cfg(feature = "rustface")]
/// Built-in detector backed by a SeetaFace model file.
pub use rustface_backend::RustfaceDetector;

use std::path::Path;

/// Padding applied to every side of a detected face box, in pixels.
const DEFAULT_PADDING: f64 = 50.0;

/// Counters for one batch run.
///
/// Per-file errors are already logged when the summary is returned; they are
/// informational here, not a failure signal (the run itself only fails when
/// the input directory cannot be listed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Directory entries seen (files and anything else).
    pub files: usize,
    /// Files that sniffed as images and were fully processed.
    pub images: usize,
    /// Total faces detected across all processed images.
    pub faces: usize,
    /// Files that sniffed as images but failed somewhere in the pipeline.
    pub failures: usize,
}

/// Builder for a batch face-detection run.
///
/// Holds the shared detector and the tuning knobs; `run` executes one pass
/// over an input directory.
pub struct BatchProcessor {
    detector: Box<dyn FaceDetector>,
    /// Pixels added to every side of each detected face before cropping.
    padding: f64,
    /// Worker pool size. `None` uses the hardware parallelism.
    workers: Option<usize>,
}

impl BatchProcessor {
    /// Create a processor around a face detection backend.
    ///
    /// The detector is shared read-only across all workers, so expensive
    /// setup (model loading) belongs in its constructor, not in `detect`.
    pub fn new(detector: Box<dyn FaceDetector>) -> Self {
        Self {
            detector,
            padding: DEFAULT_PADDING,
            workers: None,
        }
    }

    /// Set the crop padding in pixels (default: 50.0).
    ///
    /// The padded rectangle is clamped to the image bounds, so faces near an
    /// edge get less than the nominal padding on that side.
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set the worker pool size (default: one worker per hardware thread).
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Run the batch over `input_dir`, writing artifacts into `output_dir`.
    ///
    /// `output_dir` is forcibly reset first: anything already there is
    /// deleted. Returns counters for the run; per-file failures are logged
    /// and counted but never returned as errors.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<RunSummary, FaceBatchError> {
        if self.padding < 0.0 {
            return Err(FaceBatchError::InvalidPadding(self.padding));
        }
        pipeline::run_batch(
            input_dir,
            output_dir,
            self.detector.as_ref(),
            self.padding,
            self.workers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoFaces;

    impl FaceDetector for NoFaces {
        fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<FaceBounds> {
            vec![]
        }
    }

    #[test]
    fn negative_padding_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let result = BatchProcessor::new(Box::new(NoFaces))
            .padding(-1.0)
            .run(tmp.path(), &tmp.path().join("output"));
        assert!(matches!(result, Err(FaceBatchError::InvalidPadding(_))));
    }

    #[test]
    fn missing_input_directory_is_a_run_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result = BatchProcessor::new(Box::new(NoFaces)).run(
            &tmp.path().join("does-not-exist"),
            &tmp.path().join("output"),
        );
        assert!(matches!(result, Err(FaceBatchError::Io(_))));
    }

    #[test]
    fn empty_input_directory_yields_empty_summary() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("images");
        std::fs::create_dir(&input).unwrap();

        let summary = BatchProcessor::new(Box::new(NoFaces))
            .workers(2)
            .run(&input, &tmp.path().join("output"))
            .unwrap();

        assert_eq!(
            summary,
            RunSummary {
                files: 0,
                images: 0,
                faces: 0,
                failures: 0
            }
        );
    }
}
