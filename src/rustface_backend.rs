use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::FaceBatchError;
use crate::face_detector::{FaceBounds, FaceDetector};

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The model file is read once on construction into an immutable handle.
/// Each `detect` call builds a throwaway engine from the shared model — the
/// engine itself needs `&mut` access, the model does not — so a single
/// `RustfaceDetector` can serve every worker in the pool without locking.
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    /// Load the SeetaFace frontal-face model from `path`.
    pub fn from_model_file(path: impl AsRef<Path>) -> Result<Self, FaceBatchError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FaceBatchError::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let model =
            rustface::read_model(BufReader::new(file)).map_err(|e| FaceBatchError::ModelLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(Self { model })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(20);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBounds {
                    x: bbox.x() as f64,
                    y: bbox.y() as f64,
                    width: bbox.width() as f64,
                    height: bbox.height() as f64,
                    confidence: face.score(),
                }
            })
            .collect()
    }
}
