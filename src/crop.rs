use crate::error::FaceBatchError;
use crate::face_detector::FaceBounds;

/// Crop region within the source image, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Expand a face bounding box by `padding` pixels on every side and clamp the
/// result to the image bounds.
///
/// The source detector gives no guarantee that a face sits at least `padding`
/// pixels away from the edges, so the padded rectangle can extend into
/// negative coordinates or past the image extent. Policy here: intersect with
/// the image. When the face is far enough from every edge the region is
/// exactly `face + 2 × padding` in each dimension.
///
/// Returns `EmptyCrop` when the intersection is degenerate (the detected box
/// lies entirely outside the image).
pub fn padded_region(
    face: &FaceBounds,
    padding: f64,
    img_width: u32,
    img_height: u32,
) -> Result<CropRegion, FaceBatchError> {
    if img_width == 0 || img_height == 0 {
        return Err(FaceBatchError::ZeroDimensions);
    }

    let left = (face.x - padding).max(0.0);
    let top = (face.y - padding).max(0.0);
    let right = (face.x + face.width + padding).min(img_width as f64);
    let bottom = (face.y + face.height + padding).min(img_height as f64);

    if right <= left || bottom <= top {
        return Err(FaceBatchError::EmptyCrop);
    }

    // Round the edges once and derive the extent from them, so that
    // x + width never lands outside the image for fractional inputs.
    let x = left.round() as u32;
    let y = top.round() as u32;
    let width = (right.round() as u32).saturating_sub(x);
    let height = (bottom.round() as u32).saturating_sub(y);

    if width == 0 || height == 0 {
        return Err(FaceBatchError::EmptyCrop);
    }

    Ok(CropRegion {
        x,
        y,
        width,
        height,
    })
}
