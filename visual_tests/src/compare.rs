use crate::{Result, VisualTestError};
use image::{Rgba, RgbaImage};
use image_compare::Algorithm;
use std::path::Path;

/// Channel difference below which two pixels count as equal in the diff
const DIFF_TOLERANCE: u8 = 10;

/// Result of comparing two frames
pub struct CompareResult {
    /// Structural similarity from 0.0 to 1.0
    pub similarity: f64,
}

/// Compare a reference PNG with a captured PNG
pub fn compare_images(reference: &Path, captured: &Path) -> Result<CompareResult> {
    let reference = image::open(reference)?.to_rgba8();
    let captured = image::open(captured)?.to_rgba8();
    compare_frames(&reference, &captured)
}

/// Compare two decoded frames with SSIM. Alpha is dropped.
pub fn compare_frames(reference: &RgbaImage, captured: &RgbaImage) -> Result<CompareResult> {
    if reference.dimensions() != captured.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "Frame sizes don't match: reference {:?} vs captured {:?}",
            reference.dimensions(),
            captured.dimensions()
        )));
    }

    let reference_rgb = image::DynamicImage::ImageRgba8(reference.clone()).to_rgb8();
    let captured_rgb = image::DynamicImage::ImageRgba8(captured.clone()).to_rgb8();
    let result = image_compare::rgb_similarity_structure(
        &Algorithm::MSSIMSimple,
        &reference_rgb,
        &captured_rgb,
    )
    .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?;

    Ok(CompareResult {
        similarity: result.score,
    })
}

/// Write a diff image: differing pixels in red, everything else dimmed.
pub fn generate_diff_image(reference: &Path, captured: &Path, output: &Path) -> Result<()> {
    let reference = image::open(reference)?.to_rgba8();
    let captured = image::open(captured)?.to_rgba8();
    diff_frames(&reference, &captured).save(output)?;
    Ok(())
}

fn diff_frames(reference: &RgbaImage, captured: &RgbaImage) -> RgbaImage {
    RgbaImage::from_fn(captured.width(), captured.height(), |x, y| {
        let cap = captured.get_pixel(x, y);
        let diff = reference
            .get_pixel_checked(x, y)
            .map_or(u8::MAX, |r| pixel_difference(r, cap));

        if diff > DIFF_TOLERANCE {
            let intensity = (diff as f32 / 255.0 * 200.0 + 55.0) as u8;
            Rgba([intensity, 0, 0, 255])
        } else {
            Rgba([cap[0] / 3, cap[1] / 3, cap[2] / 3, 255])
        }
    })
}

/// Largest channel difference between two pixels, alpha included
fn pixel_difference(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn test_identical_frames() {
        let frame = solid(16, 16, [255, 0, 0, 255]);
        let result = compare_frames(&frame, &frame).unwrap();
        assert!(result.similarity > 0.999);
    }

    #[test]
    fn test_changed_ring_lowers_similarity() {
        let reference = solid(32, 32, [255, 255, 255, 255]);
        let mut captured = reference.clone();
        for x in 8..24 {
            captured.put_pixel(x, 16, Rgba([255, 0, 0, 255]));
        }
        let result = compare_frames(&reference, &captured).unwrap();
        assert!(result.similarity < 0.999);
    }

    #[test]
    fn test_size_mismatch() {
        let result = compare_frames(&solid(8, 8, [0; 4]), &solid(8, 9, [0; 4]));
        assert!(matches!(result, Err(VisualTestError::Compare(_))));
    }

    #[test]
    fn test_diff_highlights_changes() {
        let reference = solid(4, 4, [90, 90, 90, 255]);
        let mut captured = reference.clone();
        captured.put_pixel(1, 1, Rgba([90, 90, 90, 0]));
        let diff = diff_frames(&reference, &captured);
        assert_eq!(diff.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(diff.get_pixel(0, 0).0, [30, 30, 30, 255]);
    }
}
