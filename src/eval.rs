//! # Disparity map evaluation
//!
//! Compares an estimated disparity map against dataset ground truth. Both are 8-bit images
//! holding disparities multiplied by [`DISPARITY_SCALE`], the convention the Middlebury stereo
//! datasets use. A mask selects which pixels count; dataset occlusion masks are zero wherever
//! no valid ground truth exists.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::error::*;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Factor by which dataset disparity images are scaled to fill the 8-bit range.
pub const DISPARITY_SCALE: u32 = 4;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Aggregate error statistics over the masked pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Evaluation {
    /// Mean absolute disparity error in pixels.
    pub mean_abs_error: f64,
    /// Fraction of pixels whose error exceeds one pixel.
    pub pct_over_1px: f64,
    /// Fraction of pixels whose error exceeds two pixels.
    pub pct_over_2px: f64,
}

// -----------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Evaluate `estimate` against `ground_truth` over the pixels where `mask` is non-zero.
///
/// All three images must share the same dimensions, and the disparity images must carry values
/// scaled by [`DISPARITY_SCALE`]. Errors are measured in unscaled disparity pixels, with the
/// over-one and over-two counts using strict comparisons. Returns
/// [`Error::NoValidPixels`](crate::error::Error::NoValidPixels) if the mask selects nothing.
pub fn evaluate(
    ground_truth: &GrayImage,
    mask: &GrayImage,
    estimate: &GrayImage,
) -> Result<Evaluation> {
    let expected = ground_truth.dimensions();

    for actual in [mask.dimensions(), estimate.dimensions()].iter() {
        if *actual != expected {
            return Err(Error::ShapeMismatch {
                expected: (expected.0 as usize, expected.1 as usize),
                actual: (actual.0 as usize, actual.1 as usize),
            });
        }
    }

    let mut sum = 0.0f64;
    let mut over_1 = 0usize;
    let mut over_2 = 0usize;
    let mut count = 0usize;

    for y in 0..expected.1 {
        for x in 0..expected.0 {
            if mask.get_pixel(x, y)[0] == 0 {
                continue;
            }

            let truth = f64::from(ground_truth.get_pixel(x, y)[0]) / f64::from(DISPARITY_SCALE);
            let guess = f64::from(estimate.get_pixel(x, y)[0]) / f64::from(DISPARITY_SCALE);
            let err = (truth - guess).abs();

            sum += err;
            count += 1;

            if err > 1.0 {
                over_1 += 1;
            }
            if err > 2.0 {
                over_2 += 1;
            }
        }
    }

    if count == 0 {
        return Err(Error::NoValidPixels);
    }

    let n = count as f64;

    Ok(Evaluation {
        mean_abs_error: sum / n,
        pct_over_1px: over_1 as f64 / n,
        pct_over_2px: over_2 as f64 / n,
    })
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, data: Vec<u8>) -> GrayImage {
        GrayImage::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn a_perfect_estimate_scores_zero() {
        let truth = gray(2, 2, vec![4, 8, 12, 40]);
        let mask = gray(2, 2, vec![255; 4]);

        let eval = evaluate(&truth, &mask, &truth).unwrap();

        assert_eq!(eval.mean_abs_error, 0.0);
        assert_eq!(eval.pct_over_1px, 0.0);
        assert_eq!(eval.pct_over_2px, 0.0);
    }

    #[test]
    fn errors_are_measured_in_unscaled_pixels() {
        // True disparities 1, 2, 3, 10 against estimates 1, 3, 3, 6: errors 0, 1, 0, 4.
        let truth = gray(2, 2, vec![4, 8, 12, 40]);
        let estimate = gray(2, 2, vec![4, 12, 12, 24]);
        let mask = gray(2, 2, vec![255; 4]);

        let eval = evaluate(&truth, &mask, &estimate).unwrap();

        assert_eq!(eval.mean_abs_error, 1.25);
        // The error of exactly one pixel is not over one pixel.
        assert_eq!(eval.pct_over_1px, 0.25);
        assert_eq!(eval.pct_over_2px, 0.25);
    }

    #[test]
    fn masked_out_pixels_are_ignored() {
        let truth = gray(2, 2, vec![4, 8, 12, 40]);
        let estimate = gray(2, 2, vec![4, 12, 12, 24]);
        let mask = gray(2, 2, vec![255, 255, 255, 0]);

        let eval = evaluate(&truth, &mask, &estimate).unwrap();

        assert_eq!(eval.mean_abs_error, 1.0 / 3.0);
        assert_eq!(eval.pct_over_1px, 0.0);
        assert_eq!(eval.pct_over_2px, 0.0);
    }

    #[test]
    fn an_empty_mask_is_an_error() {
        let truth = gray(2, 2, vec![4, 8, 12, 40]);
        let mask = gray(2, 2, vec![0; 4]);

        match evaluate(&truth, &mask, &truth) {
            Err(Error::NoValidPixels) => (),
            Err(e) => panic!("expected NoValidPixels, got {:?}", e),
            Ok(_) => panic!("expected NoValidPixels, got a result"),
        }
    }

    #[test]
    fn mismatched_shapes_are_an_error() {
        let truth = gray(2, 2, vec![4, 8, 12, 40]);
        let mask = gray(2, 2, vec![255; 4]);
        let estimate = gray(4, 1, vec![4, 8, 12, 40]);

        match evaluate(&truth, &mask, &estimate) {
            Err(Error::ShapeMismatch { .. }) => (),
            Err(e) => panic!("expected ShapeMismatch, got {:?}", e),
            Ok(_) => panic!("expected ShapeMismatch, got a result"),
        }
    }
}
