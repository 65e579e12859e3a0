//! End-to-end disparity pipeline tests on synthetic stereo pairs

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use cv_blockmatch::prelude::*;
use image::{GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;

// -----------------------------------------------------------------------------------------------
// HELPERS
// -----------------------------------------------------------------------------------------------

/// A flat background with a textured 10x10 patch whose left edge sits at `patch_x0`.
///
/// Rendering the same scene with two different patch positions gives a stereo pair whose only
/// moving object is the patch.
fn scene(x: usize, y: usize, patch_x0: usize) -> f32 {
    let in_patch = x >= patch_x0 && x < patch_x0 + 10 && y >= 28 && y < 38;

    if in_patch {
        let i = x - patch_x0;
        let j = y - 28;
        0.5 + (i * 10 + j) as f32 * 0.005
    }
    else {
        0.2
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[test]
fn a_shifted_patch_is_recovered_and_the_background_stays_zero() {
    // The patch sits at column 30 in the left image and column 25 in the right image, so its
    // true disparity is 5.
    let left = GrayFloatImage::from_fn(64, 64, |x, y| scene(x, y, 30));
    let right = GrayFloatImage::from_fn(64, 64, |x, y| scene(x, y, 25));

    let map = compute_disparity_map(&left, &right, 7, 10).unwrap();

    assert_eq!(map.width(), 64);
    assert_eq!(map.height(), 64);

    // Everything the patch influences, including the matching skirt the mode filter absorbs,
    // settles on the true disparity.
    for y in 25..=40 {
        for x in 22..=42 {
            assert_eq!(map.get(x, y), Some(5), "at ({}, {})", x, y);
        }
    }

    // The flat background ties every candidate, and ties resolve to zero.
    for &(x, y) in &[(10, 10), (50, 50), (32, 10), (10, 32), (50, 32), (7, 7), (56, 56)] {
        assert_eq!(map.get(x, y), Some(0), "at ({}, {})", x, y);
    }

    // The border band, one neighbourhood wide, is never computed.
    for &(x, y) in &[(0, 0), (6, 32), (32, 6), (57, 32), (32, 57), (63, 63)] {
        assert_eq!(map.get(x, y), None, "at ({}, {})", x, y);
    }
}

#[test]
fn an_identical_pair_comes_out_all_zero() {
    let img = GrayFloatImage::from_fn(32, 32, |x, y| ((x * 7 + y * 13) % 29) as f32 / 29.0);

    let map = compute_disparity_map(&img, &img, 5, 8).unwrap();

    for y in 0..32 {
        for x in 0..32 {
            let expected = if (5..27).contains(&x) && (5..27).contains(&y) {
                Some(0)
            }
            else {
                None
            };

            assert_eq!(map.get(x, y), expected, "at ({}, {})", x, y);
        }
    }
}

#[test]
fn a_blurred_natural_looking_pair_is_recovered() {
    // Both views are crops of one blurred noise image, offset by 5 columns, so every right
    // pixel equals the left pixel 5 columns over and no window straddles a crop boundary.
    let noise = GrayImage::from_fn(90, 40, |x, y| {
        Luma([(((x * 37 + y * 91) ^ (x * y + 13)) % 251) as u8])
    });
    let master = gaussian_blur_f32(&noise, 1.2);

    let left = GrayFloatImage::from_fn(80, 40, |x, y| {
        f32::from(master.get_pixel(x as u32, y as u32)[0]) / 255.0
    });
    let right = GrayFloatImage::from_fn(80, 40, |x, y| {
        f32::from(master.get_pixel(x as u32 + 5, y as u32)[0]) / 255.0
    });

    let map = compute_disparity_map(&left, &right, 7, 20).unwrap();

    // Deep in the interior the true candidate always fits and wins exactly.
    for y in 10..30 {
        for x in 15..65 {
            assert_eq!(map.get(x, y), Some(5), "at ({}, {})", x, y);
        }
    }
}

#[test]
fn pipeline_errors_surface_to_the_caller() {
    let a = GrayFloatImage::new(16, 16);
    let b = GrayFloatImage::new(16, 8);

    match compute_disparity_map(&a, &b, 5, 8) {
        Err(Error::ShapeMismatch { .. }) => (),
        other => panic!("expected ShapeMismatch, got {:?}", other),
    }

    match compute_disparity_map(&a, &a, 6, 8) {
        Err(Error::InvalidParameter(_)) => (),
        other => panic!("expected InvalidParameter, got {:?}", other),
    }
}
