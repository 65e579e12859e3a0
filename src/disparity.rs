//! # General disparity objects
//!
//! This module provides generic disparity traits and structures for use by different algorithms.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::GrayImage;

use crate::error::*;
use crate::gray::StereoPair;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// An integer disparity map with explicit per-cell validity.
///
/// A cell is `None` until an algorithm writes it, so border pixels that no search visits are
/// distinguishable from pixels whose computed disparity is a genuine zero. Set cells hold
/// values in `[0, max_disparity)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisparityMap {
    width: usize,
    height: usize,
    data: Vec<Option<u32>>,
    max_disparity: usize,
}

// -----------------------------------------------------------------------------------------------
// TRAITS
// -----------------------------------------------------------------------------------------------

pub trait DisparityAlgorithm {
    /// Compute the disparity map of the given stereo pair.
    fn compute(&mut self, pair: &StereoPair) -> Result<DisparityMap>;
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl DisparityMap {
    /// Create a map of the given dimensions with every cell unset.
    pub fn new(width: usize, height: usize, max_disparity: usize) -> Self {
        DisparityMap {
            width,
            height,
            data: vec![None; width * height],
            max_disparity,
        }
    }

    /// Build a map from row-major cells.
    pub fn from_raw(
        width: usize,
        height: usize,
        data: Vec<Option<u32>>,
        max_disparity: usize,
    ) -> Self {
        debug_assert_eq!(data.len(), width * height);

        DisparityMap {
            width,
            height,
            data,
            max_disparity,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Exclusive upper bound on the disparity values this map may hold.
    pub fn max_disparity(&self) -> usize {
        self.max_disparity
    }

    /// The disparity at `(x, y)`, or `None` if the cell was never computed.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        self.data[y * self.width + x]
    }

    pub fn put(&mut self, x: usize, y: usize, val: u32) {
        debug_assert!((val as usize) < self.max_disparity);

        self.data[y * self.width + x] = Some(val);
    }

    /// Converts the map into a Luma8 image. Unset cells render as 0.
    pub fn to_luma(&self) -> GrayImage {
        self.to_luma_scaled(1)
    }

    /// Converts the map into a Luma8 image after multiplying every disparity by `factor`,
    /// clamping to the 8-bit range. Unset cells render as 0.
    pub fn to_luma_scaled(&self, factor: u32) -> GrayImage {
        let mut new = GrayImage::new(self.width as u32, self.height as u32);

        for y in 0..self.height {
            for x in 0..self.width {
                let val = match self.get(x, y) {
                    Some(d) => d.saturating_mul(factor).min(255) as u8,
                    None => 0,
                };

                *new.get_pixel_mut(x as u32, y as u32) = image::Luma([val]);
            }
        }

        new
    }

    /// Converts the map to a normalised GrayImage.
    ///
    /// Normalises by the maximum disparity observed in the map. If the map holds no positive
    /// disparity the function is equivalent to `.to_luma()`.
    pub fn to_luma_normalised(&self) -> GrayImage {
        let max = self.data.iter().filter_map(|cell| *cell).max().unwrap_or(0);

        if max == 0 {
            return self.to_luma();
        }

        let mult = 255.0 / max as f32;
        let mut new = GrayImage::new(self.width as u32, self.height as u32);

        for y in 0..self.height {
            for x in 0..self.width {
                let mut val = match self.get(x, y) {
                    Some(d) => d as f32 * mult,
                    None => 0.0,
                };

                if val < 0.0 {
                    val = 0.0;
                }
                else if val > 255.0 {
                    val = 255.0;
                }

                *new.get_pixel_mut(x as u32, y as u32) = image::Luma([val as u8]);
            }
        }

        new
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
