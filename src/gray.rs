//! # Grayscale image primitives
//!
//! This module provides the floating point grayscale image used by the matching core, the
//! square window views the dissimilarity costs are computed over, and the stereo pair input
//! object.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::{DynamicImage, GrayImage};

use crate::error::*;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// A single channel floating point image with row-major storage.
///
/// Intensities decoded from files are normalised to `[0, 1]`; images built programmatically
/// may hold any finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayFloatImage {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

/// A square view into a [`GrayFloatImage`], centred on a pixel, with odd side length.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    img: &'a GrayFloatImage,
    centre_x: usize,
    centre_y: usize,
    half: usize,
}

/// A rectified stereo pair. Both images are guaranteed to share dimensions.
#[derive(Debug, Clone, Copy)]
pub struct StereoPair<'a> {
    left: &'a GrayFloatImage,
    right: &'a GrayFloatImage,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl GrayFloatImage {
    /// Create a zero-filled image.
    pub fn new(width: usize, height: usize) -> Self {
        GrayFloatImage {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Create an image by evaluating `f(x, y)` at every pixel.
    pub fn from_fn<F: Fn(usize, usize) -> f32>(width: usize, height: usize, f: F) -> Self {
        let mut data = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }

        GrayFloatImage {
            width,
            height,
            data,
        }
    }

    /// Convert a dynamic image into a normalised grayscale float image.
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        Self::from_luma8(&img.to_luma8())
    }

    /// Convert an 8-bit grayscale image, mapping intensities into `[0, 1]`.
    pub fn from_luma8(img: &GrayImage) -> Self {
        let (width, height) = img.dimensions();

        Self::from_fn(width as usize, height as usize, |x, y| {
            img.get_pixel(x as u32, y as u32)[0] as f32 / 255.0
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the intensity at `(x, y)`. Panics if the coordinate is outside the image.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Set the intensity at `(x, y)`. Panics if the coordinate is outside the image.
    pub fn put(&mut self, x: usize, y: usize, val: f32) {
        self.data[y * self.width + x] = val;
    }
}

impl<'a> Window<'a> {
    /// Create a window of the given odd side centred at `(x, y)`.
    ///
    /// Fails with [`Error::InvalidParameter`] for an even side and [`Error::OutOfBounds`] when
    /// the window would extend past the image.
    pub fn new(img: &'a GrayFloatImage, x: usize, y: usize, side: usize) -> Result<Self> {
        if side % 2 == 0 {
            return Err(Error::InvalidParameter(format!(
                "window side must be odd, got {}",
                side
            )));
        }

        if !Self::fits(img, x, y, side) {
            return Err(Error::OutOfBounds {
                x,
                y,
                side,
                width: img.width(),
                height: img.height(),
            });
        }

        Ok(Self::centred(img, x, y, side))
    }

    /// True if a window of the given side centred at `(x, y)` lies fully inside the image.
    pub fn fits(img: &GrayFloatImage, x: usize, y: usize, side: usize) -> bool {
        let half = side / 2;

        x >= half && y >= half && x + half < img.width() && y + half < img.height()
    }

    /// Create a window without bounds checking. The caller must have established that the
    /// window fits, normally via [`Window::fits`].
    pub(crate) fn centred(img: &'a GrayFloatImage, x: usize, y: usize, side: usize) -> Self {
        debug_assert!(Self::fits(img, x, y, side));

        Window {
            img,
            centre_x: x,
            centre_y: y,
            half: side / 2,
        }
    }

    /// Side length of the window.
    pub fn side(&self) -> usize {
        2 * self.half + 1
    }

    /// Get the intensity at window-local coordinates, `(0, 0)` being the top left corner.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.img.get(
            self.centre_x - self.half + i,
            self.centre_y - self.half + j,
        )
    }
}

impl<'a> StereoPair<'a> {
    /// Pair up a left and right image, checking that their dimensions agree.
    pub fn new(left: &'a GrayFloatImage, right: &'a GrayFloatImage) -> Result<Self> {
        if left.width() != right.width() || left.height() != right.height() {
            return Err(Error::ShapeMismatch {
                expected: (left.width(), left.height()),
                actual: (right.width(), right.height()),
            });
        }

        Ok(StereoPair { left, right })
    }

    pub fn left(&self) -> &GrayFloatImage {
        self.left
    }

    pub fn right(&self) -> &GrayFloatImage {
        self.right
    }

    pub fn width(&self) -> usize {
        self.left.width()
    }

    pub fn height(&self) -> usize {
        self.left.height()
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
