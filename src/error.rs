//! # Error standards
//!
//! This module provides a standardised error enum and result type for this crate.

// -----------------------------------------------------------------------------------------------
// TYPES
// -----------------------------------------------------------------------------------------------

/// Standard result type used in the block matching crate.
pub type Result<T> = std::result::Result<T, Error>;

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Two grids that must share dimensions do not.
    #[error("Input dimensions do not match: expected {expected:?} but got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A parameter is outside its documented domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The occlusion mask excluded every pixel, leaving nothing to evaluate.
    #[error("The occlusion mask selects no pixels to evaluate")]
    NoValidPixels,

    /// A requested window extends past the image.
    #[error("Window of side {side} centred at ({x}, {y}) exceeds the {width}x{height} image extent")]
    OutOfBounds {
        x: usize,
        y: usize,
        side: usize,
        width: usize,
        height: usize,
    },
}
