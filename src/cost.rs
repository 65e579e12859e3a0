//! # Window dissimilarity costs
//!
//! This module provides the interchangeable cost functions used to compare two image windows
//! during correspondence search. All costs are computed in floating point, are non-negative,
//! and are smaller for more similar windows.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::gray::Window;

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

/// Dissimilarity cost between two equal-sided windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CostFunction {
    /// Sum of absolute differences.
    Sad,
    /// Sum of squared differences.
    Ssd,
    /// Mean squared difference.
    Mse,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl CostFunction {
    /// Compute the cost between two windows. Both windows must share the same side length.
    pub fn between(&self, a: &Window, b: &Window) -> f32 {
        debug_assert_eq!(a.side(), b.side());

        let side = a.side();
        let mut acc = 0.0f32;

        for j in 0..side {
            for i in 0..side {
                let diff = a.get(i, j) - b.get(i, j);

                acc += match self {
                    CostFunction::Sad => diff.abs(),
                    CostFunction::Ssd | CostFunction::Mse => diff * diff,
                };
            }
        }

        match self {
            CostFunction::Mse => acc / (side * side) as f32,
            _ => acc,
        }
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
