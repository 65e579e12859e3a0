//! # Stereo Block Matching
//!
//! This crate provides dense disparity map computation for rectified stereo pairs, along with
//! mode filtering of the raw map and evaluation against dataset ground truth.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod blockmatch;
pub mod cost;
mod disparity;
mod error;
pub mod eval;
pub mod filter;
mod gray;

// -----------------------------------------------------------------------------------------------
// EXPORTS
// -----------------------------------------------------------------------------------------------

pub mod prelude {
    pub use crate::blockmatch::{compute_disparity_map, BlockMatch, Params};
    pub use crate::cost::CostFunction;
    pub use crate::disparity::{DisparityAlgorithm, DisparityMap};
    pub use crate::error::{Error, Result};
    pub use crate::eval::{evaluate, Evaluation, DISPARITY_SCALE};
    pub use crate::filter::{mode_filter, MODE_FILTER_SIDE};
    pub use crate::gray::{GrayFloatImage, StereoPair, Window};
}
