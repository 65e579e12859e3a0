//! # Block-matching disparity computation
//!
//! This module implements dense stereo correspondence by comparing a fixed square window around
//! each left-image pixel against horizontally shifted windows in the right image. The candidate
//! disparity with the lowest sum of squared differences wins.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::time::Instant;

use log::debug;
use serde::Deserialize;

use crate::cost::CostFunction;
use crate::disparity::{DisparityAlgorithm, DisparityMap};
use crate::error::*;
use crate::filter::mode_filter;
use crate::gray::{GrayFloatImage, StereoPair, Window};

#[cfg(feature = "statistics")]
use plotters::prelude::*;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Cost function used to rank candidate disparities.
const SEARCH_COST: CostFunction = CostFunction::Ssd;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

pub struct BlockMatch {
    params: Params,
}

/// Tunable parameters for [`BlockMatch`].
#[derive(Deserialize, Debug)]
pub struct Params {
    /// Side length of the square comparison window, which must be odd.
    pub neighbourhood: usize,
    /// Exclusive upper bound on the searched disparity range.
    pub max_disparity: usize,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl BlockMatch {
    /// Create a new instance of the algorithm with the given parameters.
    pub fn new(params: Params) -> Result<Self> {
        if params.neighbourhood % 2 == 0 {
            return Err(Error::InvalidParameter(format!(
                "neighbourhood must be odd, got {}",
                params.neighbourhood
            )));
        }

        if params.max_disparity == 0 {
            return Err(Error::InvalidParameter(
                "max_disparity must be at least 1".into(),
            ));
        }

        Ok(Self { params })
    }

    /// Find the best disparity for the left-image pixel at `(x, y)`.
    ///
    /// The caller must guarantee that the window around `(x, y)` fits inside the left image.
    fn disparity_at(&self, pair: &StereoPair, x: usize, y: usize) -> u32 {
        let side = self.params.neighbourhood;
        let reference = Window::centred(pair.left(), x, y, side);

        // Seed with the zero-disparity candidate so that ties resolve to the smallest disparity.
        let candidate = Window::centred(pair.right(), x, y, side);
        let mut best_cost = SEARCH_COST.between(&reference, &candidate);
        let mut best_disp = 0u32;

        for d in 1..self.params.max_disparity {
            // Candidates whose window would leave the right image are skipped, not scored.
            if d > x || !Window::fits(pair.right(), x - d, y, side) {
                continue;
            }

            let candidate = Window::centred(pair.right(), x - d, y, side);
            let cost = SEARCH_COST.between(&reference, &candidate);

            if cost < best_cost {
                best_cost = cost;
                best_disp = d as u32;
            }
        }

        best_disp
    }
}

impl DisparityAlgorithm for BlockMatch {
    /// Compute the disparity map for the given stereo pair.
    ///
    /// Only the interior of the image is searched: cells within `neighbourhood` of any edge
    /// are left unset.
    fn compute(&mut self, pair: &StereoPair) -> Result<DisparityMap> {
        let width = pair.width();
        let height = pair.height();
        let border = self.params.neighbourhood;

        debug!("Computing block-matching disparity with {:?}", self.params);
        let start = Instant::now();

        let mut cells: Vec<Option<u32>> = vec![None; width * height];

        // The border leaves no interior, so every cell stays unset.
        if width <= 2 * border || height <= 2 * border {
            return Ok(DisparityMap::from_raw(
                width,
                height,
                cells,
                self.params.max_disparity,
            ));
        }

        // ---- CORRELATION ----

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            cells
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    if y < border || y >= height - border {
                        return;
                    }

                    for x in border..(width - border) {
                        row[x] = Some(self.disparity_at(pair, x, y));
                    }
                });
        }

        #[cfg(not(feature = "parallel"))]
        for y in border..(height - border) {
            for x in border..(width - border) {
                cells[y * width + x] = Some(self.disparity_at(pair, x, y));
            }
        }

        // ---- PLOTTING ----
        #[cfg(feature = "statistics")]
        {
            // Min/max disparity per row, for analysis
            let mut min_disp_history: Vec<(usize, usize)> = Vec::with_capacity(height);
            let mut max_disp_history: Vec<(usize, usize)> = Vec::with_capacity(height);

            for y in border..(height - border) {
                let row = &cells[(y * width)..((y + 1) * width)];
                let set = row.iter().filter_map(|cell| *cell);

                if let (Some(min), Some(max)) = (set.clone().min(), set.max()) {
                    min_disp_history.push((min as usize, y));
                    max_disp_history.push((max as usize, y));
                }
            }

            std::fs::create_dir_all("plots/blockmatch").unwrap();

            let row_range = BitMapBackend::new(
                "plots/blockmatch/row_range.png",
                (800, 600)
            ).into_drawing_area();
            row_range.fill(&WHITE).unwrap();

            let mut chart = ChartBuilder::on(&row_range)
                .caption("Disparity range per row", ("sans-serif", 20).into_font())
                .margin(5)
                .x_label_area_size(30)
                .y_label_area_size(30)
                .build_ranged(
                    0..self.params.max_disparity,
                    0..height
                ).unwrap();

            chart.configure_mesh().draw().unwrap();

            chart
                .draw_series(LineSeries::new(
                    min_disp_history,
                    &RED
                )).unwrap()
                .label("Min disparity")
                .legend(|(x, y)|
                    PathElement::new(vec![(x, y), (x + 20, y)], &RED
                ));
            chart
                .draw_series(LineSeries::new(
                    max_disp_history,
                    &BLUE
                )).unwrap()
                .label("Max disparity")
                .legend(|(x, y)|
                    PathElement::new(vec![(x, y), (x + 20, y)], &BLUE
                ));

            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw().unwrap();

            println!("Stats plotting complete");
        }

        debug!(
            "Disparity computation took {:.3} s",
            start.elapsed().as_secs_f64()
        );

        Ok(DisparityMap::from_raw(
            width,
            height,
            cells,
            self.params.max_disparity,
        ))
    }
}

// -----------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Match `left` against `right` and return the mode-filtered disparity map.
///
/// This is the full pipeline in one call: window correlation over the disparity range
/// `[0, max_disparity)` followed by the mode filter. `neighbourhood` must be odd and
/// `max_disparity` at least 1.
pub fn compute_disparity_map(
    left: &GrayFloatImage,
    right: &GrayFloatImage,
    neighbourhood: usize,
    max_disparity: usize,
) -> Result<DisparityMap> {
    let pair = StereoPair::new(left, right)?;

    let mut algorithm = BlockMatch::new(Params {
        neighbourhood,
        max_disparity,
    })?;

    let raw = algorithm.compute(&pair)?;

    Ok(mode_filter(&raw))
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
