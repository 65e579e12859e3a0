//! # Mode filtering of disparity maps
//!
//! Raw block-matching output is speckled with isolated mismatches. Replacing each disparity by
//! the most common value in its surrounding square cleans those up while keeping region
//! boundaries sharp.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::collections::BTreeMap;

use log::debug;

use crate::disparity::DisparityMap;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Side length of the square over which the mode is taken.
pub const MODE_FILTER_SIDE: usize = 15;

// -----------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Replace every positive disparity with the most common positive disparity in the
/// [`MODE_FILTER_SIDE`] square around it.
///
/// Unset cells stay unset and do not vote. Zero disparities also pass through unchanged and are
/// excluded from the vote, since a window dominated by zeros would otherwise erase its genuine
/// matches. Ties go to the smallest disparity.
pub fn mode_filter(map: &DisparityMap) -> DisparityMap {
    let width = map.width();
    let height = map.height();
    let half = MODE_FILTER_SIDE / 2;

    debug!("Mode filtering {}x{} disparity map", width, height);

    let mut out = DisparityMap::new(width, height, map.max_disparity());

    for y in 0..height {
        for x in 0..width {
            let centre = match map.get(x, y) {
                None => continue,
                Some(0) => {
                    out.put(x, y, 0);
                    continue;
                }
                Some(v) => v,
            };

            // The square is clipped at the map edges rather than wrapped or shrunk symmetrically.
            let x0 = x.saturating_sub(half);
            let x1 = usize::min(x + half + 1, width);
            let y0 = y.saturating_sub(half);
            let y1 = usize::min(y + half + 1, height);

            let mut counts: BTreeMap<u32, usize> = BTreeMap::new();

            for j in y0..y1 {
                for i in x0..x1 {
                    match map.get(i, j) {
                        Some(v) if v > 0 => *counts.entry(v).or_insert(0) += 1,
                        _ => (),
                    }
                }
            }

            // Ascending iteration with a strictly-greater test keeps the smallest value on ties.
            // The centre itself always votes, so the fallback never fires in practice.
            let mut best = centre;
            let mut best_count = 0;

            for (&value, &count) in counts.iter() {
                if count > best_count {
                    best = value;
                    best_count = count;
                }
            }

            out.put(x, y, best);
        }
    }

    out
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn map_from(width: usize, height: usize, cells: Vec<Option<u32>>) -> DisparityMap {
        DisparityMap::from_raw(width, height, cells, 64)
    }

    #[test]
    fn a_uniform_map_is_unchanged() {
        let map = map_from(6, 6, vec![Some(9); 36]);
        let out = mode_filter(&map);

        assert_eq!(out, map);
    }

    #[test]
    fn an_isolated_outlier_is_replaced() {
        let mut cells = vec![Some(3); 25];
        cells[2 * 5 + 2] = Some(17);
        let map = map_from(5, 5, cells);

        let out = mode_filter(&map);

        assert_eq!(out.get(2, 2), Some(3));
        assert_eq!(out.get(0, 0), Some(3));
    }

    #[test]
    fn a_tied_vote_goes_to_the_smaller_disparity() {
        let map = map_from(4, 1, vec![Some(3), Some(5), Some(3), Some(5)]);
        let out = mode_filter(&map);

        for x in 0..4 {
            assert_eq!(out.get(x, 0), Some(3));
        }
    }

    #[test]
    fn zeros_pass_through_and_do_not_vote() {
        let cells = vec![
            Some(0), Some(0), Some(0),
            Some(0), Some(9), Some(7),
            Some(7), Some(7), Some(0),
        ];
        let map = map_from(3, 3, cells);

        let out = mode_filter(&map);

        // Were zeros allowed to vote they would dominate this window.
        assert_eq!(out.get(1, 1), Some(7));
        assert_eq!(out.get(0, 0), Some(0));
        assert_eq!(out.get(2, 2), Some(0));
    }

    #[test]
    fn unset_cells_stay_unset_and_do_not_vote() {
        let mut cells = vec![None; 9];
        cells[1 * 3 + 1] = Some(4);
        let map = map_from(3, 3, cells);

        let out = mode_filter(&map);

        assert_eq!(out.get(1, 1), Some(4));
        assert_eq!(out.get(0, 0), None);
        assert_eq!(out.get(2, 1), None);
    }
}
