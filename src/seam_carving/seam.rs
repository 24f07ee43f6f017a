//! Seams and the two seam search strategies.
//!
//! A seam holds one column index per row, top to bottom. Consecutive entries
//! differ by at most one column (8-connectivity). Both strategies only ever
//! consider in-range neighbour columns, so every seam they return is valid
//! by construction.

use crate::error::{Result, SeamCarveError};
use crate::seam_carving::energy::EnergyMap;
use crate::utils::validate_non_empty_image;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// A connected top-to-bottom path of one pixel per row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seam(Vec<u32>);

impl Seam {
    /// Wraps a list of column indices, one per row
    ///
    /// No validation happens here; use [`Seam::validate`] before trusting a
    /// seam that did not come from a [`FindSeam`] search.
    pub fn new(columns: Vec<u32>) -> Self {
        Self(columns)
    }

    /// Column index per row
    pub fn columns(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }

    /// Checks the seam against an image of `width` x `height`
    ///
    /// # Errors
    ///
    /// * `SeamCarveError::SeamLengthMismatch` - not exactly one entry per row
    /// * `SeamCarveError::IndexOutOfRange` - an entry is not in `0..width`
    /// * `SeamCarveError::DisconnectedSeam` - consecutive entries are more than one column apart
    pub fn validate(&self, width: u32, height: u32) -> Result<()> {
        if self.0.len() != height as usize {
            return Err(SeamCarveError::SeamLengthMismatch {
                expected: height,
                actual: self.0.len() as u32,
            });
        }

        for (row, &column) in self.0.iter().enumerate() {
            if column >= width {
                return Err(SeamCarveError::IndexOutOfRange {
                    row: row as u32,
                    column,
                    width,
                });
            }
        }

        for (row, (&from, &to)) in self.0.iter().tuple_windows().enumerate() {
            if from.abs_diff(to) > 1 {
                return Err(SeamCarveError::DisconnectedSeam {
                    row: row as u32 + 1,
                    from,
                    to,
                });
            }
        }

        Ok(())
    }

    pub(crate) fn is_valid_for(&self, width: u32, height: u32) -> bool {
        self.validate(width, height).is_ok()
    }
}

impl From<Vec<u32>> for Seam {
    fn from(columns: Vec<u32>) -> Self {
        Self(columns)
    }
}

impl AsRef<[u32]> for Seam {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

/// Seam search strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Locally best choice per row, no lookahead
    #[default]
    Greedy,
    /// Dynamic programming over cumulative row costs; globally minimal
    ExactDp,
}

impl Strategy {
    /// Selector name as accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::ExactDp => "dp",
        }
    }
}

impl FromStr for Strategy {
    type Err = SeamCarveError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "greedy" => Ok(Self::Greedy),
            "dp" => Ok(Self::ExactDp),
            other => Err(SeamCarveError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One seam and its total energy
#[derive(Debug, Clone, PartialEq)]
pub struct SeamSearch {
    pub seam: Seam,
    pub cost: f32,
}

/// シームを探索する機能を提供するトレイト
pub trait FindSeam {
    /// Finds one seam with the selected strategy
    ///
    /// # Errors
    ///
    /// * `SeamCarveError::InvalidImage` - the energy map is empty
    fn find_seam(&self, strategy: Strategy) -> Result<SeamSearch> {
        match strategy {
            Strategy::Greedy => self.find_seam_greedy(),
            Strategy::ExactDp => self.find_seam_optimal(),
        }
    }

    /// Greedy search starting from the lowest-energy cell of the top row
    fn find_seam_greedy(&self) -> Result<SeamSearch>;

    /// Minimum-total-energy seam by dynamic programming
    fn find_seam_optimal(&self) -> Result<SeamSearch>;
}

impl FindSeam for EnergyMap {
    fn find_seam_greedy(&self) -> Result<SeamSearch> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height, "find_seam_greedy")?;

        let mut rows = self.as_raw().chunks_exact(width as usize);
        let mut columns = Vec::with_capacity(height as usize);

        // validated non-empty above
        let first = rows.next().unwrap_or_default();
        let mut column = first_min_index(first);
        let mut cost = first[column];
        columns.push(column as u32);

        for row in rows {
            column = greedy_step(row, column);
            cost += row[column];
            columns.push(column as u32);
        }

        let seam = Seam(columns);
        debug_assert!(seam.is_valid_for(width, height));
        Ok(SeamSearch { seam, cost })
    }

    fn find_seam_optimal(&self) -> Result<SeamSearch> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height, "find_seam_optimal")?;

        let (w, h) = (width as usize, height as usize);
        let energy = self.as_raw();

        let mut cost = vec![0.0f32; w * h];
        // back[y * w + x] is the column in row y - 1 this cell continues from
        let mut back = vec![0usize; w * h];
        cost[..w].copy_from_slice(&energy[..w]);

        for y in 1..h {
            let (done, rest) = cost.split_at_mut(y * w);
            fill_row(
                &done[(y - 1) * w..],
                &energy[y * w..(y + 1) * w],
                &mut rest[..w],
                &mut back[y * w..(y + 1) * w],
            );
        }

        let last = &cost[(h - 1) * w..];
        let anchor = first_min_index(last);
        let total = last[anchor];

        let mut columns = vec![0u32; h];
        let mut column = anchor;
        for y in (0..h).rev() {
            columns[y] = column as u32;
            if y > 0 {
                column = back[y * w + column];
            }
        }

        let seam = Seam(columns);
        debug_assert!(seam.is_valid_for(width, height));
        Ok(SeamSearch { seam, cost: total })
    }
}

/// Index of the smallest value; the leftmost one wins ties
fn first_min_index(values: &[f32]) -> usize {
    values
        .iter()
        .position_min_by(|a, b| a.total_cmp(b))
        .unwrap_or(0)
}

/// Picks the next greedy column below `previous`
///
/// The cell straight below wins unless a neighbour is strictly lower; between
/// two lower neighbours the left one must be strictly lower than the right to
/// be chosen.
fn greedy_step(row: &[f32], previous: usize) -> usize {
    let last = row.len() - 1;
    let center = row[previous];

    match (previous > 0, previous < last) {
        (false, false) => previous,
        (false, true) => {
            if row[previous + 1] < center {
                previous + 1
            } else {
                previous
            }
        }
        (true, false) => {
            if row[previous - 1] < center {
                previous - 1
            } else {
                previous
            }
        }
        (true, true) => {
            let (left, right) = (row[previous - 1], row[previous + 1]);
            if center <= left && center <= right {
                previous
            } else if left < right {
                previous - 1
            } else {
                previous + 1
            }
        }
    }
}

/// Predecessor column for `x` in the previous cumulative row
///
/// Candidates are scanned left to right and only a strictly smaller cost
/// replaces the current best, so equal costs resolve diagonal-left, then
/// straight, then diagonal-right.
#[inline]
fn best_predecessor(previous: &[f32], x: usize) -> usize {
    let lo = x.saturating_sub(1);
    let hi = (x + 1).min(previous.len() - 1);
    (lo..=hi).fold(lo, |best, c| if previous[c] < previous[best] { c } else { best })
}

#[cfg(not(feature = "rayon"))]
fn fill_row(previous: &[f32], energy: &[f32], cost: &mut [f32], back: &mut [usize]) {
    for (x, (cell, pointer)) in cost.iter_mut().zip(back.iter_mut()).enumerate() {
        let parent = best_predecessor(previous, x);
        *cell = energy[x] + previous[parent];
        *pointer = parent;
    }
}

#[cfg(feature = "rayon")]
fn fill_row(previous: &[f32], energy: &[f32], cost: &mut [f32], back: &mut [usize]) {
    cost.par_iter_mut()
        .zip(back.par_iter_mut())
        .enumerate()
        .for_each(|(x, (cell, pointer))| {
            let parent = best_predecessor(previous, x);
            *cell = energy[x] + previous[parent];
            *pointer = parent;
        });
}
