//! Least-squares trend lines over reading tables.
//!
//! The independent variable is the row index (0-based, chronological), the
//! dependent variable the reading value. Slope and intercept use the
//! closed-form ordinary least-squares solution:
//!
//! ```text
//! slope     = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)
//! intercept = (Σy − slope·Σx) / n
//! ```
//!
//! All arithmetic is `f64`.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::snapshot::ReadingTable;

/// Slopes smaller than this (per row) count as flat.
pub const FLAT_SLOPE_TOLERANCE: f64 = 1e-3;

/// Fitted line aligned 1:1 with the rows it was fitted on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendResult {
    /// Change in value per row.
    pub slope: f64,
    /// Fitted value at row 0.
    pub intercept: f64,
    /// `slope * i + intercept` for every row `i`.
    pub fitted_values: Vec<f64>,
    /// Coefficient of determination; `None` when every value is equal.
    pub r_squared: Option<f64>,
}

/// Direction of a fitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Values are increasing.
    Rising,
    /// Values are decreasing.
    Falling,
    /// Slope within [`FLAT_SLOPE_TOLERANCE`].
    Flat,
}

impl TrendResult {
    /// Evaluates the line at row `x`.
    #[must_use]
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Classifies the slope.
    #[must_use]
    pub fn direction(&self) -> Trend {
        if self.slope > FLAT_SLOPE_TOLERANCE {
            Trend::Rising
        } else if self.slope < -FLAT_SLOPE_TOLERANCE {
            Trend::Falling
        } else {
            Trend::Flat
        }
    }
}

/// Fits [`TrendResult`]s. Holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendFitter;

impl TrendFitter {
    /// Fits a line over the table's `value` column.
    ///
    /// # Errors
    ///
    /// - [`Error::InsufficientData`] with fewer than two rows
    /// - [`Error::DegenerateFit`] if the system has no unique solution
    pub fn fit(table: &ReadingTable) -> Result<TrendResult> {
        Self::fit_values(&table.values())
    }

    /// Fits a line over raw values indexed 0..n.
    ///
    /// # Errors
    ///
    /// Same as [`TrendFitter::fit`].
    pub fn fit_values(ys: &[f64]) -> Result<TrendResult> {
        let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
        least_squares(&xs, ys)
    }
}

fn least_squares(xs: &[f64], ys: &[f64]) -> Result<TrendResult> {
    debug_assert_eq!(xs.len(), ys.len());

    let rows = ys.len();
    if rows < 2 {
        return Err(Error::InsufficientData { rows });
    }

    let n = rows as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_xx: f64 = xs.iter().map(|x| x * x).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(Error::DegenerateFit);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(Error::DegenerateFit);
    }

    let fitted_values: Vec<f64> = xs.iter().map(|x| slope * x + intercept).collect();

    let mean_y = sum_y / n;
    let ss_tot: f64 = ys.iter().map(|y| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = ys
        .iter()
        .zip(&fitted_values)
        .map(|(y, f)| (y - f).powi(2))
        .sum();
    let r_squared = (ss_tot > f64::EPSILON).then(|| 1.0 - ss_res / ss_tot);

    Ok(TrendResult {
        slope,
        intercept,
        fitted_values,
        r_squared,
    })
}
