//! Linear regression trend projection
//!
//! Fits `value = intercept + slope * t` over a historical series, where `t` is
//! the zero-based position of each observation, and extrapolates the line over
//! a horizon of labelled future periods.

use crate::finite;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordinary least-squares line fitted over a series indexed by position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    intercept: f64,
    slope: f64,
    n_observations: usize,
    r_squared: Option<f64>,
}

impl LinearFit {
    /// Fit a line over `values`, using each value's position as its time index.
    ///
    /// Returns `None` for an empty series. A single observation yields a flat
    /// line through that value.
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let x_mean = (values.len() - 1) as f64 / 2.0;
        let y_mean = values.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let x = i as f64;
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        // Only a single observation leaves every x on the mean.
        let slope = if denominator > 0.0 {
            numerator / denominator
        } else {
            0.0
        };
        let intercept = y_mean - slope * x_mean;

        Some(Self {
            intercept,
            slope,
            n_observations: values.len(),
            r_squared: Self::coefficient_of_determination(values, intercept, slope, y_mean),
        })
    }

    fn coefficient_of_determination(
        values: &[f64],
        intercept: f64,
        slope: f64,
        y_mean: f64,
    ) -> Option<f64> {
        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let y_pred = intercept + slope * i as f64;
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - y_pred).powi(2);
        }

        if ss_total.abs() < 1e-10 {
            return None;
        }

        finite(1.0 - ss_residual / ss_total)
    }

    /// Y-intercept at `t = 0`
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Change in value per period
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Number of observations the line was fitted over
    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    /// R-squared of the fit, or `None` when the series has no variance
    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }

    /// Value of the fitted line at time index `t`
    pub fn value_at(&self, t: usize) -> f64 {
        self.intercept + self.slope * t as f64
    }
}

/// One projected period of a linear forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearPoint {
    /// Horizon label of the period
    pub label: String,
    /// Time index on the regression axis (`N + j`)
    pub time_index: usize,
    /// Projected volume, `None` when no line could be fitted
    pub forecast_volume: Option<f64>,
}

/// Projects a historical series forward along its least-squares line
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearForecaster;

impl LinearForecaster {
    /// Create a new linear forecaster
    pub fn new() -> Self {
        Self
    }

    /// Project `historical` over every label in `horizon_labels`.
    ///
    /// The output has exactly one point per label. With an empty history every
    /// point is returned with `forecast_volume: None`.
    pub fn project<S: AsRef<str>>(
        &self,
        historical: &[f64],
        horizon_labels: &[S],
    ) -> Vec<LinearPoint> {
        let fit = LinearFit::fit(historical);
        let n = historical.len();

        debug!(
            observations = n,
            horizon = horizon_labels.len(),
            slope = fit.map(|f| f.slope()),
            "linear projection"
        );

        horizon_labels
            .iter()
            .enumerate()
            .map(|(j, label)| {
                let time_index = n + j;
                LinearPoint {
                    label: label.as_ref().to_string(),
                    time_index,
                    forecast_volume: fit.and_then(|f| finite(f.value_at(time_index))),
                }
            })
            .collect()
    }
}
