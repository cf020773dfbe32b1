//! # Forecast Math
//!
//! Numeric projections for yearly volume series.
//! This crate provides the two forecasting procedures used by the dashboard:
//!
//! - [`LinearForecaster`]: ordinary least-squares trend extrapolation
//! - [`GrowthForecaster`]: compound-growth projection adjusted each year by a
//!   respondent score
//!
//! Neither forecaster fails on degenerate input. Undefined math (an empty
//! history, a non-positive starting volume) is reported as `None` inside the
//! normal output, so the output always has the promised length.
//!
//! ```
//! use forecast_math::{GrowthForecaster, LinearForecaster};
//!
//! let linear = LinearForecaster::new().project(&[10.0, 20.0, 30.0, 40.0], &["2025"]);
//! assert_eq!(linear[0].forecast_volume, Some(50.0));
//!
//! let growth = GrowthForecaster::new().project(&[0.0, 5.0], &[3.0, 4.0]);
//! assert_eq!(growth.len(), 2);
//! assert!(growth.iter().all(|p| p.forecast_volume.is_none()));
//! ```

use thiserror::Error;

pub mod growth;
pub mod linear;
pub mod rounding;

pub use growth::{compound_annual_growth_rate, GrowthForecaster, GrowthPoint, DEFAULT_SCORE_SCALE};
pub use linear::{LinearFit, LinearForecaster, LinearPoint};
pub use rounding::round_to;

/// Errors raised while configuring a forecaster
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for forecast math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Keep a computed value only if it is a real number.
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
