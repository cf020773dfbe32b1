//! Score-adjusted compound growth projection
//!
//! The baseline is the compound annual growth rate of the whole history. Each
//! forecast year the running growth rate is nudged by that year's score,
//! rescaled to `0..=1`, and the volume compounds on the adjusted rate.
//!
//! The adjustment always moves the rate upward by `|rate| * score`: a growing
//! series grows faster and a shrinking series shrinks more slowly.

use crate::{finite, MathError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper end of the respondent score scale
pub const DEFAULT_SCORE_SCALE: f64 = 10.0;

/// Compound annual growth rate across the whole series.
///
/// Computed as `(last / first)^(1 / N) - 1` with `N` the number of
/// observations. Returns `None` for an empty series, a non-positive first
/// value, or any other input leaving the rate undefined.
pub fn compound_annual_growth_rate(values: &[f64]) -> Option<f64> {
    let (&first, &last) = (values.first()?, values.last()?);
    if first.is_nan() || first <= 0.0 {
        return None;
    }

    finite((last / first).powf(1.0 / values.len() as f64) - 1.0)
}

/// One projected period of a growth forecast
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    /// Growth rate applied in this period
    pub forecast: Option<f64>,
    /// Score-driven adjustment added to the previous period's rate
    pub change: Option<f64>,
    /// Projected volume at the end of the period
    pub forecast_volume: Option<f64>,
}

impl GrowthPoint {
    /// A point whose fields the math could not determine
    pub fn undetermined() -> Self {
        Self::default()
    }

    /// Whether every field carries a value
    pub fn is_computable(&self) -> bool {
        self.forecast.is_some() && self.change.is_some() && self.forecast_volume.is_some()
    }
}

/// Projects a historical series using a score-adjusted CAGR
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthForecaster {
    score_scale: f64,
}

impl Default for GrowthForecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl GrowthForecaster {
    /// Create a forecaster for scores on the default 0-10 scale
    pub fn new() -> Self {
        Self {
            score_scale: DEFAULT_SCORE_SCALE,
        }
    }

    /// Create a forecaster for scores on a `0..=scale` range
    pub fn with_score_scale(scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MathError::InvalidInput(format!(
                "Score scale must be a positive number, got {}",
                scale
            )));
        }

        Ok(Self { score_scale: scale })
    }

    /// Get the score scale
    pub fn score_scale(&self) -> f64 {
        self.score_scale
    }

    /// Project `historical` forward one period per entry in `scores`.
    ///
    /// The output always has `scores.len()` points. When the growth baseline
    /// is undefined, including for an empty history, every point is
    /// [`GrowthPoint::undetermined`].
    pub fn project(&self, historical: &[f64], scores: &[f64]) -> Vec<GrowthPoint> {
        if scores.is_empty() {
            return Vec::new();
        }

        let baseline = compound_annual_growth_rate(historical).zip(historical.last().copied());
        let Some((cagr, last)) = baseline else {
            debug!(
                observations = historical.len(),
                first = historical.first().copied(),
                "growth baseline undefined"
            );
            return vec![GrowthPoint::undetermined(); scores.len()];
        };

        let mut past_growth = cagr;
        let mut prev_volume = last;
        let mut points = Vec::with_capacity(scores.len());

        for &score in scores {
            let score_pct = score / self.score_scale;
            let change = if past_growth < 0.0 {
                past_growth.abs() * score_pct
            } else {
                past_growth * score_pct
            };
            let forecast = past_growth + change;
            let forecast_volume = prev_volume * (1.0 + forecast);

            points.push(GrowthPoint {
                forecast: finite(forecast),
                change: finite(change),
                forecast_volume: finite(forecast_volume),
            });

            past_growth = forecast;
            prev_volume = forecast_volume;
        }

        debug!(
            observations = historical.len(),
            periods = scores.len(),
            cagr,
            "growth projection"
        );

        points
    }
}
