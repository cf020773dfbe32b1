//! # Volume Forecast
//!
//! Facade over the forecasting crates:
//!
//! - [`forecast_math`]: linear and score-adjusted growth forecasts
//! - [`survey_scores`]: survey submissions and yearly score aggregation
//! - [`forecast_board`]: volume data, configuration and forecast reports
//!
//! ## Example
//!
//! ```
//! use volume_forecast_workspace::{GrowthForecaster, LinearForecaster};
//!
//! let history = [100.0, 110.0, 120.0];
//! let linear = LinearForecaster::new().project(&history, &["2025"]);
//! assert_eq!(linear[0].forecast_volume, Some(130.0));
//!
//! let growth = GrowthForecaster::new().project(&history, &[0.0]);
//! assert!(growth[0].is_computable());
//! ```

pub use forecast_board;
pub use forecast_math;
pub use survey_scores;

pub use forecast_board::{
    BoardConfig, ChartSeries, DataLoader, ForecastReport, ReportInputs, ScoreSettings,
};
pub use forecast_math::{GrowthForecaster, GrowthPoint, LinearForecaster, LinearPoint};
pub use survey_scores::{QuestionWeights, ScoreAggregator, Submission, YearlyScores};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_facade_wires_scores_into_growth() {
        let weights = QuestionWeights::new().with("q1", 1.0, survey_scores::Polarity::Positive);
        let submission =
            Submission::new("a", Utc::now(), vec!["2025".to_string()]).with_score("q1", 0, 10.0);
        let yearly = ScoreAggregator::new(weights).aggregate(&[submission]);

        let growth = GrowthForecaster::new().project(&[100.0, 100.0], &yearly.values());

        // A flat history keeps its volume whatever the score
        assert_eq!(growth[0].forecast_volume, Some(100.0));
    }
}
