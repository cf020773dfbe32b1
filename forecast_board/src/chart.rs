//! Chart-ready series combining history with both forecast branches

use crate::data::HistoricalSeries;
use forecast_math::{GrowthPoint, LinearPoint};
use serde::{Deserialize, Serialize};

/// One period of a combined chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow {
    pub period: String,
    /// Historical volume, absent on forecast rows
    pub value: Option<f64>,
    pub forecast_linear: Option<f64>,
    pub forecast_score: Option<f64>,
}

/// Historical rows followed by one row per horizon period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartSeries {
    rows: Vec<ChartRow>,
}

impl ChartSeries {
    /// Merge history and forecasts into one period-indexed series.
    ///
    /// The last historical row also carries its value in both forecast
    /// columns so the forecast lines start where the history ends. Forecast
    /// rows follow `horizon`; a branch with no point (or an undetermined one)
    /// for a period leaves that column empty. An empty history yields an empty
    /// series.
    pub fn combine(
        historical: &HistoricalSeries,
        horizon: &[String],
        linear: &[LinearPoint],
        growth: &[GrowthPoint],
    ) -> Self {
        if historical.is_empty() {
            return Self::default();
        }

        let last = historical.len() - 1;
        let mut rows: Vec<ChartRow> = historical
            .iter()
            .enumerate()
            .map(|(i, (period, value))| {
                let bridge = (i == last).then_some(value);
                ChartRow {
                    period: period.to_string(),
                    value: Some(value),
                    forecast_linear: bridge,
                    forecast_score: bridge,
                }
            })
            .collect();

        rows.extend(horizon.iter().enumerate().map(|(i, period)| ChartRow {
            period: period.clone(),
            value: None,
            forecast_linear: linear.get(i).and_then(|p| p.forecast_volume),
            forecast_score: growth.get(i).and_then(|p| p.forecast_volume),
        }));

        Self { rows }
    }

    pub fn rows(&self) -> &[ChartRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_gives_empty_chart() {
        let chart =
            ChartSeries::combine(&HistoricalSeries::default(), &["2025".to_string()], &[], &[]);
        assert!(chart.is_empty());
    }

    #[test]
    fn test_missing_branch_is_null() {
        let history = HistoricalSeries::new(vec!["2024".to_string()], vec![10.0]).unwrap();
        let chart = ChartSeries::combine(&history, &["2025".to_string()], &[], &[]);

        assert_eq!(chart.len(), 2);
        assert_eq!(chart.rows()[0].forecast_linear, Some(10.0));
        assert_eq!(chart.rows()[1].forecast_linear, None);
        assert_eq!(chart.rows()[1].forecast_score, None);
        assert_eq!(chart.rows()[1].value, None);
    }
}
