use forecast_board::{ChartSeries, HistoricalSeries};
use forecast_math::{GrowthForecaster, GrowthPoint, LinearForecaster};
use pretty_assertions::assert_eq;
use serde_json::json;

fn history() -> HistoricalSeries {
    HistoricalSeries::new(
        vec!["2022".to_string(), "2023".to_string(), "2024".to_string()],
        vec![10.0, 20.0, 30.0],
    )
    .unwrap()
}

fn horizon() -> Vec<String> {
    vec!["2025".to_string(), "2026".to_string()]
}

#[test]
fn test_last_historical_row_bridges_both_lines() {
    let history = history();
    let linear = LinearForecaster::new().project(history.values(), &horizon());
    let growth = GrowthForecaster::new().project(history.values(), &[0.0, 0.0]);

    let chart = ChartSeries::combine(&history, &horizon(), &linear, &growth);
    let rows = chart.rows();

    assert_eq!(chart.len(), 5);
    assert_eq!(rows[0].forecast_linear, None);
    assert_eq!(rows[1].forecast_score, None);
    assert_eq!(rows[2].value, Some(30.0));
    assert_eq!(rows[2].forecast_linear, Some(30.0));
    assert_eq!(rows[2].forecast_score, Some(30.0));

    assert_eq!(rows[3].period, "2025");
    assert_eq!(rows[3].value, None);
    assert_eq!(rows[3].forecast_linear, Some(40.0));
    assert_eq!(rows[4].forecast_linear, Some(50.0));
    assert!(rows[3].forecast_score.is_some());
}

#[test]
fn test_undetermined_growth_leaves_column_empty() {
    let history = HistoricalSeries::new(
        vec!["2023".to_string(), "2024".to_string()],
        vec![0.0, 5.0],
    )
    .unwrap();
    let growth = vec![GrowthPoint::undetermined(); 2];

    let chart = ChartSeries::combine(&history, &horizon(), &[], &growth);

    assert!(chart.rows()[2..].iter().all(|row| row.forecast_score.is_none()));
    assert!(chart.rows()[2..].iter().all(|row| row.forecast_linear.is_none()));
}

#[test]
fn test_short_forecast_branch_is_padded() {
    let history = history();
    let linear = LinearForecaster::new().project(history.values(), &["2025"]);

    let chart = ChartSeries::combine(&history, &horizon(), &linear, &[]);

    assert_eq!(chart.len(), 5);
    assert_eq!(chart.rows()[3].forecast_linear, Some(40.0));
    assert_eq!(chart.rows()[4].forecast_linear, None);
}

#[test]
fn test_chart_json_shape() {
    let history = HistoricalSeries::new(vec!["2024".to_string()], vec![7.0]).unwrap();
    let chart = ChartSeries::combine(&history, &["2025".to_string()], &[], &[]);

    assert_eq!(
        serde_json::to_value(&chart).unwrap(),
        json!([
            {"period": "2024", "value": 7.0, "forecastLinear": 7.0, "forecastScore": 7.0},
            {"period": "2025", "value": null, "forecastLinear": null, "forecastScore": null}
        ])
    );
}
