use approx::assert_relative_eq;
use forecast_math::{GrowthForecaster, GrowthPoint, LinearForecaster};
use rstest::rstest;

fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| (2025 + i).to_string()).collect()
}

#[rstest]
#[case(vec![], 0)]
#[case(vec![], 3)]
#[case(vec![42.0], 2)]
#[case(vec![1.0, 2.0, 4.0, 8.0], 5)]
#[case(vec![5.0, 5.0, 5.0], 0)]
fn test_linear_output_matches_horizon(#[case] historical: Vec<f64>, #[case] horizon: usize) {
    let points = LinearForecaster::new().project(&historical, &labels(horizon));
    assert_eq!(points.len(), horizon);
}

#[rstest]
#[case(vec![], vec![])]
#[case(vec![], vec![1.0, 2.0, 3.0])]
#[case(vec![100.0], vec![])]
#[case(vec![0.0, 5.0, 10.0], vec![1.0, 2.0, 3.0])]
#[case(vec![100.0, 110.0, 130.0], vec![4.0, 6.0])]
fn test_growth_output_length(#[case] historical: Vec<f64>, #[case] scores: Vec<f64>) {
    let points = GrowthForecaster::new().project(&historical, &scores);
    assert_eq!(points.len(), scores.len());
}

#[test]
fn test_linear_empty_history_is_undetermined() {
    let points = LinearForecaster::new().project(&[], &["2025", "2026", "2027"]);

    assert_eq!(points.len(), 3);
    assert!(points.iter().all(|p| p.forecast_volume.is_none()));
    assert_eq!(points[2].label, "2027");
}

#[test]
fn test_flat_single_point_regression() {
    let points = LinearForecaster::new().project(&[42.0], &["2025", "2026"]);

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].forecast_volume, Some(42.0));
    assert_eq!(points[1].forecast_volume, Some(42.0));
}

#[test]
fn test_known_linear_fit() {
    let points = LinearForecaster::new().project(&[10.0, 20.0, 30.0, 40.0], &["2025"]);

    assert_eq!(points[0].time_index, 4);
    assert_relative_eq!(points[0].forecast_volume.unwrap(), 50.0);
}

#[test]
fn test_growth_zero_first_value_is_undetermined() {
    let points = GrowthForecaster::new().project(&[0.0, 5.0, 10.0], &[1.0, 2.0, 3.0]);

    assert_eq!(points.len(), 3);
    assert!(points.iter().all(|p| p.forecast_volume.is_none()));
    assert!(points.iter().all(|p| !p.is_computable()));
}

#[test]
fn test_growth_empty_history_is_undetermined() {
    let points = GrowthForecaster::new().project(&[], &[1.0, 2.0, 3.0]);

    assert_eq!(points.len(), 3);
    assert!(points.iter().all(|p| *p == GrowthPoint::undetermined()));
}

#[test]
fn test_growth_compounds_on_previous_forecast() {
    let points = GrowthForecaster::new().project(&[100.0, 121.0], &[10.0, 0.0]);

    assert_relative_eq!(points[0].forecast_volume.unwrap(), 145.2, epsilon = 1e-9);
    assert_relative_eq!(points[1].forecast_volume.unwrap(), 174.24, epsilon = 1e-9);
}

#[test]
fn test_growth_zero_scores_keep_cagr() {
    // (133.1 / 100)^(1/3) - 1 = 0.1 (approximately)
    let historical = [100.0, 110.0, 133.1];
    let points = GrowthForecaster::new().project(&historical, &[0.0, 0.0]);

    for point in &points {
        assert_relative_eq!(point.change.unwrap(), 0.0);
        assert_relative_eq!(point.forecast.unwrap(), 0.1, epsilon = 1e-9);
    }
    assert_relative_eq!(points[1].forecast_volume.unwrap(), 133.1 * 1.1 * 1.1, epsilon = 1e-6);
}

#[test]
fn test_forecasts_are_deterministic() {
    let historical = [12.5, 17.25, 16.0, 22.75, 30.5];
    let scores = [3.3, 7.1, 5.55];

    let a = GrowthForecaster::new().project(&historical, &scores);
    let b = GrowthForecaster::new().project(&historical, &scores);
    assert_eq!(a, b);

    let c = LinearForecaster::new().project(&historical, &labels(4));
    let d = LinearForecaster::new().project(&historical, &labels(4));
    assert_eq!(c, d);
}

#[test]
fn test_undetermined_serializes_as_null() {
    let points = GrowthForecaster::new().project(&[0.0], &[5.0]);
    let json = serde_json::to_string(&points).unwrap();

    assert_eq!(json, r#"[{"forecast":null,"change":null,"forecastVolume":null}]"#);
}
