//! Volume data handling for forecasting
//!
//! Volume data arrives as a matrix keyed by taxonomy labels: one row per
//! region (or other hierarchy node), one column per period. Forecasts consume
//! a flat [`HistoricalSeries`] derived from one or more rows.

use crate::error::{BoardError, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Ordered historical volumes with their period labels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    periods: Vec<String>,
    values: Vec<f64>,
}

impl HistoricalSeries {
    /// Create a series from matching period labels and values
    pub fn new(periods: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if periods.len() != values.len() {
            return Err(BoardError::DataError(format!(
                "Periods length ({}) doesn't match values length ({})",
                periods.len(),
                values.len()
            )));
        }

        Ok(Self { periods, values })
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(period, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.periods
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Period label key: numeric labels first, in numeric order, then the rest as text
#[derive(Debug, Clone, PartialEq, Eq)]
struct PeriodKey(String);

impl PeriodKey {
    fn sort_key(&self) -> (bool, Option<i64>, &str) {
        let number = self.0.trim().parse::<i64>().ok();
        (number.is_none(), number, &self.0)
    }
}

impl Ord for PeriodKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for PeriodKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Interpret an uploaded cell as a volume.
///
/// Thousands separators are stripped. Empty or unparsable cells are 0.
pub fn clean_cell(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|&c| c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0.0;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!(cell = raw, "unparsable volume cell, using 0");
            0.0
        }
    }
}

fn clean_value(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => clean_cell(s),
        _ => 0.0,
    }
}

/// One row of a volume matrix
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeRow {
    pub label: String,
    cells: BTreeMap<PeriodKey, f64>,
}

impl VolumeRow {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, period: impl Into<String>, value: f64) {
        self.cells.insert(PeriodKey(period.into()), value);
    }

    pub fn get(&self, period: &str) -> Option<f64> {
        self.cells.get(&PeriodKey(period.to_string())).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in ascending period order
    pub fn series(&self) -> HistoricalSeries {
        HistoricalSeries {
            periods: self.cells.keys().map(|k| k.0.clone()).collect(),
            values: self.cells.values().copied().collect(),
        }
    }
}

/// Row-by-period matrix of volumes, rows kept in upload order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeMatrix {
    rows: Vec<VolumeRow>,
}

impl VolumeMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[VolumeRow] {
        &self.rows
    }

    pub fn row(&self, label: &str) -> Option<&VolumeRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    pub fn first_row(&self) -> Option<&VolumeRow> {
        self.rows.first()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct column labels across all rows, in period order
    pub fn columns(&self) -> Vec<String> {
        let columns: BTreeSet<&PeriodKey> = self.rows.iter().flat_map(|r| r.cells.keys()).collect();
        columns.into_iter().map(|k| k.0.clone()).collect()
    }

    /// Set a cell, creating the row if needed
    pub fn set(&mut self, row: &str, period: &str, value: f64) {
        match self.rows.iter_mut().find(|r| r.label == row) {
            Some(existing) => existing.set(period, value),
            None => {
                let mut new_row = VolumeRow::new(row);
                new_row.set(period, value);
                self.rows.push(new_row);
            }
        }
    }

    /// Series of a single row
    pub fn row_series(&self, label: &str) -> Result<HistoricalSeries> {
        self.row(label)
            .map(VolumeRow::series)
            .ok_or_else(|| BoardError::UnknownRow(label.to_string()))
    }

    /// Per-period sum across the selected rows.
    ///
    /// Periods are the union of the selected rows' periods; a row missing a
    /// period contributes 0 to it.
    pub fn summed_series<S: AsRef<str>>(&self, labels: &[S]) -> Result<HistoricalSeries> {
        let mut totals: BTreeMap<PeriodKey, f64> = BTreeMap::new();

        for label in labels {
            let row = self
                .row(label.as_ref())
                .ok_or_else(|| BoardError::UnknownRow(label.as_ref().to_string()))?;
            for (period, value) in &row.cells {
                *totals.entry(period.clone()).or_insert(0.0) += value;
            }
        }

        Ok(HistoricalSeries {
            periods: totals.keys().map(|k| k.0.clone()).collect(),
            values: totals.into_values().collect(),
        })
    }

    /// Check that every expected row and column label is present
    pub fn validate_labels<S: AsRef<str>>(
        &self,
        expected_rows: &[S],
        expected_columns: &[S],
    ) -> Result<()> {
        let columns = self.columns();
        let missing_rows: Vec<String> = expected_rows
            .iter()
            .map(|label| label.as_ref())
            .filter(|label| self.row(label).is_none())
            .map(str::to_string)
            .collect();
        let missing_columns: Vec<String> = expected_columns
            .iter()
            .map(|label| label.as_ref())
            .filter(|label| !columns.iter().any(|c| c == label))
            .map(str::to_string)
            .collect();

        if missing_rows.is_empty() && missing_columns.is_empty() {
            Ok(())
        } else {
            Err(BoardError::LabelMismatch {
                missing_rows,
                missing_columns,
            })
        }
    }

    /// Overwrite this matrix's cells with every cell of `other`
    pub fn merge(&mut self, other: &VolumeMatrix) {
        for row in &other.rows {
            for (period, value) in &row.cells {
                self.set(&row.label, &period.0, *value);
            }
        }
    }
}

impl Serialize for VolumeMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            let cells: BTreeMap<&str, f64> =
                row.cells.iter().map(|(k, v)| (k.0.as_str(), *v)).collect();
            map.serialize_entry(&row.label, &cells)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VolumeMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MatrixVisitor;

        impl<'de> Visitor<'de> for MatrixVisitor {
            type Value = VolumeMatrix;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of rows, each an object of period cells")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut matrix = VolumeMatrix::new();
                while let Some((label, cells)) =
                    access.next_entry::<String, BTreeMap<String, Value>>()?
                {
                    // Rows without any period carry nothing to forecast.
                    if cells.is_empty() {
                        continue;
                    }
                    for (period, raw) in &cells {
                        matrix.set(&label, period, clean_value(raw));
                    }
                }
                Ok(matrix)
            }
        }

        deserializer.deserialize_map(MatrixVisitor)
    }
}

/// Data loader for volume matrices
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a volume matrix from a CSV file
    pub fn matrix_from_csv<P: AsRef<Path>>(path: P) -> Result<VolumeMatrix> {
        let file = File::open(path)?;
        Self::matrix_from_reader(file)
    }

    /// Read a volume matrix from CSV data.
    ///
    /// The header row holds a corner cell followed by the column labels; each
    /// following record holds a row label followed by its cells.
    pub fn matrix_from_reader<R: Read>(reader: R) -> Result<VolumeMatrix> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .skip(1)
            .map(str::to_string)
            .collect();
        if columns.is_empty() {
            return Err(BoardError::DataError(
                "Invalid volume sheet: no column labels in header".to_string(),
            ));
        }

        let mut matrix = VolumeMatrix::new();
        for record in csv_reader.records() {
            let record = record?;
            let Some(label) = record.get(0).filter(|l| !l.is_empty()) else {
                continue;
            };
            for (column, cell) in columns.iter().zip(record.iter().skip(1)) {
                matrix.set(label, column, clean_cell(cell));
            }
        }

        if matrix.is_empty() {
            return Err(BoardError::DataError(
                "Invalid volume sheet: no data rows".to_string(),
            ));
        }

        debug!(rows = matrix.rows().len(), columns = columns.len(), "loaded volume matrix");
        Ok(matrix)
    }

    /// Load a volume matrix from a JSON file
    pub fn matrix_from_json_file<P: AsRef<Path>>(path: P) -> Result<VolumeMatrix> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Parse a volume matrix from its JSON form
    pub fn matrix_from_json(json: &str) -> Result<VolumeMatrix> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1,234", 1234.0)]
    #[case(" 56.5 ", 56.5)]
    #[case("", 0.0)]
    #[case("n/a", 0.0)]
    #[case("-7", -7.0)]
    #[case("1,000,000", 1_000_000.0)]
    fn test_clean_cell(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(clean_cell(raw), expected);
    }

    #[test]
    fn test_period_order_is_numeric() {
        let mut row = VolumeRow::new("PERU");
        row.set("2021", 3.0);
        row.set("999", 1.0);
        row.set("2019", 2.0);

        let series = row.series();
        assert_eq!(series.periods(), &["999", "2019", "2021"]);
        assert_eq!(series.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_mixed_period_labels_do_not_duplicate() {
        let mut matrix = VolumeMatrix::new();
        for period in ["9", "10", "5a", "9", "10", "5a"] {
            matrix.set("R", period, 1.0);
        }

        assert_eq!(matrix.columns(), vec!["9", "10", "5a"]);
        assert_eq!(matrix.row("R").unwrap().series().len(), 3);

        let (a, b, c) = (
            PeriodKey("9".to_string()),
            PeriodKey("10".to_string()),
            PeriodKey("5a".to_string()),
        );
        assert!(a < b && b < c && a < c);
    }

    #[test]
    fn test_historical_series_length_check() {
        assert!(HistoricalSeries::new(vec!["2020".to_string()], vec![]).is_err());
    }

    #[test]
    fn test_json_keeps_row_order_and_drops_empty_rows() {
        let matrix = DataLoader::matrix_from_json(
            r#"{"CHILE": {"2020": "1,500", "2019": 1000}, "EMPTY": {}, "BRAZIL": {"2019": null}}"#,
        )
        .unwrap();

        let labels: Vec<&str> = matrix.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["CHILE", "BRAZIL"]);
        assert_eq!(matrix.row("CHILE").unwrap().get("2020"), Some(1500.0));
        assert_eq!(matrix.row("BRAZIL").unwrap().get("2019"), Some(0.0));
    }

    #[test]
    fn test_merge_overwrites_and_adds() {
        let mut base = VolumeMatrix::new();
        base.set("PERU", "2020", 1.0);
        base.set("PERU", "2021", 2.0);

        let mut update = VolumeMatrix::new();
        update.set("PERU", "2021", 5.0);
        update.set("CHILE", "2021", 7.0);

        base.merge(&update);

        assert_eq!(base.row_series("PERU").unwrap().values(), &[1.0, 5.0]);
        assert_eq!(base.row_series("CHILE").unwrap().values(), &[7.0]);
    }
}
