//! End-to-end forecast report: scores, both forecast branches and the chart.

use crate::chart::ChartSeries;
use crate::config::{BoardConfig, ScoreSettings};
use crate::data::{HistoricalSeries, VolumeMatrix};
use crate::error::{BoardError, Result};
use forecast_math::{GrowthPoint, LinearFit, LinearForecaster, LinearPoint};
use serde::{Deserialize, Serialize};
use survey_scores::{
    group_score_rows, parse_submissions, QuestionRecord, QuestionWeights, ScoreAggregator, ScoreRow,
    Submission, SubmissionRecord, YearlyScores,
};
use tracing::{debug, info};

/// Everything a report is built from
#[derive(Debug, Clone, Default)]
pub struct ReportInputs {
    pub volumes: VolumeMatrix,
    /// Matrix rows to forecast; their volumes are summed per period.
    /// Empty selects the first row.
    pub rows: Vec<String>,
    pub questions: Vec<QuestionRecord>,
    pub submissions: Vec<SubmissionRecord>,
    pub settings: ScoreSettings,
}

/// Parse submissions from either the grouped store payload or the flat
/// submission/score join listing.
pub fn load_submissions(json: &str) -> Result<Vec<SubmissionRecord>> {
    match parse_submissions(json) {
        Ok(records) => Ok(records),
        Err(grouped_err) => {
            let rows: Vec<ScoreRow> = serde_json::from_str(json).map_err(|_| grouped_err)?;
            Ok(group_score_rows(&rows))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub rows: Vec<String>,
    pub historical: HistoricalSeries,
    pub yearly_scores: YearlyScores,
    pub fit: Option<LinearFit>,
    pub linear: Vec<LinearPoint>,
    pub growth: Vec<GrowthPoint>,
    pub chart: ChartSeries,
}

impl ForecastReport {
    pub fn build(inputs: &ReportInputs, config: &BoardConfig) -> Result<Self> {
        let rows = Self::selected_rows(inputs)?;
        let historical = inputs.volumes.summed_series(rows.as_slice())?;
        let horizon = inputs.settings.year_names.as_slice();

        let weights = QuestionWeights::from_records(&inputs.questions);
        let submissions: Vec<Submission> = inputs
            .submissions
            .iter()
            .map(|record| Submission::from_record(record, horizon))
            .collect();
        let yearly_scores = ScoreAggregator::new(weights).aggregate(&submissions);

        let fit = LinearFit::fit(historical.values());
        let linear = LinearForecaster::new().project(historical.values(), horizon);
        let growth = config
            .growth_forecaster()?
            .project(historical.values(), &yearly_scores.values());

        if growth.iter().any(|p| !p.is_computable()) {
            debug!("Growth forecast has undetermined points for rows {:?}", rows);
        }

        let chart = ChartSeries::combine(&historical, horizon, &linear, &growth);
        info!(
            "Built forecast report: {} historical periods, {} horizon periods, {} submissions",
            historical.len(),
            horizon.len(),
            submissions.len()
        );

        Ok(Self {
            rows,
            historical,
            yearly_scores,
            fit,
            linear,
            growth,
            chart,
        })
    }

    fn selected_rows(inputs: &ReportInputs) -> Result<Vec<String>> {
        if !inputs.rows.is_empty() {
            return Ok(inputs.rows.clone());
        }
        inputs
            .volumes
            .first_row()
            .map(|row| vec![row.label.clone()])
            .ok_or_else(|| BoardError::DataError("Volume matrix has no rows".to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
