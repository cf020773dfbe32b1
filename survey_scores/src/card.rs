//! Score cards: the option labels a respondent picks from, and the answer
//! records a completed card produces.

use crate::question::QuestionId;
use crate::submission::ScoreRecord;
use crate::{Result, ScoreError};
use forecast_math::DEFAULT_SCORE_SCALE;
use serde::{Deserialize, Serialize};

/// A respondent's selections for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question_id: QuestionId,
    /// Selected option label per year; `None` where nothing was picked
    #[serde(default)]
    pub selections: Vec<Option<String>>,
    #[serde(default)]
    pub skipped: bool,
}

/// Ordered option labels spread evenly over `0..=scale`
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    labels: Vec<String>,
    scale: f64,
}

impl ScoreCard {
    /// Create a card on the default 0-10 scale
    pub fn new(labels: Vec<String>) -> Result<Self> {
        Self::with_scale(labels, DEFAULT_SCORE_SCALE)
    }

    pub fn with_scale(labels: Vec<String>, scale: f64) -> Result<Self> {
        if labels.is_empty() {
            return Err(ScoreError::InvalidScoreCard(
                "A score card needs at least one option label".to_string(),
            ));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ScoreError::InvalidScoreCard(format!(
                "Scale must be a positive number, got {}",
                scale
            )));
        }

        Ok(Self { labels, scale })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Distance between adjacent options; 0 when there is a single option
    pub fn step(&self) -> f64 {
        if self.labels.len() > 1 {
            self.scale / (self.labels.len() - 1) as f64
        } else {
            0.0
        }
    }

    /// Numeric score of an option label
    pub fn score_for(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| i as f64 * self.step())
    }

    /// Answer records for a completed card.
    ///
    /// A skipped question produces a single record with no year and no score.
    /// Otherwise each year produces a record, with no score where the
    /// selection is missing or not on the card.
    pub fn records(&self, responses: &[QuestionResponse]) -> Vec<ScoreRecord> {
        let mut records = Vec::new();

        for response in responses {
            if response.skipped {
                records.push(ScoreRecord {
                    question_id: response.question_id.clone(),
                    year_index: None,
                    score: None,
                    skipped: true,
                });
                continue;
            }

            for (year_index, selection) in response.selections.iter().enumerate() {
                records.push(ScoreRecord {
                    question_id: response.question_id.clone(),
                    year_index: Some(year_index),
                    score: selection.as_deref().and_then(|label| self.score_for(label)),
                    skipped: false,
                });
            }
        }

        records
    }
}
