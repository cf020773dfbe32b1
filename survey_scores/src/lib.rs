//! # Survey Scores
//!
//! `survey_scores` turns respondent submissions into one averaged score per
//! forecast year.
//!
//! Each submission answers a set of weighted questions for every year of the
//! forecast horizon. A question is either *positive* (its weighted score adds
//! to the year's total) or *negative* (it subtracts). The [`ScoreAggregator`]
//! averages the signed totals across all submissions.
//!
//! ## Usage Example
//!
//! ```
//! use chrono::Utc;
//! use survey_scores::{Polarity, QuestionWeights, ScoreAggregator, Submission};
//!
//! let weights = QuestionWeights::new()
//!     .with("demand", 0.5, Polarity::Positive)
//!     .with("cost", 0.25, Polarity::Negative);
//!
//! let periods = vec!["2025".to_string(), "2026".to_string()];
//! let submission = Submission::new("s1", Utc::now(), periods)
//!     .with_score("demand", 0, 8.0)
//!     .with_score("cost", 0, 4.0)
//!     .with_skipped("cost");
//!
//! let yearly = ScoreAggregator::new(weights).aggregate(&[submission]);
//! assert_eq!(yearly.values(), vec![4.0, 0.0]);
//! ```

use serde::Deserialize;
use thiserror::Error;

mod aggregate;
mod card;
mod question;
mod submission;

pub use aggregate::{ScoreAggregator, YearScore, YearlyScores, AVERAGE_DECIMALS};
pub use card::{QuestionResponse, ScoreCard};
pub use question::{Polarity, QuestionId, QuestionRecord, QuestionWeight, QuestionWeights};
pub use submission::{
    group_score_rows, parse_submissions, Answer, ScoreGrid, ScoreRecord, ScoreRow, ScoredAnswer,
    Submission, SubmissionId, SubmissionRecord,
};

/// Errors that can occur while preparing survey data
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Invalid score card: {0}")]
    InvalidScoreCard(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for survey score operations
pub type Result<T> = std::result::Result<T, ScoreError>;

/// Identifier as delivered by the stores, which emit either numbers or strings
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    pub(crate) fn into_string(self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}
