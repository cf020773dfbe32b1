//! Respondent submissions and the store records they are built from

use crate::question::QuestionId;
use crate::{RawId, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Identifier of a submission
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SubmissionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| Self(raw.into_string()))
    }
}

impl From<&str> for SubmissionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SubmissionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for SubmissionId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A respondent's answer to one question
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Answer {
    /// A score given for one year of the horizon
    Recorded { year_index: usize, score: f64 },
    /// The respondent declined the question for every year
    Skipped,
}

/// An answer tied to its question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    pub question_id: QuestionId,
    pub answer: Answer,
}

/// One respondent's complete set of answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub created_at: DateTime<Utc>,
    /// Period labels the year indexes point into
    pub periods: Vec<String>,
    pub answers: Vec<ScoredAnswer>,
}

impl Submission {
    /// Create a submission with no answers
    pub fn new(
        id: impl Into<SubmissionId>,
        created_at: DateTime<Utc>,
        periods: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            periods,
            answers: Vec::new(),
        }
    }

    /// Build a submission from its store record
    pub fn from_record(record: &SubmissionRecord, periods: &[String]) -> Self {
        Self {
            id: record.id.clone(),
            created_at: record.created_at,
            periods: periods.to_vec(),
            answers: record.scores.iter().filter_map(ScoreRecord::to_answer).collect(),
        }
    }

    /// Add a recorded score
    pub fn with_score(
        mut self,
        question_id: impl Into<QuestionId>,
        year_index: usize,
        score: f64,
    ) -> Self {
        self.answers.push(ScoredAnswer {
            question_id: question_id.into(),
            answer: Answer::Recorded { year_index, score },
        });
        self
    }

    /// Mark a question as skipped
    pub fn with_skipped(mut self, question_id: impl Into<QuestionId>) -> Self {
        self.answers.push(ScoredAnswer {
            question_id: question_id.into(),
            answer: Answer::Skipped,
        });
        self
    }

    /// Index of the answers by question and year
    pub fn score_grid(&self) -> ScoreGrid<'_> {
        let skipped: HashSet<&QuestionId> = self
            .answers
            .iter()
            .filter(|a| matches!(a.answer, Answer::Skipped))
            .map(|a| &a.question_id)
            .collect();

        let mut scores = HashMap::new();
        for answer in &self.answers {
            if let Answer::Recorded { year_index, score } = answer.answer {
                if !skipped.contains(&answer.question_id) {
                    scores.insert((&answer.question_id, year_index), score);
                }
            }
        }

        ScoreGrid { scores }
    }
}

/// Scores of one submission by question and year
#[derive(Debug, Clone)]
pub struct ScoreGrid<'a> {
    scores: HashMap<(&'a QuestionId, usize), f64>,
}

impl ScoreGrid<'_> {
    /// Score for a question in a year. Absent, skipped and non-finite scores are 0.
    pub fn score(&self, question_id: &QuestionId, year_index: usize) -> f64 {
        self.scores
            .get(&(question_id, year_index))
            .copied()
            .filter(|s| s.is_finite())
            .unwrap_or(0.0)
    }
}

/// One answer as stored by the submissions store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub question_id: QuestionId,
    #[serde(default)]
    pub year_index: Option<usize>,
    #[serde(default, alias = "scoreValue")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "loose_bool")]
    pub skipped: bool,
}

impl ScoreRecord {
    /// Typed answer for this record; `None` when nothing was scored.
    pub fn to_answer(&self) -> Option<ScoredAnswer> {
        let answer = if self.skipped {
            Answer::Skipped
        } else {
            Answer::Recorded {
                year_index: self.year_index?,
                score: self.score?,
            }
        };

        Some(ScoredAnswer {
            question_id: self.question_id.clone(),
            answer,
        })
    }
}

/// A submission as stored: identity plus its flat answer records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub scores: Vec<ScoreRecord>,
}

/// One row of the submissions-joined-with-scores listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRow {
    pub submission_id: SubmissionId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: ScoreRecord,
}

/// Group joined rows into submission records, in order of first appearance.
pub fn group_score_rows(rows: &[ScoreRow]) -> Vec<SubmissionRecord> {
    let mut positions: HashMap<&SubmissionId, usize> = HashMap::new();
    let mut records: Vec<SubmissionRecord> = Vec::new();

    for row in rows {
        let position = *positions.entry(&row.submission_id).or_insert_with(|| {
            records.push(SubmissionRecord {
                id: row.submission_id.clone(),
                created_at: row.created_at,
                scores: Vec::new(),
            });
            records.len() - 1
        });
        records[position].scores.push(row.record.clone());
    }

    records
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SubmissionsPayload {
    Wrapped { submissions: Vec<SubmissionRecord> },
    Bare(Vec<SubmissionRecord>),
}

/// Parse submission records from the store's JSON, either a bare array or
/// an object with a `submissions` array.
pub fn parse_submissions(json: &str) -> Result<Vec<SubmissionRecord>> {
    let payload: SubmissionsPayload = serde_json::from_str(json)?;
    Ok(match payload {
        SubmissionsPayload::Wrapped { submissions } => submissions,
        SubmissionsPayload::Bare(submissions) => submissions,
    })
}

// The relational store reports booleans as 0/1.
fn loose_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Null(()),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
        Flag::Null(()) => false,
    })
}
