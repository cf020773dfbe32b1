//! Yearly averaging of signed weighted scores

use crate::question::{Polarity, QuestionWeights};
use crate::submission::{ScoreGrid, Submission};
use forecast_math::round_to;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Decimal places kept in yearly averages
pub const AVERAGE_DECIMALS: u32 = 2;

/// Averaged score of one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearScore {
    pub period: String,
    pub average: f64,
}

/// Output of [`ScoreAggregator::aggregate`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyScores {
    pub periods: Vec<String>,
    pub averages: Vec<YearScore>,
}

impl YearlyScores {
    /// The averages as a plain series, ready for a growth forecast
    pub fn values(&self) -> Vec<f64> {
        self.averages.iter().map(|a| a.average).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }
}

/// Combines submissions into one averaged score per period
#[derive(Debug, Clone, Default)]
pub struct ScoreAggregator {
    weights: QuestionWeights,
}

impl ScoreAggregator {
    pub fn new(weights: QuestionWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &QuestionWeights {
        &self.weights
    }

    /// Sum of `score * weight` over the questions of one polarity
    fn weighted_sum(&self, grid: &ScoreGrid<'_>, polarity: Polarity, year_index: usize) -> f64 {
        self.weights
            .with_polarity(polarity)
            .map(|q| grid.score(&q.id, year_index) * q.weight)
            .sum()
    }

    fn signed_total(&self, grid: &ScoreGrid<'_>, year_index: usize) -> f64 {
        let positive = self.weighted_sum(grid, Polarity::Positive, year_index);
        let negative = self.weighted_sum(grid, Polarity::Negative, year_index);
        positive - negative
    }

    /// Signed weighted total of one submission for each of its own periods
    pub fn submission_totals(&self, submission: &Submission) -> Vec<f64> {
        let grid = submission.score_grid();
        (0..submission.periods.len())
            .map(|i| self.signed_total(&grid, i))
            .collect()
    }

    /// Average the signed totals of all submissions per period.
    ///
    /// Periods come from the first submission. An empty input yields empty
    /// periods and averages.
    pub fn aggregate(&self, submissions: &[Submission]) -> YearlyScores {
        let Some(first) = submissions.first() else {
            return YearlyScores::default();
        };

        let periods = first.periods.clone();
        let grids: Vec<ScoreGrid<'_>> = submissions.iter().map(Submission::score_grid).collect();
        let count = submissions.len() as f64;

        let averages = periods
            .iter()
            .enumerate()
            .map(|(i, period)| {
                let total: f64 = grids.iter().map(|grid| self.signed_total(grid, i)).sum();
                YearScore {
                    period: period.clone(),
                    average: round_to(total / count, AVERAGE_DECIMALS),
                }
            })
            .collect();

        debug!(
            submissions = submissions.len(),
            periods = periods.len(),
            questions = self.weights.len(),
            "aggregated yearly scores"
        );

        YearlyScores { periods, averages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn periods() -> Vec<String> {
        vec!["2025".to_string(), "2026".to_string()]
    }

    #[test]
    fn test_empty_input() {
        let yearly = ScoreAggregator::default().aggregate(&[]);
        assert!(yearly.periods.is_empty());
        assert!(yearly.averages.is_empty());
    }

    #[test]
    fn test_negative_questions_subtract() {
        let weights = QuestionWeights::new()
            .with("up", 1.0, Polarity::Positive)
            .with("down", 0.5, Polarity::Negative);
        let submission = Submission::new("a", Utc::now(), periods())
            .with_score("up", 0, 6.0)
            .with_score("down", 0, 4.0)
            .with_score("down", 1, 10.0);

        let aggregator = ScoreAggregator::new(weights);
        assert_eq!(aggregator.submission_totals(&submission), vec![4.0, -5.0]);
    }

    #[test]
    fn test_unknown_questions_ignored() {
        let weights = QuestionWeights::new().with("up", 1.0, Polarity::Positive);
        let submission = Submission::new("a", Utc::now(), periods())
            .with_score("stray", 0, 9.0)
            .with_score("up", 5, 9.0);

        let yearly = ScoreAggregator::new(weights).aggregate(&[submission]);
        assert_eq!(yearly.values(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_average_is_rounded() {
        let weights = QuestionWeights::new().with("q", 1.0, Polarity::Positive);
        let subs: Vec<Submission> = [1.0, 1.0, 2.0]
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                Submission::new(i.to_string(), Utc::now(), periods()).with_score("q", 0, score)
            })
            .collect();

        let yearly = ScoreAggregator::new(weights).aggregate(&subs);
        assert_eq!(yearly.averages[0].average, 1.33);
        assert_eq!(yearly.averages[0].period, "2025");
    }
}
