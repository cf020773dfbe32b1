//! Questions and their weights

use crate::RawId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Identifier of a survey question
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| Self(raw.into_string()))
    }
}

impl From<QuestionId> for String {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for QuestionId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a question's weighted score adds to or subtracts from a year's total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Parse a question type tag. Only `"positive"` is positive.
    pub fn from_tag(tag: &str) -> Self {
        if tag == "positive" {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => write!(f, "positive"),
            Polarity::Negative => write!(f, "negative"),
        }
    }
}

/// Question as delivered by the questions store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    #[serde(default)]
    pub text: String,
    /// Raw weight, a number or a numeric string
    #[serde(default)]
    pub weight: Value,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl QuestionRecord {
    /// Weight as a number; anything unusable is 0.
    pub fn numeric_weight(&self) -> f64 {
        let parsed = match &self.weight {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if s.trim().is_empty() => Some(0.0),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Null => Some(0.0),
            _ => None,
        };

        match parsed {
            Some(w) if w.is_finite() && w >= 0.0 => w,
            _ => {
                warn!(
                    question = %self.id,
                    weight = %self.weight,
                    "unusable question weight, using 0"
                );
                0.0
            }
        }
    }
}

/// Weight and polarity of one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionWeight {
    pub id: QuestionId,
    pub weight: f64,
    pub polarity: Polarity,
}

/// Ordered mapping from question to weight and polarity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionWeights {
    entries: Vec<QuestionWeight>,
}

impl QuestionWeights {
    /// Create an empty weight map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the weight map from question store records, keeping their order.
    pub fn from_records(records: &[QuestionRecord]) -> Self {
        records.iter().fold(Self::new(), |weights, record| {
            weights.with(
                record.id.clone(),
                record.numeric_weight(),
                Polarity::from_tag(&record.kind),
            )
        })
    }

    /// Add or replace a question's weight
    pub fn with(mut self, id: impl Into<QuestionId>, weight: f64, polarity: Polarity) -> Self {
        self.insert(id, weight, polarity);
        self
    }

    /// Add or replace a question's weight. Non-finite or negative weights are stored as 0.
    pub fn insert(&mut self, id: impl Into<QuestionId>, weight: f64, polarity: Polarity) {
        let id = id.into();
        let weight = if weight.is_finite() && weight >= 0.0 {
            weight
        } else {
            0.0
        };

        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.weight = weight;
                entry.polarity = polarity;
            }
            None => self.entries.push(QuestionWeight {
                id,
                weight,
                polarity,
            }),
        }
    }

    pub fn get(&self, id: &QuestionId) -> Option<&QuestionWeight> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionWeight> {
        self.entries.iter()
    }

    /// Questions of the given polarity, in insertion order
    pub fn with_polarity(&self, polarity: Polarity) -> impl Iterator<Item = &QuestionWeight> {
        self.entries.iter().filter(move |e| e.polarity == polarity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> QuestionRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numeric_and_string_ids() {
        let a = record(json!({"id": 7, "text": "Demand", "weight": 0.5, "type": "positive"}));
        let b = record(json!({"id": "7", "text": "Demand", "weight": "0.5", "type": "positive"}));

        assert_eq!(a.id, b.id);
        assert_eq!(a.numeric_weight(), 0.5);
        assert_eq!(b.numeric_weight(), 0.5);
    }

    #[test]
    fn test_malformed_weights_become_zero() {
        for weight in [json!("heavy"), json!(null), json!(-2.0), json!([1]), json!("")] {
            let r = record(json!({"id": 1, "weight": weight, "type": "negative"}));
            assert_eq!(r.numeric_weight(), 0.0);
        }
        let missing = record(json!({"id": 1, "type": "positive"}));
        assert_eq!(missing.numeric_weight(), 0.0);
    }

    #[test]
    fn test_polarity_from_tag() {
        assert_eq!(Polarity::from_tag("positive"), Polarity::Positive);
        assert_eq!(Polarity::from_tag("negative"), Polarity::Negative);
        assert_eq!(Polarity::from_tag("Positive"), Polarity::Negative);
        assert_eq!(Polarity::from_tag(""), Polarity::Negative);
    }

    #[test]
    fn test_from_records_keeps_order_and_replaces_duplicates() {
        let records = vec![
            record(json!({"id": 1, "weight": 1, "type": "positive"})),
            record(json!({"id": 2, "weight": 2, "type": "negative"})),
            record(json!({"id": 1, "weight": 3, "type": "negative"})),
        ];
        let weights = QuestionWeights::from_records(&records);

        assert_eq!(weights.len(), 2);
        let first = weights.iter().next().unwrap();
        assert_eq!(first.id, QuestionId::from(1));
        assert_eq!(first.weight, 3.0);
        assert_eq!(first.polarity, Polarity::Negative);
        assert_eq!(weights.with_polarity(Polarity::Positive).count(), 0);
    }

    #[test]
    fn test_id_serializes_as_string() {
        let id = QuestionId::from(12);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"12\"");
    }
}
