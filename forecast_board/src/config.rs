//! Forecast configuration: score settings from the settings store and
//! runtime options from the environment.

use crate::error::{BoardError, Result};
use forecast_math::{GrowthForecaster, DEFAULT_SCORE_SCALE};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use survey_scores::ScoreCard;

/// Horizon and score-card labels saved by the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSettings {
    /// Forecast horizon labels
    #[serde(default)]
    pub year_names: Vec<String>,
    /// Score-card option labels, lowest first
    #[serde(default)]
    pub score_labels: Vec<String>,
}

impl ScoreSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Score card built from the configured labels
    pub fn score_card(&self, scale: f64) -> Result<ScoreCard> {
        Ok(ScoreCard::with_scale(self.score_labels.clone(), scale)?)
    }
}

/// Runtime options for building reports
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Upper end of the respondent score scale
    pub score_scale: f64,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            score_scale: DEFAULT_SCORE_SCALE,
            log_level: "info".to_string(),
        }
    }
}

impl BoardConfig {
    /// Load from the process environment, reading a `.env` file first if present
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let score_scale = match lookup("FORECAST_SCORE_SCALE") {
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                BoardError::InvalidConfig(format!(
                    "FORECAST_SCORE_SCALE must be a number, got '{}'",
                    raw
                ))
            })?,
            None => defaults.score_scale,
        };
        // Validates the scale the same way the forecaster does.
        GrowthForecaster::with_score_scale(score_scale)?;

        let log_level = lookup("FORECAST_LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Self {
            score_scale,
            log_level,
        })
    }

    pub fn growth_forecaster(&self) -> Result<GrowthForecaster> {
        Ok(GrowthForecaster::with_score_scale(self.score_scale)?)
    }
}
