//! # Forecast Board
//!
//! Loading, report assembly and chart shaping for volume forecasts.
//!
//! ## Features
//!
//! - Volume matrices loaded from CSV or JSON, with per-row and summed series
//! - Score settings and environment configuration
//! - Forecast reports combining survey scores with linear and growth forecasts
//! - Chart-ready series bridging history and forecasts
//!
//! ## Quick Start
//!
//! ```rust
//! use forecast_board::{BoardConfig, DataLoader, ForecastReport, ReportInputs, ScoreSettings};
//!
//! let csv = "Product,2022,2023,2024\nWidgets,\"1,000\",1100,1200\n";
//! let volumes = DataLoader::matrix_from_reader(csv.as_bytes())?;
//!
//! let inputs = ReportInputs {
//!     volumes,
//!     settings: ScoreSettings {
//!         year_names: vec!["2025".to_string()],
//!         score_labels: Vec::new(),
//!     },
//!     ..Default::default()
//! };
//! let report = ForecastReport::build(&inputs, &BoardConfig::default())?;
//!
//! assert_eq!(report.linear[0].forecast_volume, Some(1300.0));
//! assert_eq!(report.chart.len(), 4);
//! # Ok::<(), forecast_board::BoardError>(())
//! ```

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod telemetry;

// Re-export commonly used types
pub use crate::chart::{ChartRow, ChartSeries};
pub use crate::config::{BoardConfig, ScoreSettings};
pub use crate::data::{clean_cell, DataLoader, HistoricalSeries, VolumeMatrix, VolumeRow};
pub use crate::error::{BoardError, Result};
pub use crate::report::{ForecastReport, ReportInputs};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
