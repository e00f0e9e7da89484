//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the stock behavior:
//!
//! ```json
//! {
//!   "assessment": { "dual_threshold": 10, "tie_break": ["vata", "pitta", "kapha"] },
//!   "templates": {
//!     "fallback_categories": ["cereal", "vegetable", "fruit", "legume", "nuts", "herbs", "spices"],
//!     "day_distribution": "identical"
//!   }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Dosha;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub assessment: AssessmentConfig,
    pub templates: TemplateConfig,
}

/// Prakriti classification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssessmentConfig {
    /// Maximum percentage-point gap between the top two doshas for a dual
    /// classification
    pub dual_threshold: u32,
    /// Preference order used to break ties, most preferred first
    pub tie_break: [Dosha; 3],
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            dual_threshold: 10,
            tie_break: Dosha::ALL,
        }
    }
}

/// How a template suggestion's matches are spread over the week.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayDistribution {
    /// Same resolved food on all seven days
    #[default]
    Identical,
    /// Cycle through all name matches, one per day
    RoundRobin,
}

/// Template resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemplateConfig {
    /// Categories tried, in order, when a suggestion has no name match
    pub fallback_categories: Vec<String>,
    pub day_distribution: DayDistribution,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            fallback_categories: [
                "cereal",
                "vegetable",
                "fruit",
                "legume",
                "nuts",
                "herbs",
                "spices",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            day_distribution: DayDistribution::Identical,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.assessment.dual_threshold > 100 {
            return Err(ConfigError::Invalid(format!(
                "dual_threshold must be between 0 and 100, got {}",
                self.assessment.dual_threshold
            )));
        }

        let order = &self.assessment.tie_break;
        if Dosha::ALL.iter().any(|d| !order.contains(d)) {
            return Err(ConfigError::Invalid(format!(
                "tie_break must list each dosha exactly once, got {:?}",
                order
            )));
        }

        if self.templates.fallback_categories.is_empty() {
            return Err(ConfigError::Invalid(
                "fallback_categories must not be empty".into(),
            ));
        }

        Ok(())
    }
}
