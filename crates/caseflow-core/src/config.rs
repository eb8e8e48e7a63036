//! # Workflow Configuration
//!
//! Settings that vary between deployments: the execution environment,
//! statutory timelines, court fees, dispatcher limits, and logging. Loaded
//! once from YAML by the binary and passed explicitly (inside
//! [`ExecutionContext`](crate::ExecutionContext)) to everything that needs
//! it. Every field has a default, so an empty document is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::Environment;

/// Errors loading a [`WorkflowConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The YAML did not match the config schema.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value parsed but is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Offending field, dotted path.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

// ─── Sections ────────────────────────────────────────────────────────

/// Statutory and administrative time limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timelines {
    /// Days an applicant has to respond to the other's answers.
    pub applicant_response_days: u64,
    /// Days the respondent has to acknowledge service.
    pub aos_response_days: u64,
    /// Days allowed to serve papers personally.
    pub service_response_days: u64,
    /// Days between issue and the earliest conditional order (20 weeks + 1).
    pub holding_period_days: u64,
    /// Days a disputing respondent has to file an answer.
    pub dispute_answer_days: u64,
    /// Days after pronouncement before a final order may be applied for.
    pub final_order_eligible_days: u64,
    /// Months after applicant eligibility before the respondent may apply.
    pub respondent_extra_months: u32,
    /// Months after eligibility after which an application is late.
    pub final_order_overdue_months: u32,
    /// Minimum age of the marriage at issue.
    pub minimum_marriage_age_months: u32,
}

impl Default for Timelines {
    fn default() -> Self {
        Self {
            applicant_response_days: 14,
            aos_response_days: 16,
            service_response_days: 28,
            holding_period_days: 141,
            dispute_answer_days: 37,
            final_order_eligible_days: 43,
            respondent_extra_months: 3,
            final_order_overdue_months: 12,
            minimum_marriage_age_months: 12,
        }
    }
}

/// Court fees, in pence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fees {
    pub application_pence: u64,
    pub service_application_pence: u64,
    pub general_application_pence: u64,
}

impl Default for Fees {
    fn default() -> Self {
        Self {
            application_pence: 59_300,
            service_application_pence: 5_800,
            general_application_pence: 5_800,
        }
    }
}

/// Side-effect dispatcher limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchSettings {
    /// Per-job timeout in milliseconds.
    pub job_timeout_ms: u64,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            job_timeout_ms: 5_000,
        }
    }
}

/// Logging output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `"info,caseflow_dispatch=debug"`.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

// ─── Root ────────────────────────────────────────────────────────────

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub environment: Environment,
    pub timelines: Timelines,
    pub fees: Fees,
    pub dispatch: DispatchSettings,
    pub logging: LoggingSettings,
}

impl WorkflowConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document; treat it as all-defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: WorkflowConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatch.job_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "dispatch.job_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.timelines.holding_period_days == 0 {
            return Err(ConfigError::Invalid {
                field: "timelines.holding_period_days",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = WorkflowConfig::from_yaml_str("").unwrap();
        assert_eq!(config, WorkflowConfig::default());
        assert_eq!(config.timelines.holding_period_days, 141);
        assert_eq!(config.fees.application_pence, 59_300);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let yaml = r#"
environment: production
timelines:
  applicant_response_days: 21
fees:
  application_pence: 61200
"#;
        let config = WorkflowConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.timelines.applicant_response_days, 21);
        assert_eq!(config.timelines.aos_response_days, 16);
        assert_eq!(config.fees.application_pence, 61_200);
        assert_eq!(config.fees.service_application_pence, 5_800);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = WorkflowConfig::from_yaml_str("dispatch:\n  job_timeout_ms: 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "dispatch.job_timeout_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = WorkflowConfig::from_yaml_str("timelines: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
