/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Tick;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Configuration errors, raised at the boundary before the engine is built
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("{field} = {value} is out of range [{min}, {max}]")]
    #[diagnostic(
        code(config::out_of_range),
        help("Adjust the value so it lies within the documented bounds.")
    )]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("{field} = {value} is not one of {allowed}")]
    #[diagnostic(code(config::invalid_choice), help("Pick one of the allowed values."))]
    InvalidChoice {
        field: String,
        value: String,
        allowed: String,
    },

    #[error("Failed to read configuration: {0}")]
    #[diagnostic(
        code(config::io),
        help("Check that the configuration file exists and is readable.")
    )]
    Io(String),

    #[error("Failed to parse configuration: {0}")]
    #[diagnostic(
        code(config::parse),
        help("The configuration must be a JSON object with snake_case keys.")
    )]
    Parse(String),
}

impl ConfigError {
    pub fn out_of_range(
        field: &str,
        value: impl Display,
        min: impl Display,
        max: impl Display,
    ) -> Self {
        Self::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

/// Simulator errors
///
/// The tick loop itself never fails; these come from the control surface only.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("Simulation already started (tick {tick}); configuration is fixed")]
    #[diagnostic(
        code(simulator::already_started),
        help("Call reset() first, or configure before the first tick.")
    )]
    AlreadyStarted { tick: Tick },

    #[error("Unknown allocation policy: {0}")]
    #[diagnostic(
        code(simulator::unknown_policy),
        help("Use adaptive, roundrobin, priority, or fcfs.")
    )]
    UnknownPolicy(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for simulator control operations
pub type SimResult<T> = Result<T, SimError>;
