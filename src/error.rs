//! Error types for the Settlement Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing a settlement.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Settlement Engine.
///
/// Only input validation, rule set loading and worksheet operations can fail.
/// Once inputs are accepted the calculation itself is infallible.
///
/// # Example
///
/// ```
/// use settlement_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "base_salary".to_string(),
///     message: "not a number".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid input 'base_salary': not a number");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The termination date precedes the hire date.
    #[error("Termination date {termination_date} precedes hire date {hire_date}")]
    InvalidDateRange {
        /// The hire date supplied.
        hire_date: NaiveDate,
        /// The termination date supplied.
        termination_date: NaiveDate,
    },

    /// A field was malformed or out of range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but its tables are inconsistent.
    #[error("Invalid rule set: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// An edit or fund override was requested before any settlement existed.
    #[error("No settlement has been calculated")]
    NoSettlement,
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
