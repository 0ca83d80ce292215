//! Library error types using thiserror
//!
//! Error hierarchy:
//! - Configuration: structurally invalid or self-contradictory policy input
//! - MalformedVersion: a version string fails the parser grammar
//! - MalformedDate: a release date string fails date parsing
//! - IncompatibleRuntime: the running interpreter or OS is explicitly
//!   disallowed — the only genuine runtime failure; callers should treat
//!   it as fatal and abort startup
//!
//! All of these propagate immediately to the caller. Untested-runtime,
//! partial-support, and update-reminder observations are never errors;
//! they are emitted through the `log` facade only.

use thiserror::Error;

/// Library-level error type
#[derive(Error, Debug)]
pub enum CompatError {
    /// Malformed or structurally invalid configuration input
    #[error("{message}")]
    Configuration { message: String },

    /// Two or more policy fields contradict each other
    #[error("contradictory OS support sets: {message}")]
    Contradiction { message: String },

    /// A version string does not match the `major.minor[.releaselevel]` grammar
    #[error("version string '{input}' in {field} cannot be parsed")]
    MalformedVersion { input: String, field: String },

    /// A release date string is not a valid YYYY-MM-DD calendar date
    #[error("release date '{input}' is malformed or names a nonexistent date")]
    MalformedDate { input: String },

    /// The running runtime is explicitly disallowed by policy
    #[error("{reason}")]
    IncompatibleRuntime { reason: String },
}

impl CompatError {
    /// Creates a new Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        CompatError::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new Contradiction error
    pub fn contradiction(message: impl Into<String>) -> Self {
        CompatError::Contradiction {
            message: message.into(),
        }
    }

    /// Creates a new MalformedVersion error for a named policy field
    pub fn malformed_version(input: impl Into<String>, field: impl Into<String>) -> Self {
        CompatError::MalformedVersion {
            input: input.into(),
            field: field.into(),
        }
    }

    /// Creates a new MalformedDate error
    pub fn malformed_date(input: impl Into<String>) -> Self {
        CompatError::MalformedDate {
            input: input.into(),
        }
    }

    /// Creates a new IncompatibleRuntime error
    pub fn incompatible_runtime(reason: impl Into<String>) -> Self {
        CompatError::IncompatibleRuntime {
            reason: reason.into(),
        }
    }

    /// Returns true for the one error class the caller must treat as fatal
    /// at runtime rather than as a configuration mistake
    pub fn is_runtime_failure(&self) -> bool {
        matches!(self, CompatError::IncompatibleRuntime { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_message() {
        let err = CompatError::configuration("Missing package name!");
        assert_eq!(format!("{}", err), "Missing package name!");
    }

    #[test]
    fn test_contradiction_error_message() {
        let err = CompatError::contradiction("Windows is fully supported AND incompatible");
        let msg = format!("{}", err);
        assert!(msg.contains("contradictory OS support sets"));
        assert!(msg.contains("Windows"));
    }

    #[test]
    fn test_malformed_version_names_field() {
        let err = CompatError::malformed_version("3.8.x", "max_tested_version");
        let msg = format!("{}", err);
        assert!(msg.contains("3.8.x"));
        assert!(msg.contains("max_tested_version"));
    }

    #[test]
    fn test_malformed_date_message() {
        let err = CompatError::malformed_date("2021-02-30");
        let msg = format!("{}", err);
        assert!(msg.contains("2021-02-30"));
        assert!(msg.contains("malformed"));
    }

    #[test]
    fn test_runtime_failure_classification() {
        assert!(CompatError::incompatible_runtime("blocked").is_runtime_failure());
        assert!(!CompatError::configuration("bad").is_runtime_failure());
        assert!(!CompatError::malformed_date("x").is_runtime_failure());
    }
}
