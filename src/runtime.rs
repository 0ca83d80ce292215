//! Ambient runtime environment
//!
//! Bundles the three ambient reads a check depends on: the running
//! interpreter version, the platform-reported OS name, and today's date.
//! Production code uses the host constructors; tests build a fixed value.

use crate::domain::{InterpreterVersion, OperatingSystem};
use chrono::{Local, NaiveDate};

/// The environment a check runs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnv {
    /// Version of the runtime hosting the embedding package, when known
    ///
    /// A compiled binary cannot introspect this; the embedding runtime
    /// host reports its own version. Required only when an
    /// interpreter-version policy is evaluated.
    pub interpreter: Option<InterpreterVersion>,
    /// Platform-reported OS name, e.g. "linux" or "Darwin"
    pub os_name: String,
    /// Today's date in local time
    pub today: NaiveDate,
}

impl RuntimeEnv {
    /// Captures the host OS and date without a runtime version
    pub fn host() -> Self {
        Self {
            interpreter: None,
            os_name: std::env::consts::OS.to_string(),
            today: Local::now().date_naive(),
        }
    }

    /// Captures the host OS and date with the reported runtime version
    pub fn host_with(interpreter: InterpreterVersion) -> Self {
        Self {
            interpreter: Some(interpreter),
            ..Self::host()
        }
    }

    /// Builds a fully specified environment
    pub fn fixed(
        interpreter: Option<InterpreterVersion>,
        os_name: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            interpreter,
            os_name: os_name.into(),
            today,
        }
    }

    /// The canonical operating system, when the platform name is recognized
    pub fn operating_system(&self) -> Option<OperatingSystem> {
        OperatingSystem::from_platform_name(&self.os_name)
    }
}
