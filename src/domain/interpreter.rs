//! Running-interpreter version identification
//!
//! The embedding package's runtime reports its version as a
//! (major, minor, releaselevel) triple. Policies compare against the
//! short ("major.minor") and long ("major.minor.releaselevel") string
//! forms of that triple.

use super::version::{ParsedVersion, ReleaseLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The version triple of the running interpreter/runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterVersion {
    /// Major component
    pub major: u64,
    /// Minor component
    pub minor: u64,
    /// Release level of the running build
    pub releaselevel: ReleaseLevel,
}

impl InterpreterVersion {
    /// Creates a version triple for a final release
    pub fn new(major: u64, minor: u64) -> Self {
        Self {
            major,
            minor,
            releaselevel: ReleaseLevel::Final,
        }
    }

    /// Creates a version triple with an explicit release level
    pub fn with_releaselevel(major: u64, minor: u64, releaselevel: ReleaseLevel) -> Self {
        Self {
            major,
            minor,
            releaselevel,
        }
    }

    /// Short string form, e.g. `3.9`
    pub fn short(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// Long string form, e.g. `3.9.final`
    pub fn long(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.releaselevel)
    }

    /// Converts into the parsed form used by the comparator
    pub fn to_parsed(self) -> ParsedVersion {
        ParsedVersion {
            major: self.major.into(),
            minor: self.minor.into(),
            releaselevel: Some(self.releaselevel),
        }
    }
}

impl fmt::Display for InterpreterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.long())
    }
}
