//! Version string parsing and ordering
//!
//! Handles the dotted version grammar used by policy declarations:
//! - Short form: `3.9`
//! - Long form: `3.9.final` (release level is one of alpha/beta/candidate/final)
//!
//! Ordering only ever considers (major, minor); the release level is matched
//! for exact-string membership, never ordered.

use crate::error::CompatError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

// Anchored so the whole input must match; "3.8.x" or "v3.8" are rejected.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<major>\d+)\.(?P<minor>\d+)(?:\.(?P<releaselevel>alpha|beta|candidate|final))?$")
        .unwrap()
});

/// Release level of an interpreter or declared version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseLevel {
    /// Alpha pre-release
    Alpha,
    /// Beta pre-release
    Beta,
    /// Release candidate
    Candidate,
    /// Final release
    Final,
}

impl ReleaseLevel {
    /// Returns the lowercase token used in version strings
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseLevel::Alpha => "alpha",
            ReleaseLevel::Beta => "beta",
            ReleaseLevel::Candidate => "candidate",
            ReleaseLevel::Final => "final",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "alpha" => Some(ReleaseLevel::Alpha),
            "beta" => Some(ReleaseLevel::Beta),
            "candidate" => Some(ReleaseLevel::Candidate),
            "final" => Some(ReleaseLevel::Final),
            _ => None,
        }
    }
}

impl fmt::Display for ReleaseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A non-negative version component of arbitrary size
///
/// Stored as a digit string with leading zeros stripped, so `3`, `10`, and
/// a 40-digit build counter all order correctly without overflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionNumber(String);

impl VersionNumber {
    /// Normalizes a digit run into a comparable component
    ///
    /// The caller guarantees `digits` is a non-empty ASCII digit string
    /// (the grammar regex enforces this).
    fn from_digits(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            VersionNumber("0".to_string())
        } else {
            VersionNumber(trimmed.to_string())
        }
    }

    /// Returns the normalized decimal representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for VersionNumber {
    fn from(value: u64) -> Self {
        VersionNumber(value.to_string())
    }
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        // Equal-length digit strings compare lexicographically; otherwise
        // the longer one is the larger number.
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A parsed version string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedVersion {
    /// Major component
    pub major: VersionNumber,
    /// Minor component
    pub minor: VersionNumber,
    /// Release level, present only when the source string carried one
    pub releaselevel: Option<ReleaseLevel>,
}

impl ParsedVersion {
    /// Parses a version string under the full-match grammar
    ///
    /// `field` names the policy field the string came from so the error
    /// can point at it.
    pub fn parse(text: &str, field: &str) -> Result<ParsedVersion, CompatError> {
        let captures = VERSION_RE
            .captures(text)
            .ok_or_else(|| CompatError::malformed_version(text, field))?;

        Ok(ParsedVersion {
            major: VersionNumber::from_digits(&captures["major"]),
            minor: VersionNumber::from_digits(&captures["minor"]),
            releaselevel: captures
                .name("releaselevel")
                .and_then(|m| ReleaseLevel::from_token(m.as_str())),
        })
    }

    /// Returns true if `text` matches the version grammar
    pub fn is_valid(text: &str) -> bool {
        VERSION_RE.is_match(text)
    }

    /// Orders by (major, minor) only; release levels never participate
    pub fn cmp_major_minor(&self, other: &ParsedVersion) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.releaselevel {
            Some(level) => write!(f, "{}.{}.{}", self.major, self.minor, level),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}
