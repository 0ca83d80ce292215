//! Interpreter-version support policy
//!
//! Classifies the running interpreter against a declared support range:
//! below the minimum or on an explicit blocklist is Blocked, above the
//! highest tested version is a warning, anything else is fine.

use crate::domain::{InterpreterVersion, ParsedVersion};
use crate::error::CompatError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Declared interpreter-version constraints
///
/// All three fields are mandatory; deserialization rejects missing,
/// surplus, or misnamed keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterpreterVersionPolicy {
    /// Lowest interpreter version the package runs on ("major.minor")
    pub min_version: String,
    /// Highest interpreter version the package was tested against
    pub max_tested_version: String,
    /// Versions excluded outright, in short or long form
    pub incompatible_versions: Vec<String>,
}

/// Why a running version was blocked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// Running version is below the declared minimum
    BelowMinimum {
        /// The declared minimum
        required: ParsedVersion,
        /// Long form of the running version
        running: String,
    },
    /// Running version is an exact member of the blocklist
    ExplicitlyIncompatible {
        /// Long form of the running version
        running: String,
    },
}

/// Classification of the running interpreter version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterVerdict {
    /// The running version must not be used
    Blocked(BlockReason),
    /// The running version is newer than anything tested
    UntestedWarning,
    /// The running version is inside the supported range
    Ok,
}

impl InterpreterVersionPolicy {
    /// Creates a policy from its three constraint fields
    pub fn new(
        min_version: impl Into<String>,
        max_tested_version: impl Into<String>,
        incompatible_versions: Vec<String>,
    ) -> Self {
        Self {
            min_version: min_version.into(),
            max_tested_version: max_tested_version.into(),
            incompatible_versions,
        }
    }

    /// Checks every version string in the policy against the grammar
    ///
    /// The error names the field holding the unparsable string.
    pub fn validate(&self) -> Result<(), CompatError> {
        ParsedVersion::parse(&self.min_version, "min_version")?;
        ParsedVersion::parse(&self.max_tested_version, "max_tested_version")?;
        for entry in &self.incompatible_versions {
            ParsedVersion::parse(entry, "incompatible_versions")?;
        }
        Ok(())
    }

    /// Classifies the running interpreter version
    ///
    /// Order matters: the minimum-version gate runs first, the blocklist
    /// is consulted unconditionally after it passes, and only then is the
    /// tested ceiling considered.
    pub fn evaluate(
        &self,
        running: &InterpreterVersion,
    ) -> Result<InterpreterVerdict, CompatError> {
        self.validate()?;

        let short = running.short();
        let long = running.long();
        let running_parsed = running.to_parsed();

        let min = ParsedVersion::parse(&self.min_version, "min_version")?;
        if running_parsed.cmp_major_minor(&min) == Ordering::Less {
            return Ok(InterpreterVerdict::Blocked(BlockReason::BelowMinimum {
                required: min,
                running: long,
            }));
        }

        if self
            .incompatible_versions
            .iter()
            .any(|entry| *entry == short || *entry == long)
        {
            return Ok(InterpreterVerdict::Blocked(
                BlockReason::ExplicitlyIncompatible { running: long },
            ));
        }

        let max_tested = ParsedVersion::parse(&self.max_tested_version, "max_tested_version")?;
        if running_parsed.cmp_major_minor(&max_tested) == Ordering::Greater {
            return Ok(InterpreterVerdict::UntestedWarning);
        }

        Ok(InterpreterVerdict::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReleaseLevel;

    fn policy(min: &str, max: &str, incompatible: &[&str]) -> InterpreterVersionPolicy {
        InterpreterVersionPolicy::new(
            min,
            max,
            incompatible.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_running_below_minimum_is_blocked() {
        let verdict = policy("3.8", "3.9", &[])
            .evaluate(&InterpreterVersion::new(3, 7))
            .unwrap();
        match verdict {
            InterpreterVerdict::Blocked(BlockReason::BelowMinimum { required, running }) => {
                assert_eq!(required.to_string(), "3.8");
                assert_eq!(running, "3.7.final");
            }
            other => panic!("expected BelowMinimum, got {other:?}"),
        }
    }

    #[test]
    fn test_equal_minor_is_not_blocked() {
        // Blocking requires strictly lower minor at equal major.
        let verdict = policy("3.8", "3.9", &[])
            .evaluate(&InterpreterVersion::new(3, 8))
            .unwrap();
        assert_eq!(verdict, InterpreterVerdict::Ok);
    }

    #[test]
    fn test_lower_major_blocks_despite_higher_minor() {
        let verdict = policy("3.0", "3.9", &[])
            .evaluate(&InterpreterVersion::new(2, 99))
            .unwrap();
        assert!(matches!(
            verdict,
            InterpreterVerdict::Blocked(BlockReason::BelowMinimum { .. })
        ));
    }

    #[test]
    fn test_blocklist_matches_short_form() {
        let verdict = policy("3.0", "3.12", &["3.9"])
            .evaluate(&InterpreterVersion::new(3, 9))
            .unwrap();
        assert!(matches!(
            verdict,
            InterpreterVerdict::Blocked(BlockReason::ExplicitlyIncompatible { .. })
        ));
    }

    #[test]
    fn test_blocklist_matches_long_form() {
        let running = InterpreterVersion::with_releaselevel(3, 9, ReleaseLevel::Beta);
        let verdict = policy("3.0", "3.12", &["3.9.beta"])
            .evaluate(&running)
            .unwrap();
        assert!(matches!(
            verdict,
            InterpreterVerdict::Blocked(BlockReason::ExplicitlyIncompatible { .. })
        ));
    }

    #[test]
    fn test_blocklist_needs_exact_match() {
        // "3.9.final" on the list does not block a query for short "3.10"
        let verdict = policy("3.0", "3.12", &["3.9.final"])
            .evaluate(&InterpreterVersion::new(3, 10))
            .unwrap();
        assert_eq!(verdict, InterpreterVerdict::Ok);
    }

    #[test]
    fn test_above_tested_ceiling_warns() {
        let verdict = policy("0.0", "3.0", &[])
            .evaluate(&InterpreterVersion::new(3, 10))
            .unwrap();
        assert_eq!(verdict, InterpreterVerdict::UntestedWarning);
    }

    #[test]
    fn test_within_range_is_ok() {
        let verdict = policy("3.6", "3.10", &["3.7"])
            .evaluate(&InterpreterVersion::new(3, 9))
            .unwrap();
        assert_eq!(verdict, InterpreterVerdict::Ok);
    }

    #[test]
    fn test_malformed_min_version_rejected() {
        let err = policy("3", "3.9", &[])
            .evaluate(&InterpreterVersion::new(3, 9))
            .unwrap_err();
        assert!(format!("{}", err).contains("min_version"));
    }

    #[test]
    fn test_malformed_blocklist_entry_rejected() {
        let err = policy("3.0", "3.9", &["3.8", "not-a-version"])
            .evaluate(&InterpreterVersion::new(3, 9))
            .unwrap_err();
        assert!(format!("{}", err).contains("incompatible_versions"));
    }

    #[test]
    fn test_raising_min_major_is_monotonic() {
        // Raising the minimum can only move verdicts towards Blocked.
        let running = InterpreterVersion::new(3, 9);
        let relaxed = policy("2.0", "3.12", &[]).evaluate(&running).unwrap();
        let strict = policy("4.0", "3.12", &[]).evaluate(&running).unwrap();
        assert_eq!(relaxed, InterpreterVerdict::Ok);
        assert!(matches!(strict, InterpreterVerdict::Blocked(_)));
    }

    #[test]
    fn test_deserialization_rejects_unknown_keys() {
        let result: Result<InterpreterVersionPolicy, _> = serde_json::from_str(
            r#"{
                "min_version": "3.8",
                "max_tested_version": "3.9",
                "incompatible_versions": [],
                "extra_key": true
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialization_rejects_missing_keys() {
        let result: Result<InterpreterVersionPolicy, _> =
            serde_json::from_str(r#"{"min_version": "3.8"}"#);
        assert!(result.is_err());
    }
}
