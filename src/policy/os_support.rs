//! Operating-system support policy
//!
//! A package declares which operating systems it fully supports, partially
//! supports, or refuses to run on. The sets are validated for internal
//! contradictions before any classification happens: a configuration that
//! names the same OS as both fully supported and incompatible is broken
//! no matter which OS is currently running.

use crate::domain::OperatingSystem;
use crate::error::CompatError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Declared OS support tiers, all empty by default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OsSupportPolicy {
    /// Fully supported operating systems
    pub full: BTreeSet<OperatingSystem>,
    /// Operating systems with known limitations
    pub partial: BTreeSet<OperatingSystem>,
    /// Operating systems the package refuses to run on
    pub incompatible: BTreeSet<OperatingSystem>,
}

/// Classification of the running operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsVerdict {
    /// Listed as fully supported
    FullySupported,
    /// Listed with known limitations
    PartialSupport,
    /// Explicitly unsupported; the orchestrator turns this into a hard failure
    Incompatible,
    /// Not covered by any tier
    Unknown,
}

impl OsSupportPolicy {
    /// Checks the tier sets for self-contradictions
    pub fn validate(&self) -> Result<(), CompatError> {
        if let Some(os) = self.full.intersection(&self.partial).next() {
            return Err(CompatError::contradiction(format!(
                "{os} cannot be fully AND only partially supported"
            )));
        }
        if let Some(os) = self.full.intersection(&self.incompatible).next() {
            return Err(CompatError::contradiction(format!(
                "{os} cannot be fully supported AND incompatible"
            )));
        }
        Ok(())
    }

    /// Classifies the running OS in tier priority order
    ///
    /// `running` is `None` when the platform name was not recognized;
    /// such hosts always classify as Unknown.
    pub fn evaluate(&self, running: Option<OperatingSystem>) -> Result<OsVerdict, CompatError> {
        self.validate()?;

        let Some(os) = running else {
            return Ok(OsVerdict::Unknown);
        };

        if self.full.contains(&os) {
            Ok(OsVerdict::FullySupported)
        } else if self.partial.contains(&os) {
            Ok(OsVerdict::PartialSupport)
        } else if self.incompatible.contains(&os) {
            Ok(OsVerdict::Incompatible)
        } else {
            Ok(OsVerdict::Unknown)
        }
    }
}
