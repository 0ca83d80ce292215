//! Update nag scheduling
//!
//! Once a package version is older than a configured number of days, each
//! check has a configured chance of reminding the user to look for updates.
//! The decision is a fresh draw per call, never memoized, so only the 0%
//! and 100% settings behave deterministically.

use crate::error::CompatError;
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Declared nag schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NagPolicy {
    /// Number of days after release before reminders may fire
    pub days_after_release: u32,
    /// Chance of a reminder per check, in percent
    pub probability_percent: u8,
}

/// Source of uniform samples in `[0, 1)`
///
/// Injectable so tests can pin the draw; production code uses
/// [`ThreadRngSampler`].
pub trait Sampler {
    /// Draws one uniform sample in `[0, 1)`
    fn sample(&mut self) -> f64;
}

/// Default sampler backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSampler;

impl Sampler for ThreadRngSampler {
    fn sample(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

impl NagPolicy {
    /// Creates a nag schedule
    pub fn new(days_after_release: u32, probability_percent: u8) -> Self {
        Self {
            days_after_release,
            probability_percent,
        }
    }

    /// Checks the probability field is a valid percentage
    pub fn validate(&self) -> Result<(), CompatError> {
        if self.probability_percent > 100 {
            return Err(CompatError::configuration(
                "probability_percent must be an integer between 0 and 100.",
            ));
        }
        Ok(())
    }

    /// Decides whether a reminder should fire on this check
    ///
    /// Returns the number of elapsed days alongside the decision so the
    /// reminder message can state the package's age. `release_date` in the
    /// future yields a negative age and never reminds.
    pub fn evaluate(
        &self,
        release_date: NaiveDate,
        today: NaiveDate,
        sampler: &mut dyn Sampler,
    ) -> Result<Option<i64>, CompatError> {
        self.validate()?;

        if self.probability_percent == 0 {
            return Ok(None);
        }

        let elapsed_days = (today - release_date).num_days();
        if elapsed_days < i64::from(self.days_after_release) {
            return Ok(None);
        }

        let probability = f64::from(self.probability_percent) / 100.0;
        if self.probability_percent == 100 || sampler.sample() < probability {
            Ok(Some(elapsed_days))
        } else {
            Ok(None)
        }
    }
}
