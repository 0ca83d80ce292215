//! Check orchestrator
//!
//! Coordinates one compatibility check in a fixed order:
//! validate package metadata → coerce the release date → interpreter-version
//! policy → OS support policy → version info log → update nag. A blocked
//! interpreter or incompatible OS aborts before the later steps run.
//!
//! The orchestrator owns all side effects: policy evaluators only classify,
//! and every message goes through the `log` facade using the per-language
//! template table.

use crate::domain::{InterpreterVersion, Language};
use crate::error::CompatError;
use crate::messages::{self, MessageKey, MessageLookup};
use crate::policy::{
    BlockReason, InterpreterVerdict, InterpreterVersionPolicy, NagPolicy, OsSupportPolicy,
    OsVerdict, Sampler, ThreadRngSampler,
};
use crate::runtime::RuntimeEnv;
use chrono::NaiveDate;

/// This library's own package name; checks for it skip the info log
pub const NAME: &str = "compat-check";

/// Release date as supplied by the caller, before coercion
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReleaseDateInput {
    Date(NaiveDate),
    Text(String),
}

/// Validated per-check context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckContext {
    /// Trimmed, non-empty package name
    pub package_name: String,
    /// Trimmed, non-empty package version
    pub package_version: String,
    /// Coerced release date
    pub release_date: NaiveDate,
    /// Language for emitted messages
    pub language: Language,
}

/// Outcome of a completed check
///
/// Only non-fatal classifications land here; a blocked interpreter or
/// incompatible OS surfaces as [`CompatError::IncompatibleRuntime`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// The validated inputs the check ran with
    pub context: CheckContext,
    /// Interpreter classification, if a policy was supplied
    pub interpreter: Option<InterpreterVerdict>,
    /// OS classification, if a policy was supplied
    pub os: Option<OsVerdict>,
    /// Whether the update reminder fired on this check
    pub update_reminder: bool,
}

/// Entry point for running a compatibility check
pub struct Check;

impl Check {
    /// Starts building a check for the named package version
    pub fn builder(
        package_name: impl Into<String>,
        package_version: impl Into<String>,
    ) -> CheckBuilder {
        CheckBuilder {
            package_name: package_name.into(),
            package_version: package_version.into(),
            release_date: None,
            interpreter_policy: None,
            os_policy: None,
            nag_policy: None,
            language: Language::default(),
            runtime: None,
            sampler: Box::new(ThreadRngSampler),
            lookup: messages::template,
        }
    }
}

/// Configures and runs one compatibility check
pub struct CheckBuilder {
    package_name: String,
    package_version: String,
    release_date: Option<ReleaseDateInput>,
    interpreter_policy: Option<InterpreterVersionPolicy>,
    os_policy: Option<OsSupportPolicy>,
    nag_policy: Option<NagPolicy>,
    language: Language,
    runtime: Option<RuntimeEnv>,
    sampler: Box<dyn Sampler>,
    lookup: MessageLookup,
}

impl CheckBuilder {
    /// Sets the release date from a structured date
    pub fn release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(ReleaseDateInput::Date(date));
        self
    }

    /// Sets the release date from a "YYYY-MM-DD" string, validated at run time
    pub fn release_date_str(mut self, date: impl Into<String>) -> Self {
        self.release_date = Some(ReleaseDateInput::Text(date.into()));
        self
    }

    /// Enables interpreter-version enforcement
    pub fn interpreter_policy(mut self, policy: InterpreterVersionPolicy) -> Self {
        self.interpreter_policy = Some(policy);
        self
    }

    /// Enables OS support-tier enforcement
    pub fn os_policy(mut self, policy: OsSupportPolicy) -> Self {
        self.os_policy = Some(policy);
        self
    }

    /// Enables the update nag scheduler
    pub fn nag_policy(mut self, policy: NagPolicy) -> Self {
        self.nag_policy = Some(policy);
        self
    }

    /// Sets the message language (default: English)
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Overrides the ambient runtime environment (default: host)
    pub fn runtime(mut self, runtime: RuntimeEnv) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Shorthand for a host runtime reporting the given interpreter version
    pub fn interpreter_version(self, version: InterpreterVersion) -> Self {
        self.runtime(RuntimeEnv::host_with(version))
    }

    /// Overrides the random source for the nag decision
    pub fn sampler(mut self, sampler: Box<dyn Sampler>) -> Self {
        self.sampler = sampler;
        self
    }

    /// Overrides the message template lookup
    pub fn messages(mut self, lookup: MessageLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Runs the check
    pub fn run(mut self) -> Result<CheckReport, CompatError> {
        let context = self.validate_context()?;
        let runtime = self.runtime.take().unwrap_or_else(RuntimeEnv::host);

        let interpreter = match &self.interpreter_policy {
            Some(policy) => Some(self.enforce_interpreter(policy, &context, &runtime)?),
            None => None,
        };

        let os = match &self.os_policy {
            Some(policy) => Some(self.enforce_os(policy, &context, &runtime)?),
            None => None,
        };

        // Every embedding package would otherwise log a line about this
        // library itself when it runs its own check.
        if context.package_name != NAME {
            self.emit(
                log::Level::Info,
                MessageKey::VersionInfo,
                context.language,
                &[
                    &context.package_name,
                    &context.package_version,
                    &context.release_date.to_string(),
                ],
            );
        }

        let update_reminder = match self.nag_policy {
            Some(policy) => {
                match policy.evaluate(context.release_date, runtime.today, &mut *self.sampler)? {
                    Some(elapsed_days) => {
                        self.emit(
                            log::Level::Info,
                            MessageKey::CheckForUpdates,
                            context.language,
                            &[&context.package_name, &elapsed_days.to_string()],
                        );
                        true
                    }
                    None => false,
                }
            }
            None => false,
        };

        Ok(CheckReport {
            context,
            interpreter,
            os,
            update_reminder,
        })
    }

    /// Validates package metadata and coerces the release date
    fn validate_context(&self) -> Result<CheckContext, CompatError> {
        let package_name = self.package_name.trim().to_string();
        if package_name.is_empty() {
            return Err(CompatError::configuration("Missing package name!"));
        }

        let package_version = self.package_version.trim().to_string();
        if package_version.is_empty() {
            return Err(CompatError::configuration("Missing package version!"));
        }

        let release_date = match &self.release_date {
            Some(ReleaseDateInput::Date(date)) => *date,
            Some(ReleaseDateInput::Text(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(CompatError::configuration("Missing release date!"));
                }
                // Rejects both bad syntax and nonexistent dates like 2021-02-30
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .map_err(|_| CompatError::malformed_date(trimmed))?
            }
            None => return Err(CompatError::configuration("Missing release date!")),
        };

        Ok(CheckContext {
            package_name,
            package_version,
            release_date,
            language: self.language,
        })
    }

    /// Runs the interpreter policy; a Blocked verdict aborts the check
    fn enforce_interpreter(
        &self,
        policy: &InterpreterVersionPolicy,
        context: &CheckContext,
        runtime: &RuntimeEnv,
    ) -> Result<InterpreterVerdict, CompatError> {
        let running = runtime.interpreter.ok_or_else(|| {
            CompatError::configuration("Missing running interpreter version!")
        })?;

        let verdict = policy.evaluate(&running)?;
        match &verdict {
            InterpreterVerdict::Blocked(BlockReason::BelowMinimum { required, running }) => {
                return Err(CompatError::incompatible_runtime(format!(
                    "You need at least version {} of the interpreter to run {}, \
                     but you are using {}.",
                    required, context.package_name, running
                )));
            }
            InterpreterVerdict::Blocked(BlockReason::ExplicitlyIncompatible { .. }) => {
                let reason = messages::render(
                    (self.lookup)(MessageKey::IncompatibleVersion, context.language),
                    &[&context.package_name],
                );
                log::error!(target: "compat_check", "{reason}");
                return Err(CompatError::incompatible_runtime(reason));
            }
            InterpreterVerdict::UntestedWarning => {
                self.emit(
                    log::Level::Warn,
                    MessageKey::UntestedInterpreter,
                    context.language,
                    &[&context.package_name],
                );
            }
            InterpreterVerdict::Ok => {}
        }
        Ok(verdict)
    }

    /// Runs the OS policy; an Incompatible verdict aborts the check
    fn enforce_os(
        &self,
        policy: &OsSupportPolicy,
        context: &CheckContext,
        runtime: &RuntimeEnv,
    ) -> Result<OsVerdict, CompatError> {
        let running = runtime.operating_system();
        let verdict = policy.evaluate(running)?;

        let os_name = match running {
            Some(os) => os.display_name().to_string(),
            None => runtime.os_name.clone(),
        };

        match verdict {
            OsVerdict::FullySupported => {
                self.emit(
                    log::Level::Info,
                    MessageKey::FullOsSupport,
                    context.language,
                    &[&context.package_name, &os_name],
                );
            }
            OsVerdict::PartialSupport => {
                self.emit(
                    log::Level::Warn,
                    MessageKey::PartialOsSupport,
                    context.language,
                    &[&context.package_name, &os_name],
                );
            }
            OsVerdict::Incompatible => {
                let reason = messages::render(
                    (self.lookup)(MessageKey::IncompatibleOs, context.language),
                    &[&context.package_name, &os_name],
                );
                log::error!(target: "compat_check", "{reason}");
                return Err(CompatError::incompatible_runtime(reason));
            }
            OsVerdict::Unknown => {
                self.emit(
                    log::Level::Info,
                    MessageKey::UnknownOsSupport,
                    context.language,
                    &[&context.package_name, &os_name],
                );
            }
        }
        Ok(verdict)
    }

    /// Renders a message template and hands it to the logging sink
    fn emit(&self, level: log::Level, key: MessageKey, language: Language, args: &[&str]) {
        let message = messages::render((self.lookup)(key, language), args);
        log::log!(target: "compat_check", level, "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OperatingSystem;
    use std::collections::BTreeSet;

    fn fixed_runtime() -> RuntimeEnv {
        RuntimeEnv::fixed(
            Some(InterpreterVersion::new(3, 9)),
            "Linux",
            NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
        )
    }

    #[test]
    fn test_missing_package_name() {
        let err = Check::builder("", "1.0")
            .release_date_str("2021-01-01")
            .run()
            .unwrap_err();
        assert_eq!(format!("{}", err), "Missing package name!");
    }

    #[test]
    fn test_whitespace_package_name() {
        let err = Check::builder("        ", "1.0")
            .release_date_str("2021-01-01")
            .run()
            .unwrap_err();
        assert_eq!(format!("{}", err), "Missing package name!");
    }

    #[test]
    fn test_missing_package_version() {
        let err = Check::builder("test", "")
            .release_date_str("2021-01-01")
            .run()
            .unwrap_err();
        assert_eq!(format!("{}", err), "Missing package version!");
    }

    #[test]
    fn test_missing_release_date() {
        let err = Check::builder("test", "1.0").run().unwrap_err();
        assert_eq!(format!("{}", err), "Missing release date!");
    }

    #[test]
    fn test_nonexistent_calendar_date() {
        let err = Check::builder("test", "1.0")
            .release_date_str("2021-02-30")
            .run()
            .unwrap_err();
        assert!(matches!(err, CompatError::MalformedDate { .. }));
    }

    #[test]
    fn test_garbage_date_string() {
        let err = Check::builder("test", "1.0")
            .release_date_str("Jan 1st 2021")
            .run()
            .unwrap_err();
        assert!(matches!(err, CompatError::MalformedDate { .. }));
    }

    #[test]
    fn test_minimal_check_passes() {
        let report = Check::builder("test", "1.0")
            .release_date(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap())
            .runtime(fixed_runtime())
            .run()
            .unwrap();
        assert_eq!(report.context.package_name, "test");
        assert_eq!(report.interpreter, None);
        assert_eq!(report.os, None);
        assert!(!report.update_reminder);
    }

    #[test]
    fn test_name_and_version_are_trimmed() {
        let report = Check::builder("  test  ", " 1.0 ")
            .release_date_str("2021-01-01")
            .runtime(fixed_runtime())
            .run()
            .unwrap();
        assert_eq!(report.context.package_name, "test");
        assert_eq!(report.context.package_version, "1.0");
    }

    #[test]
    fn test_interpreter_policy_requires_runtime_version() {
        let err = Check::builder("test", "1.0")
            .release_date_str("2021-01-01")
            .interpreter_policy(InterpreterVersionPolicy::new("3.8", "3.9", vec![]))
            .runtime(RuntimeEnv::fixed(
                None,
                "Linux",
                NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            ))
            .run()
            .unwrap_err();
        assert_eq!(format!("{}", err), "Missing running interpreter version!");
    }

    #[test]
    fn test_blocked_interpreter_aborts() {
        let err = Check::builder("test", "1.0")
            .release_date_str("2021-01-01")
            .interpreter_policy(InterpreterVersionPolicy::new("3.8", "3.9", vec![]))
            .runtime(RuntimeEnv::fixed(
                Some(InterpreterVersion::new(3, 7)),
                "Linux",
                NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            ))
            .run()
            .unwrap_err();
        assert!(err.is_runtime_failure());
        let msg = format!("{}", err);
        assert!(msg.contains("at least version 3.8"));
        assert!(msg.contains("3.7.final"));
    }

    #[test]
    fn test_untested_interpreter_is_not_fatal() {
        let report = Check::builder("test", "1.0")
            .release_date_str("2021-01-01")
            .interpreter_policy(InterpreterVersionPolicy::new("0.0", "3.0", vec![]))
            .runtime(RuntimeEnv::fixed(
                Some(InterpreterVersion::new(3, 10)),
                "Linux",
                NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            ))
            .run()
            .unwrap();
        assert_eq!(report.interpreter, Some(InterpreterVerdict::UntestedWarning));
    }

    #[test]
    fn test_incompatible_os_aborts() {
        let mut incompatible = BTreeSet::new();
        incompatible.insert(OperatingSystem::Linux);
        let err = Check::builder("test", "1.0")
            .release_date_str("2021-01-01")
            .os_policy(OsSupportPolicy {
                incompatible,
                ..Default::default()
            })
            .runtime(fixed_runtime())
            .run()
            .unwrap_err();
        assert!(err.is_runtime_failure());
    }

    #[test]
    fn test_os_abort_precedes_nag() {
        // Failure in the OS step must abort before the nag step runs.
        let mut incompatible = BTreeSet::new();
        incompatible.insert(OperatingSystem::Linux);
        let err = Check::builder("test", "1.0")
            .release_date_str("2021-01-01")
            .os_policy(OsSupportPolicy {
                incompatible,
                ..Default::default()
            })
            .nag_policy(NagPolicy::new(0, 100))
            .runtime(fixed_runtime())
            .run()
            .unwrap_err();
        assert!(err.is_runtime_failure());
    }

    #[test]
    fn test_nag_fires_past_threshold() {
        let report = Check::builder("test", "1.0")
            .release_date(NaiveDate::from_ymd_opt(2021, 5, 25).unwrap())
            .nag_policy(NagPolicy::new(3, 100))
            .runtime(fixed_runtime())
            .run()
            .unwrap();
        assert!(report.update_reminder);
    }

    #[test]
    fn test_nag_zero_percent_never_fires() {
        let report = Check::builder("test", "1.0")
            .release_date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
            .nag_policy(NagPolicy::new(0, 0))
            .runtime(fixed_runtime())
            .run()
            .unwrap();
        assert!(!report.update_reminder);
    }

    #[test]
    fn test_self_check_suppresses_version_info() {
        // Only verifies the self-named check still succeeds; the log
        // suppression itself has no observable return value.
        let report = Check::builder(NAME, "1.0")
            .release_date_str("2021-01-01")
            .runtime(fixed_runtime())
            .run()
            .unwrap();
        assert_eq!(report.context.package_name, NAME);
    }
}
