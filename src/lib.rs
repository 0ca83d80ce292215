//! compat-check - Runtime compatibility self-check library
//!
//! Embedded by other packages to validate their declared metadata against
//! the executing runtime environment at startup:
//! - Interpreter-version constraints (minimum, highest tested, blocklist)
//! - Operating-system support tiers (full / partial / incompatible)
//! - Probabilistic update reminders based on package age
//!
//! The library never patches or installs anything; it inspects state, logs
//! observations through the `log` facade, and returns a typed error when
//! the runtime is explicitly disallowed.
//!
//! ```no_run
//! use compat_check::{Check, InterpreterVersion, InterpreterVersionPolicy};
//!
//! let report = Check::builder("my-package", "2.1.0")
//!     .release_date_str("2025-11-03")
//!     .interpreter_policy(InterpreterVersionPolicy::new("3.9", "3.13", vec![]))
//!     .interpreter_version(InterpreterVersion::new(3, 12))
//!     .run()?;
//! assert!(!report.update_reminder);
//! # Ok::<(), compat_check::CompatError>(())
//! ```

pub mod check;
pub mod domain;
pub mod error;
pub mod messages;
pub mod policy;
pub mod runtime;

pub use check::{Check, CheckBuilder, CheckContext, CheckReport, NAME};
pub use domain::{InterpreterVersion, Language, OperatingSystem, ParsedVersion, ReleaseLevel};
pub use error::CompatError;
pub use policy::{
    InterpreterVerdict, InterpreterVersionPolicy, NagPolicy, OsSupportPolicy, OsVerdict, Sampler,
};
pub use runtime::RuntimeEnv;
