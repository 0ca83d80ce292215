//! Core domain models for compat-check
//!
//! This module contains the fundamental types used throughout the library:
//! - Version parsing and (major, minor) ordering
//! - The running interpreter's version triple
//! - Operating system identification
//! - Supported message languages

mod interpreter;
mod language;
mod os;
mod version;

pub use interpreter::InterpreterVersion;
pub use language::Language;
pub use os::OperatingSystem;
pub use version::{ParsedVersion, ReleaseLevel, VersionNumber};
