//! Policy structures and their evaluators
//!
//! Each policy is a read-only input supplied fresh by the caller:
//! - Interpreter-version constraints (min / max-tested / blocked versions)
//! - Operating-system support tiers (full / partial / incompatible)
//! - Update nag scheduling (age threshold + reminder probability)
//!
//! Evaluators are pure classifications over the policy plus the ambient
//! runtime; turning a verdict into a hard failure is the orchestrator's job.

mod interpreter;
mod nag;
mod os_support;

pub use interpreter::{BlockReason, InterpreterVerdict, InterpreterVersionPolicy};
pub use nag::{NagPolicy, Sampler, ThreadRngSampler};
pub use os_support::{OsSupportPolicy, OsVerdict};
