//! Subprocess execution.
//!
//! Every external tool call goes through the [`Runner`] trait so the
//! orchestrator can be driven by a fake in tests. [`SystemRunner`] is the
//! real implementation: blocking, inheriting the host environment plus the
//! invocation's overrides, with stdout and stderr captured.

mod runner;
mod types;

pub use runner::{Runner, SystemRunner};
pub use types::{CommandOutput, Invocation};
