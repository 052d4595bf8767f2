//! The build orchestrator.
//!
//! A build is a strictly linear pipeline:
//!
//! 1. resolve the [`BuildConfig`](crate::config::BuildConfig) (platform check)
//! 2. probe the configuration tool (`cmake --version`)
//! 3. recreate the scratch build directory
//! 4. configure, then build, via CMake
//! 5. locate the generated SWIG binding file
//! 6. copy it next to the compiled module and write the loader stub
//!
//! Every failure is fatal to the invocation; nothing is retried.
//!
//! # Submodules
//!
//! - [`command`] - Pure construction of the CMake invocations
//! - [`execute`] - The [`Orchestrator`] driving the pipeline
//! - [`fs`] - Scratch directory and artifact filesystem steps

pub mod command;
pub mod execute;
pub mod fs;
mod types;

pub use execute::{Orchestrator, build, probe_toolchain};
pub use types::*;
