//! nlopt-build-lib: builds the NLopt native library and assembles the
//! `nlopt` Python extension package.
//!
//! - `build`: the orchestrator (configure, build, locate, copy, emit loader)
//! - `config`: immutable per-invocation build configuration and project file
//! - `execute`: subprocess invocations and the `Runner` seam
//! - `metadata`: declared package metadata
//! - `platform`: the closed set of supported host platforms

pub mod build;
pub mod config;
pub mod consts;
pub mod execute;
pub mod metadata;
pub mod platform;
