//! Host platform detection.
//!
//! The build only distinguishes operating systems; see [`Os`] for the
//! per-platform differences in command construction and packaging.

mod os;

pub use os::Os;
