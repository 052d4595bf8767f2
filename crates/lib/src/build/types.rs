use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, PythonAbi};
use crate::consts::{MODULE_NAME, PACKAGE_VERSION};
use crate::metadata::PackageMetadata;

/// What to build: the package name (which names the default output
/// directory) and the declared package version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
  pub module: String,
  pub version: String,
  pub abi: PythonAbi,
}

impl BuildTarget {
  pub fn new(module: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      module: module.into(),
      version: version.into(),
      abi: PythonAbi::default(),
    }
  }

  pub fn from_metadata(metadata: &PackageMetadata) -> Result<Self, ConfigError> {
    Ok(Self {
      module: metadata.name.clone(),
      version: metadata.version.clone(),
      abi: metadata.python_abi()?,
    })
  }
}

impl Default for BuildTarget {
  fn default() -> Self {
    Self::new(MODULE_NAME, PACKAGE_VERSION)
  }
}

/// External subprocess step of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStep {
  Configure,
  Build,
}

impl fmt::Display for BuildStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildStep::Configure => write!(f, "configure"),
      BuildStep::Build => write!(f, "build"),
    }
  }
}

/// Errors that abort a build.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The configuration tool could not be invoked.
  #[error("{program} must be installed: {reason}")]
  ToolchainMissing { program: String, reason: String },

  /// Host OS is not one of the supported platforms.
  #[error("unsupported os: {0}")]
  UnsupportedPlatform(String),

  /// The scratch build directory would wipe the source tree or the output.
  #[error("build directory {build_dir} overlaps {role} directory {other}")]
  BuildDirConflict {
    build_dir: PathBuf,
    role: &'static str,
    other: PathBuf,
  },

  /// A configure or build subprocess exited non-zero.
  #[error("{step} step failed with exit code {code:?}: {command}")]
  ExternalBuildFailure {
    step: BuildStep,
    command: String,
    cwd: PathBuf,
    code: Option<i32>,
    /// Captured stdout and stderr.
    output: String,
  },

  /// A configure or build subprocess could not be spawned.
  #[error("failed to run {step} step `{command}`: {source}")]
  Spawn {
    step: BuildStep,
    command: String,
    #[source]
    source: std::io::Error,
  },

  /// The build succeeded but did not generate the binding file.
  #[error("binding file was not generated: {0}")]
  ArtifactMissing(PathBuf),

  #[error("io error at {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Files present after a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutput {
  pub out_dir: PathBuf,
  /// Copied binding file (`<out>/nlopt.py`).
  pub binding: PathBuf,
  /// Loader stub (`<out>/__init__.py`).
  pub loader: PathBuf,
  /// Every entry of the output directory, sorted.
  pub files: Vec<PathBuf>,
  /// First line of `cmake --version`.
  pub toolchain: String,
}
