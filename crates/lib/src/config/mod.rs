//! Build configuration.
//!
//! Everything the orchestrator needs is resolved once into an immutable
//! [`BuildConfig`]: project file values, CLI overrides, and the host facts
//! captured in [`HostInfo`]. Nothing downstream reads or mutates the
//! process environment.

mod file;

pub use file::{BuildSection, ConfigError, PackageSection, ProjectFile, load_project};

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::build::{BuildError, BuildTarget};
use crate::consts::{CXXFLAGS_VAR, PYTHON_EXECUTABLE_VAR};
use crate::platform::Os;

/// Default scratch directory, relative to the working directory.
pub const DEFAULT_BUILD_DIR: &str = "build/temp";

/// Default root under which `lib/<module>` is created.
pub const DEFAULT_OUTPUT_ROOT: &str = "build/lib";

pub const DEFAULT_JOBS: usize = 2;

pub const DEFAULT_CMAKE: &str = "cmake";

/// CMake build configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
  Debug,
  #[default]
  Release,
}

impl Profile {
  pub fn from_debug(debug: bool) -> Self {
    if debug { Self::Debug } else { Self::Release }
  }

  /// Name passed to `--config`.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "Release",
    }
  }

  /// Suffix of the per-configuration CMake variables (`..._RELEASE`).
  pub fn variable_suffix(&self) -> &'static str {
    match self {
      Self::Debug => "DEBUG",
      Self::Release => "RELEASE",
    }
  }
}

impl fmt::Display for Profile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Stable-ABI floor the extension is compiled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PythonAbi {
  pub major: u8,
  pub minor: u8,
}

impl PythonAbi {
  pub const fn new(major: u8, minor: u8) -> Self {
    Self { major, minor }
  }

  /// `Py_LIMITED_API` value in `PY_VERSION_HEX` form (3.6 -> `0x03060000`).
  pub fn limited_api_hex(&self) -> String {
    format!("0x{:02X}{:02X}0000", self.major, self.minor)
  }

  pub fn limited_api_define(&self) -> String {
    format!("-DPy_LIMITED_API={}", self.limited_api_hex())
  }

  /// Parses the `>=` floor of a `python_requires` specifier such as `>=3.6`
  /// or `>=3.6, <4`.
  pub fn from_requirement(requirement: &str) -> Result<Self, ConfigError> {
    let invalid = || ConfigError::InvalidPythonRequires(requirement.to_string());

    let version = requirement
      .split(',')
      .find_map(|clause| clause.trim().strip_prefix(">="))
      .ok_or_else(invalid)?
      .trim();
    let mut parts = version.split('.');
    let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let minor = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    Ok(Self::new(major, minor))
  }
}

impl Default for PythonAbi {
  fn default() -> Self {
    Self::new(3, 6)
  }
}

/// Host facts captured once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
  /// Host OS as reported by the runtime; validated later.
  pub os: String,
  pub python_executable: PathBuf,
  /// Inherited `CXXFLAGS`, if any.
  pub cxxflags: Option<String>,
}

impl HostInfo {
  pub fn detect() -> Self {
    Self {
      os: std::env::consts::OS.to_string(),
      python_executable: std::env::var_os(PYTHON_EXECUTABLE_VAR)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_python),
      cxxflags: std::env::var(CXXFLAGS_VAR).ok().filter(|f| !f.trim().is_empty()),
    }
  }
}

#[cfg(windows)]
fn default_python() -> PathBuf {
  PathBuf::from("python")
}

#[cfg(not(windows))]
fn default_python() -> PathBuf {
  PathBuf::from("python3")
}

/// User-facing build settings, before host facts are folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
  pub source_dir: PathBuf,
  pub build_dir: PathBuf,
  /// Defaults to `build/lib/<module>` when unset.
  pub out_dir: Option<PathBuf>,
  pub profile: Profile,
  pub jobs: usize,
  pub cmake: String,
  /// Overrides [`HostInfo::python_executable`].
  pub python_executable: Option<PathBuf>,
}

impl Default for BuildOptions {
  fn default() -> Self {
    Self {
      source_dir: PathBuf::from("."),
      build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
      out_dir: None,
      profile: Profile::default(),
      jobs: DEFAULT_JOBS,
      cmake: DEFAULT_CMAKE.to_string(),
      python_executable: None,
    }
  }
}

/// Immutable configuration for a single build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  pub os: Os,
  pub profile: Profile,
  pub module: String,
  pub version: String,
  pub abi: PythonAbi,
  pub source_dir: PathBuf,
  pub build_dir: PathBuf,
  pub out_dir: PathBuf,
  pub python_executable: PathBuf,
  /// Complete `CXXFLAGS` value for the configure step.
  pub cxxflags: String,
  pub jobs: usize,
  pub cmake: String,
}

impl BuildConfig {
  /// Resolve the configuration for `target`.
  ///
  /// Fails with [`BuildError::UnsupportedPlatform`] if the host OS is not one
  /// of [`Os::ALL`], and with [`BuildError::BuildDirConflict`] if the scratch
  /// directory is, or contains, the source or output directory. Reads the
  /// filesystem only to canonicalize paths; never writes.
  pub fn resolve(target: &BuildTarget, options: &BuildOptions, host: &HostInfo) -> Result<Self, BuildError> {
    let os = Os::parse(&host.os).ok_or_else(|| BuildError::UnsupportedPlatform(host.os.clone()))?;

    let source_dir = dunce::canonicalize(&options.source_dir).map_err(|source| BuildError::Io {
      path: options.source_dir.clone(),
      source,
    })?;
    let build_dir = normalize(&options.build_dir)?;
    let out_dir = match &options.out_dir {
      Some(dir) => normalize(dir)?,
      None => normalize(&Path::new(DEFAULT_OUTPUT_ROOT).join(&target.module))?,
    };

    for (role, other) in [("source", &source_dir), ("output", &out_dir)] {
      if other.starts_with(&build_dir) {
        return Err(BuildError::BuildDirConflict {
          build_dir,
          role,
          other: other.clone(),
        });
      }
    }

    let python_executable = options
      .python_executable
      .clone()
      .unwrap_or_else(|| host.python_executable.clone());

    Ok(Self {
      os,
      profile: options.profile,
      module: target.module.clone(),
      version: target.version.clone(),
      abi: target.abi,
      source_dir,
      build_dir,
      out_dir,
      python_executable,
      cxxflags: compiler_flags(host.cxxflags.as_deref(), &target.version, &target.abi),
      jobs: options.jobs.max(1),
      cmake: options.cmake.clone(),
    })
  }
}

/// Inherited flags, then the version define, then the limited-API marker.
pub fn compiler_flags(inherited: Option<&str>, version: &str, abi: &PythonAbi) -> String {
  let mut parts = Vec::with_capacity(3);
  if let Some(flags) = inherited.map(str::trim).filter(|f| !f.is_empty()) {
    parts.push(flags.to_string());
  }
  parts.push(format!("-DVERSION_INFO=\"{}\"", version));
  parts.push(abi.limited_api_define());
  parts.join(" ")
}

/// Absolute form of `path` with `.` and `..` removed.
///
/// Symlinks are resolved through the longest existing ancestor so that paths
/// can be compared against the canonical source directory.
fn normalize(path: &Path) -> Result<PathBuf, BuildError> {
  let io_err = |source| BuildError::Io {
    path: path.to_path_buf(),
    source,
  };

  let mut lexical = PathBuf::new();
  for component in std::path::absolute(path).map_err(io_err)?.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        lexical.pop();
      }
      other => lexical.push(other),
    }
  }

  let mut existing = lexical.as_path();
  let mut rest = Vec::new();
  while !existing.exists() {
    match (existing.parent(), existing.file_name()) {
      (Some(parent), Some(name)) => {
        rest.push(name.to_os_string());
        existing = parent;
      }
      _ => return Ok(lexical),
    }
  }

  let mut resolved = dunce::canonicalize(existing).map_err(io_err)?;
  resolved.extend(rest.iter().rev());
  Ok(resolved)
}
