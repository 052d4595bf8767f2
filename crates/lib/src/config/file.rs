//! `nlopt-build.toml` project file.
//!
//! ```toml
//! [package]
//! version = "2.6.1"
//!
//! [build]
//! source_dir = "."
//! profile = "release"
//! jobs = 4
//! ```
//!
//! Relative paths are resolved against the directory containing the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{BuildOptions, Profile};
use crate::consts::CONFIG_FILE_NAME;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config file not found: {0}")]
  NotFound(PathBuf),

  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("invalid python_requires {0:?}: expected a floor such as \">=3.6\"")]
  InvalidPythonRequires(String),

  #[error("jobs must be at least 1")]
  InvalidJobs,
}

/// Overrides for the declared package metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
  pub name: Option<String>,
  pub version: Option<String>,
  pub description: Option<String>,
  pub license: Option<String>,
  pub url: Option<String>,
  pub maintainer: Option<String>,
  pub maintainer_email: Option<String>,
  pub python_requires: Option<String>,
  pub install_requires: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
  pub source_dir: Option<PathBuf>,
  pub build_dir: Option<PathBuf>,
  pub out_dir: Option<PathBuf>,
  pub profile: Option<Profile>,
  pub jobs: Option<usize>,
  pub cmake: Option<String>,
  pub python: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
  #[serde(default)]
  pub package: PackageSection,
  #[serde(default)]
  pub build: BuildSection,
}

impl ProjectFile {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Build options with file values applied over the defaults.
  pub fn build_options(&self, base_dir: &Path) -> Result<BuildOptions, ConfigError> {
    let defaults = BuildOptions::default();
    let build = &self.build;

    if build.jobs == Some(0) {
      return Err(ConfigError::InvalidJobs);
    }

    let rebase = |p: &PathBuf| if p.is_absolute() { p.clone() } else { base_dir.join(p) };

    Ok(BuildOptions {
      source_dir: rebase(build.source_dir.as_ref().unwrap_or(&defaults.source_dir)),
      build_dir: rebase(build.build_dir.as_ref().unwrap_or(&defaults.build_dir)),
      out_dir: build.out_dir.as_ref().map(rebase),
      profile: build.profile.unwrap_or(defaults.profile),
      jobs: build.jobs.unwrap_or(defaults.jobs),
      cmake: build.cmake.clone().unwrap_or(defaults.cmake),
      python_executable: build.python.clone(),
    })
  }
}

/// Load the project file.
///
/// An explicit path must exist. Otherwise `nlopt-build.toml` in `cwd` is used
/// if present, falling back to an empty file. Returns the file together with
/// the directory relative paths are resolved against.
pub fn load_project(explicit: Option<&Path>, cwd: &Path) -> Result<(ProjectFile, PathBuf), ConfigError> {
  let path = match explicit {
    Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
    Some(path) => path.to_path_buf(),
    None => {
      let candidate = cwd.join(CONFIG_FILE_NAME);
      if !candidate.exists() {
        debug!(cwd = %cwd.display(), "no project file, using defaults");
        return Ok((ProjectFile::default(), cwd.to_path_buf()));
      }
      candidate
    }
  };

  debug!(path = %path.display(), "loading project file");
  let file = ProjectFile::load(&path)?;
  let base_dir = path
    .parent()
    .filter(|p| !p.as_os_str().is_empty())
    .map(|p| if p.is_absolute() { p.to_path_buf() } else { cwd.join(p) })
    .unwrap_or_else(|| cwd.to_path_buf());
  Ok((file, base_dir))
}
