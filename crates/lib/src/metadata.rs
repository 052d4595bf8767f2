//! Declared package metadata.
//!
//! Consumed by downstream packaging tooling (wheel builders, `setup.py`
//! generators); the orchestrator itself only reads the name, version, and
//! `python_requires` floor.

use serde::Serialize;

use crate::config::{ConfigError, PackageSection, PythonAbi};
use crate::consts::{MODULE_NAME, PACKAGE_VERSION};
use crate::platform::Os;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
  pub name: String,
  pub version: String,
  pub description: String,
  pub license: String,
  pub url: String,
  pub maintainer: String,
  pub maintainer_email: String,
  pub python_requires: String,
  pub install_requires: Vec<String>,
  pub classifiers: Vec<String>,
  pub zip_safe: bool,
}

impl Default for PackageMetadata {
  fn default() -> Self {
    Self {
      name: MODULE_NAME.to_string(),
      version: PACKAGE_VERSION.to_string(),
      description: "Library for nonlinear optimization, wrapping many algorithms for global and local, \
                    constrained or unconstrained, optimization"
        .to_string(),
      license: "MIT".to_string(),
      url: "https://nlopt.readthedocs.io/en/latest/".to_string(),
      maintainer: "Daniel Bok".to_string(),
      maintainer_email: "daniel.bok@outlook.com".to_string(),
      python_requires: ">=3.6".to_string(),
      install_requires: vec!["numpy >=1.14".to_string()],
      classifiers: [
        "Development Status :: 4 - Beta",
        "Intended Audience :: Education",
        "Intended Audience :: End Users/Desktop",
        "Operating System :: MacOS",
        "Operating System :: Microsoft :: Windows",
        "Operating System :: Unix",
        "Programming Language :: C++",
        "Programming Language :: Python :: 3.6",
        "Programming Language :: Python :: 3.7",
        "Topic :: Scientific/Engineering",
      ]
      .into_iter()
      .map(String::from)
      .collect(),
      zip_safe: false,
    }
  }
}

impl PackageMetadata {
  /// Apply project file overrides on top of `self`.
  pub fn with_overrides(mut self, section: &PackageSection) -> Self {
    let PackageSection {
      name,
      version,
      description,
      license,
      url,
      maintainer,
      maintainer_email,
      python_requires,
      install_requires,
    } = section.clone();

    if let Some(name) = name {
      self.name = name;
    }
    if let Some(version) = version {
      self.version = version;
    }
    if let Some(description) = description {
      self.description = description;
    }
    if let Some(license) = license {
      self.license = license;
    }
    if let Some(url) = url {
      self.url = url;
    }
    if let Some(maintainer) = maintainer {
      self.maintainer = maintainer;
    }
    if let Some(maintainer_email) = maintainer_email {
      self.maintainer_email = maintainer_email;
    }
    if let Some(python_requires) = python_requires {
      self.python_requires = python_requires;
    }
    if let Some(install_requires) = install_requires {
      self.install_requires = install_requires;
    }
    self
  }

  /// Stable-ABI floor derived from `python_requires`.
  pub fn python_abi(&self) -> Result<PythonAbi, ConfigError> {
    PythonAbi::from_requirement(&self.python_requires)
  }

  /// Files shipped in the package directory on `os`.
  pub fn package_data(&self, os: Os) -> Vec<String> {
    os.package_data().iter().map(|f| f.to_string()).collect()
  }

  pub fn platforms(&self) -> &'static [Os] {
    &Os::ALL
  }
}
