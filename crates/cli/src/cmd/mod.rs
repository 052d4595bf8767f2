mod build;
mod info;
mod metadata;
mod plan;

pub use build::cmd_build;
pub use info::cmd_info;
pub use metadata::cmd_metadata;
pub use plan::cmd_plan;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;

use nlopt_build_lib::build::BuildTarget;
use nlopt_build_lib::config::{BuildOptions, Profile, load_project};
use nlopt_build_lib::metadata::PackageMetadata;

/// Build settings shared by `build` and `plan`; each overrides the project file.
#[derive(Debug, Args)]
pub struct BuildArgs {
  /// NLopt source checkout (default: current directory)
  #[arg(long)]
  source_dir: Option<PathBuf>,

  /// Scratch build directory, wiped before every build
  #[arg(long)]
  build_dir: Option<PathBuf>,

  /// Package output directory (default: build/lib/nlopt)
  #[arg(long)]
  out_dir: Option<PathBuf>,

  /// Build the Debug configuration instead of Release
  #[arg(long)]
  debug: bool,

  /// Parallel compile jobs (ignored on Windows)
  #[arg(short, long)]
  jobs: Option<usize>,

  /// CMake program to invoke
  #[arg(long)]
  cmake: Option<String>,

  /// Python interpreter CMake should target
  #[arg(long)]
  python: Option<PathBuf>,
}

/// Everything a build needs from the project file and the command line.
pub struct Resolved {
  pub metadata: PackageMetadata,
  pub target: BuildTarget,
  pub options: BuildOptions,
}

impl BuildArgs {
  fn apply(&self, options: &mut BuildOptions) -> Result<()> {
    if self.jobs == Some(0) {
      bail!("--jobs must be at least 1");
    }
    if let Some(dir) = &self.source_dir {
      options.source_dir = dir.clone();
    }
    if let Some(dir) = &self.build_dir {
      options.build_dir = dir.clone();
    }
    if let Some(dir) = &self.out_dir {
      options.out_dir = Some(dir.clone());
    }
    if self.debug {
      options.profile = Profile::Debug;
    }
    if let Some(jobs) = self.jobs {
      options.jobs = jobs;
    }
    if let Some(cmake) = &self.cmake {
      options.cmake = cmake.clone();
    }
    if let Some(python) = &self.python {
      options.python_executable = Some(python.clone());
    }
    Ok(())
  }

  pub fn resolve(&self, config: Option<&Path>) -> Result<Resolved> {
    let (project, base_dir) = load_project(config, &current_dir()?)?;
    let metadata = PackageMetadata::default().with_overrides(&project.package);
    let mut options = project.build_options(&base_dir)?;
    self.apply(&mut options)?;
    let target = BuildTarget::from_metadata(&metadata)?;
    Ok(Resolved {
      metadata,
      target,
      options,
    })
  }
}

/// Declared metadata with project file overrides applied.
pub fn load_metadata(config: Option<&Path>) -> Result<PackageMetadata> {
  let (project, _) = load_project(config, &current_dir()?)?;
  Ok(PackageMetadata::default().with_overrides(&project.package))
}

fn current_dir() -> Result<PathBuf> {
  std::env::current_dir().context("Failed to determine current directory")
}
