//! Build pipeline execution.

use tracing::{debug, error, info};

use crate::config::{BuildConfig, BuildOptions, HostInfo};
use crate::execute::{CommandOutput, Invocation, Runner, SystemRunner};

use super::command::{binding_path, build_command, configure_command, probe_command};
use super::fs::{install_artifacts, list_entries, log_entries, log_tree, recreate_dir};
use super::{BuildError, BuildOutput, BuildStep, BuildTarget};

/// Drives a single build through a [`Runner`].
#[derive(Debug, Clone, Default)]
pub struct Orchestrator<R = SystemRunner> {
  runner: R,
}

impl Orchestrator<SystemRunner> {
  pub fn system() -> Self {
    Self::new(SystemRunner)
  }
}

impl<R: Runner> Orchestrator<R> {
  pub fn new(runner: R) -> Self {
    Self { runner }
  }

  pub fn runner(&self) -> &R {
    &self.runner
  }

  /// Build `target`.
  ///
  /// Resolves the configuration first, so an unsupported host fails before
  /// any subprocess runs.
  pub fn build(&self, target: &BuildTarget, options: &BuildOptions, host: &HostInfo) -> Result<BuildOutput, BuildError> {
    let config = BuildConfig::resolve(target, options, host)?;
    self.build_with(&config)
  }

  /// Run the pipeline for an already resolved configuration.
  pub fn build_with(&self, config: &BuildConfig) -> Result<BuildOutput, BuildError> {
    let toolchain = self.check_toolchain(config)?;
    info!(
      module = %config.module,
      version = %config.version,
      os = %config.os,
      profile = %config.profile,
      toolchain = %toolchain,
      "building extension"
    );
    info!(out_dir = %config.out_dir.display(), "resolved output directory");

    recreate_dir(&config.build_dir)?;

    self.execute(BuildStep::Configure, &configure_command(config))?;
    self.execute(BuildStep::Build, &build_command(config))?;

    let binding = binding_path(config);

    log_tree(&config.out_dir);
    if let Some(parent) = binding.parent() {
      log_entries(parent);
    }

    info!(
      "Attempting to copy {} from {} to {}",
      binding.file_name().map(|n| n.to_string_lossy()).unwrap_or_default(),
      binding.parent().map(|p| p.display().to_string()).unwrap_or_default(),
      config.out_dir.display()
    );
    if !binding.is_file() {
      error!(path = %binding.display(), "swig python file was not generated");
      return Err(BuildError::ArtifactMissing(binding));
    }

    let (copied, loader) = install_artifacts(&binding, &config.out_dir, &config.version)?;
    let files = list_entries(&config.out_dir)?;

    info!(out_dir = %config.out_dir.display(), files = files.len(), "package assembled");

    Ok(BuildOutput {
      out_dir: config.out_dir.clone(),
      binding: copied,
      loader,
      files,
      toolchain,
    })
  }

  /// Check the configuration tool can be invoked.
  pub fn check_toolchain(&self, config: &BuildConfig) -> Result<String, BuildError> {
    probe_toolchain(&self.runner, &config.cmake)
  }

  fn execute(&self, step: BuildStep, invocation: &Invocation) -> Result<CommandOutput, BuildError> {
    let cwd = invocation.cwd.clone().unwrap_or_default();
    info!("Running Command: {}: {}", cwd.display(), invocation.command_line());

    let output = self.runner.run(invocation).map_err(|source| BuildError::Spawn {
      step,
      command: invocation.command_line(),
      source,
    })?;

    if !output.is_success() {
      let captured = output.combined();
      error!(
        step = %step,
        cwd = %cwd.display(),
        code = ?output.code,
        "{:-^47}\n{}",
        " ERROR ",
        captured
      );
      return Err(BuildError::ExternalBuildFailure {
        step,
        command: invocation.command_line(),
        cwd,
        code: output.code,
        output: captured,
      });
    }

    debug!(step = %step, "{}", output.combined());
    Ok(output)
  }
}

/// Run `<cmake> --version`.
///
/// Returns the first line of its output. Failing to spawn the program, or a
/// non-zero exit, is [`BuildError::ToolchainMissing`].
pub fn probe_toolchain<R: Runner>(runner: &R, cmake: &str) -> Result<String, BuildError> {
  let probe = probe_command(cmake);
  debug!(command = %probe.command_line(), "probing toolchain");

  let output = runner.run(&probe).map_err(|e| BuildError::ToolchainMissing {
    program: cmake.to_string(),
    reason: e.to_string(),
  })?;

  if !output.is_success() {
    return Err(BuildError::ToolchainMissing {
      program: cmake.to_string(),
      reason: format!("`{}` exited with code {:?}", probe.command_line(), output.code),
    });
  }

  Ok(output.stdout.lines().next().unwrap_or_default().trim().to_string())
}

/// Build `target` on this host with the system runner.
pub fn build(target: &BuildTarget, options: &BuildOptions) -> Result<BuildOutput, BuildError> {
  Orchestrator::system().build(target, options, &HostInfo::detect())
}
