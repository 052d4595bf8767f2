//! Implementation of the `nlopt-build build` command.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use nlopt_build_lib::build::Orchestrator;
use nlopt_build_lib::config::HostInfo;

use super::BuildArgs;
use crate::output::{OutputFormat, format_duration, print_json, print_stat, print_step, print_success};

/// Execute the build command.
///
/// Runs the full pipeline with the system runner and prints the files left
/// in the output directory.
pub fn cmd_build(config: Option<&Path>, args: &BuildArgs, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let resolved = args.resolve(config)?;
  let host = HostInfo::detect();

  let result = Orchestrator::system()
    .build(&resolved.target, &resolved.options, &host)
    .context("Build failed")?;

  if output.is_json() {
    print_json(&result)?;
    return Ok(());
  }

  println!();
  print_success(&format!(
    "Built {} {}",
    resolved.metadata.name, resolved.metadata.version
  ));
  print_stat("Toolchain", &result.toolchain);
  print_stat("Output", &result.out_dir.display().to_string());
  for file in &result.files {
    let name = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    print_step(&name);
  }
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
