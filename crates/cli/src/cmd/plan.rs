//! Implementation of the `nlopt-build plan` command.

use std::path::Path;

use anyhow::{Context, Result};

use nlopt_build_lib::build::command::{binding_path, build_command, configure_command, probe_command};
use nlopt_build_lib::config::{BuildConfig, HostInfo};

use super::BuildArgs;
use crate::output::{print_info, print_stat};

/// Print the resolved configuration and the commands a build would run.
pub fn cmd_plan(config: Option<&Path>, args: &BuildArgs) -> Result<()> {
  let resolved = args.resolve(config)?;
  let host = HostInfo::detect();
  let build_config =
    BuildConfig::resolve(&resolved.target, &resolved.options, &host).context("Failed to resolve build configuration")?;

  print_info("Dry run - nothing will be executed");
  print_stat("Platform", build_config.os.as_str());
  print_stat("Profile", build_config.profile.as_str());
  print_stat("Source", &build_config.source_dir.display().to_string());
  print_stat("Build dir (recreated)", &build_config.build_dir.display().to_string());
  print_stat("Output", &build_config.out_dir.display().to_string());
  print_stat("Binding", &binding_path(&build_config).display().to_string());
  println!();
  println!("{}", probe_command(&build_config.cmake));
  println!("{}", configure_command(&build_config));
  println!("{}", build_command(&build_config));

  Ok(())
}
