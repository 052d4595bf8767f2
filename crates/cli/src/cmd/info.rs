use anyhow::Result;
use serde::Serialize;

use nlopt_build_lib::build::probe_toolchain;
use nlopt_build_lib::config::HostInfo;
use nlopt_build_lib::execute::SystemRunner;
use nlopt_build_lib::platform::Os;

use crate::output::{OutputFormat, print_json, print_stat, print_warning};

#[derive(Serialize)]
struct InfoReport {
  version: &'static str,
  os: String,
  arch: &'static str,
  supported: bool,
  python: String,
  cmake: Option<String>,
  cmake_error: Option<String>,
}

pub fn cmd_info(cmake: &str, output: OutputFormat) -> Result<()> {
  let host = HostInfo::detect();
  let probe = probe_toolchain(&SystemRunner, cmake);

  let report = InfoReport {
    version: env!("CARGO_PKG_VERSION"),
    supported: Os::parse(&host.os).is_some(),
    os: host.os,
    arch: std::env::consts::ARCH,
    python: host.python_executable.display().to_string(),
    cmake: probe.as_ref().ok().cloned(),
    cmake_error: probe.as_ref().err().map(|e| e.to_string()),
  };

  if output.is_json() {
    return print_json(&report);
  }

  println!("System:");
  print_stat("OS", &report.os);
  print_stat("Arch", report.arch);
  print_stat("Supported", if report.supported { "yes" } else { "no" });
  print_stat("Python", &report.python);
  match (&report.cmake, &report.cmake_error) {
    (Some(version), _) => print_stat("CMake", version),
    (None, Some(err)) => print_warning(err),
    (None, None) => {}
  }

  Ok(())
}
