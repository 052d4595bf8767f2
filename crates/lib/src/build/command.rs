//! CMake invocations.
//!
//! Pure functions of a [`BuildConfig`]: the same configuration always yields
//! the same invocations, and nothing here touches the filesystem.

use std::path::PathBuf;

use crate::config::BuildConfig;
use crate::consts::{BINDING_RELATIVE_PATH, CXXFLAGS_VAR, DISABLED_BINDINGS};
use crate::execute::Invocation;

/// `cmake --version`, used to check the toolchain is present.
pub fn probe_command(cmake: &str) -> Invocation {
  Invocation::new(cmake).arg("--version")
}

/// Configure step, run inside the scratch build directory.
pub fn configure_command(config: &BuildConfig) -> Invocation {
  let os = config.os;
  let out_dir = os.render_path(&config.out_dir);

  let mut args = vec!["-LAH".to_string()];
  if os.needs_per_config_output_dir() {
    args.push(format!(
      "-DCMAKE_LIBRARY_OUTPUT_DIRECTORY_{}={}",
      config.profile.variable_suffix(),
      out_dir
    ));
  }
  args.push(format!("-DCMAKE_LIBRARY_OUTPUT_DIRECTORY={}", out_dir));
  args.push(format!("-DPython_EXECUTABLE={}", config.python_executable.to_string_lossy()));
  args.extend(DISABLED_BINDINGS.iter().map(|binding| format!("-D{}=OFF", binding)));
  args.push(format!("-DPYTHON_EXTENSION_MODULE_SUFFIX={}", os.extension_suffix()));
  args.push(os.render_path(&config.source_dir));

  Invocation::new(&config.cmake)
    .args(args)
    .cwd(&config.build_dir)
    .env(CXXFLAGS_VAR, &config.cxxflags)
}

/// Build step against the configured tree.
pub fn build_command(config: &BuildConfig) -> Invocation {
  Invocation::new(&config.cmake)
    .args(["--build", ".", "--config", config.profile.as_str(), "--"])
    .arg(config.os.parallel_flag(config.jobs))
    .cwd(&config.build_dir)
}

/// Where SWIG writes the Python binding inside the build tree.
///
/// Fixed by the upstream CMake project; the package name has no bearing on it.
pub fn binding_path(config: &BuildConfig) -> PathBuf {
  BINDING_RELATIVE_PATH
    .iter()
    .fold(config.build_dir.clone(), |path, part| path.join(part))
}
