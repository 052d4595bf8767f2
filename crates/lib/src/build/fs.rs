//! Filesystem steps of a build.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::consts::{BINDING_MODULE, LOADER_FILE_NAME};

use super::BuildError;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> BuildError + '_ {
  move |source| BuildError::Io {
    path: path.to_path_buf(),
    source,
  }
}

/// Remove `path` if present, then create it empty.
pub fn recreate_dir(path: &Path) -> Result<(), BuildError> {
  if path.exists() {
    std::fs::remove_dir_all(path).map_err(io_err(path))?;
  }
  std::fs::create_dir_all(path).map_err(io_err(path))
}

/// Contents of the loader stub.
pub fn loader_contents(version: &str) -> String {
  format!("from .{BINDING_MODULE} import *\n\n__version__ = '{version}'\n")
}

/// Copy the binding file into `out_dir` and write the loader next to it.
///
/// Returns `(binding, loader)` paths inside `out_dir`.
pub fn install_artifacts(binding: &Path, out_dir: &Path, version: &str) -> Result<(PathBuf, PathBuf), BuildError> {
  std::fs::create_dir_all(out_dir).map_err(io_err(out_dir))?;

  let copied = out_dir.join(format!("{}.py", BINDING_MODULE));
  std::fs::copy(binding, &copied).map_err(io_err(binding))?;

  let loader = out_dir.join(LOADER_FILE_NAME);
  std::fs::write(&loader, loader_contents(version)).map_err(io_err(&loader))?;

  Ok((copied, loader))
}

/// Sorted entries directly under `dir`.
pub fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
  let mut entries = std::fs::read_dir(dir)
    .map_err(io_err(dir))?
    .map(|entry| entry.map(|e| e.path()))
    .collect::<Result<Vec<_>, _>>()
    .map_err(io_err(dir))?;
  entries.sort();
  Ok(entries)
}

/// Log every file below `dir`, for post-mortem debugging.
pub fn log_tree(dir: &Path) {
  if !dir.exists() {
    warn!(dir = %dir.display(), "directory does not exist");
    return;
  }
  let listing = WalkDir::new(dir)
    .min_depth(1)
    .sort_by_file_name()
    .into_iter()
    .filter_map(Result::ok)
    .map(|entry| format!("  - {}", entry.path().display()))
    .collect::<Vec<_>>()
    .join("\n");
  info!("Ext Dir - {}\n{}", dir.display(), listing);
}

/// Log the names of the entries directly under `dir`.
pub fn log_entries(dir: &Path) {
  match list_entries(dir) {
    Ok(entries) => {
      let listing = entries
        .iter()
        .filter_map(|p| p.file_name())
        .map(|name| format!(" - {}", name.to_string_lossy()))
        .collect::<Vec<_>>()
        .join("\n");
      info!("Files in {}\n{}", dir.display(), listing);
    }
    Err(e) => warn!(dir = %dir.display(), error = %e, "cannot list directory"),
  }
}
