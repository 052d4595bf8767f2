//! Shared test helpers: a scripted runner and an isolated workspace.

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

use nlopt_build_lib::build::{BuildOutput, BuildTarget, Orchestrator};
use nlopt_build_lib::config::{BuildOptions, HostInfo};
use nlopt_build_lib::execute::{CommandOutput, Invocation, Runner};
use tempfile::TempDir;

/// Compiled module the fake build step drops into the output directory.
pub const FAKE_MODULE: &str = "_nlopt.abi3.pyd";

/// Pretends to be CMake.
///
/// The configure step writes the SWIG binding into the build tree and the
/// build step writes a compiled module into `out_dir`, unless told otherwise.
pub struct FakeCmake {
  pub calls: RefCell<Vec<Invocation>>,
  pub out_dir: PathBuf,
  pub installed: bool,
  pub probe_code: i32,
  pub configure_code: i32,
  pub build_code: i32,
  pub generates_binding: bool,
}

impl FakeCmake {
  pub fn new(out_dir: &Path) -> Self {
    Self {
      calls: RefCell::new(Vec::new()),
      out_dir: out_dir.to_path_buf(),
      installed: true,
      probe_code: 0,
      configure_code: 0,
      build_code: 0,
      generates_binding: true,
    }
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.borrow().clone()
  }

  pub fn configure_calls(&self) -> Vec<Invocation> {
    self
      .calls()
      .into_iter()
      .filter(|inv| inv.args.first().map(String::as_str) == Some("-LAH"))
      .collect()
  }
}

fn exit(code: i32, stdout: &str) -> CommandOutput {
  CommandOutput {
    code: Some(code),
    stdout: stdout.to_string(),
    stderr: if code == 0 { String::new() } else { "fake cmake failure".to_string() },
  }
}

impl Runner for FakeCmake {
  fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
    self.calls.borrow_mut().push(invocation.clone());

    if !self.installed {
      return Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory"));
    }

    let cwd = invocation.cwd.clone().unwrap_or_default();
    match invocation.args.first().map(String::as_str) {
      Some("--version") => Ok(exit(self.probe_code, "cmake version 3.28.1\n")),
      Some("-LAH") => {
        if self.configure_code == 0 && self.generates_binding {
          let swig = cwd.join("extern/nlopt/src/swig");
          std::fs::create_dir_all(&swig)?;
          std::fs::write(swig.join("nlopt.py"), "# generated by swig\n")?;
        }
        Ok(exit(self.configure_code, "-- Configuring done\n"))
      }
      Some("--build") => {
        if self.build_code == 0 {
          std::fs::create_dir_all(&self.out_dir)?;
          std::fs::write(self.out_dir.join(FAKE_MODULE), b"\x7fELF")?;
        }
        Ok(exit(self.build_code, "[100%] Built target nlopt_python\n"))
      }
      other => panic!("unexpected cmake invocation: {other:?}"),
    }
  }
}

/// Isolated source tree plus build and output directories.
pub struct TestEnv {
  pub temp: TempDir,
  /// Canonical temp root, so resolved paths compare equal on macOS too.
  pub root: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();
    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::write(root.join("src/CMakeLists.txt"), "project(nlopt)\n").unwrap();
    Self { temp, root }
  }

  pub fn source_dir(&self) -> PathBuf {
    self.root.join("src")
  }

  pub fn build_dir(&self) -> PathBuf {
    self.root.join("build/temp")
  }

  pub fn out_dir(&self) -> PathBuf {
    self.root.join("build/lib/nlopt")
  }

  pub fn options(&self) -> BuildOptions {
    BuildOptions {
      source_dir: self.source_dir(),
      build_dir: self.build_dir(),
      out_dir: Some(self.out_dir()),
      ..Default::default()
    }
  }

  pub fn host(&self, os: &str) -> HostInfo {
    HostInfo {
      os: os.to_string(),
      python_executable: PathBuf::from("/usr/bin/python3"),
      cxxflags: None,
    }
  }

  pub fn fake(&self) -> FakeCmake {
    FakeCmake::new(&self.out_dir())
  }

  pub fn build(&self, fake: &FakeCmake, os: &str) -> Result<BuildOutput, nlopt_build_lib::build::BuildError> {
    Orchestrator::new(fake).build(&BuildTarget::default(), &self.options(), &self.host(os))
  }
}

/// File names directly under `dir`, sorted.
pub fn entry_names(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = std::fs::read_dir(dir)
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  names.sort();
  names
}
