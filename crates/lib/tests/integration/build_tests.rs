//! End-to-end pipeline behaviour against a fake CMake.

use nlopt_build_lib::build::{BuildError, BuildStep, BuildTarget, Orchestrator};

use super::common::{FAKE_MODULE, TestEnv, entry_names};

// =============================================================================
// Success
// =============================================================================

#[test]
fn success_leaves_exactly_module_binding_and_loader() {
  let env = TestEnv::new();
  let fake = env.fake();

  let output = env.build(&fake, "linux").unwrap();

  assert_eq!(entry_names(&env.out_dir()), vec!["__init__.py", FAKE_MODULE, "nlopt.py"]);
  assert_eq!(output.files.len(), 3);
  assert_eq!(output.binding, env.out_dir().join("nlopt.py"));
  assert_eq!(output.toolchain, "cmake version 3.28.1");
  assert_eq!(
    std::fs::read_to_string(&output.binding).unwrap(),
    "# generated by swig\n"
  );
}

#[test]
fn loader_carries_target_version() {
  let env = TestEnv::new();
  let fake = env.fake();
  let target = BuildTarget::new("nlopt", "2.7.1");

  let output = Orchestrator::new(&fake)
    .build(&target, &env.options(), &env.host("linux"))
    .unwrap();

  assert_eq!(
    std::fs::read_to_string(output.loader).unwrap(),
    "from .nlopt import *\n\n__version__ = '2.7.1'\n"
  );
  let configure = &fake.configure_calls()[0];
  assert!(configure.env["CXXFLAGS"].contains("-DVERSION_INFO=\"2.7.1\""));
}

#[test]
fn renamed_package_still_finds_nlopt_binding() {
  let env = TestEnv::new();
  let fake = env.fake();
  let target = BuildTarget::new("pynlopt", "1.0.0");

  let output = Orchestrator::new(&fake)
    .build(&target, &env.options(), &env.host("linux"))
    .unwrap();

  assert_eq!(output.binding, env.out_dir().join("nlopt.py"));
  assert_eq!(entry_names(&env.out_dir()), vec!["__init__.py", FAKE_MODULE, "nlopt.py"]);
  assert_eq!(
    std::fs::read_to_string(output.loader).unwrap(),
    "from .nlopt import *\n\n__version__ = '1.0.0'\n"
  );
}

#[test]
fn pipeline_runs_probe_configure_build_in_order() {
  let env = TestEnv::new();
  let fake = env.fake();

  env.build(&fake, "linux").unwrap();

  let firsts: Vec<String> = fake.calls().iter().map(|inv| inv.args[0].clone()).collect();
  assert_eq!(firsts, vec!["--version", "-LAH", "--build"]);
  for inv in &fake.calls()[1..] {
    assert_eq!(inv.cwd.as_deref(), Some(env.build_dir().as_path()));
  }
}

// =============================================================================
// Scratch directory
// =============================================================================

#[test]
fn stale_build_dir_contents_are_removed() {
  let env = TestEnv::new();
  std::fs::create_dir_all(env.build_dir().join("CMakeFiles")).unwrap();
  std::fs::write(env.build_dir().join("CMakeCache.txt"), "stale cache").unwrap();
  std::fs::write(env.build_dir().join("CMakeFiles/leftover.o"), "stale").unwrap();

  env.build(&env.fake(), "linux").unwrap();

  assert!(!env.build_dir().join("CMakeCache.txt").exists());
  assert_eq!(entry_names(&env.build_dir()), vec!["extern"]);
}

#[test]
fn repeated_builds_issue_identical_configure_commands() {
  let env = TestEnv::new();
  let fake = env.fake();

  env.build(&fake, "linux").unwrap();
  env.build(&fake, "linux").unwrap();

  let configures = fake.configure_calls();
  assert_eq!(configures.len(), 2);
  assert_eq!(configures[0], configures[1]);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn unsupported_platform_runs_no_subprocess() {
  let env = TestEnv::new();
  let fake = env.fake();

  let err = env.build(&fake, "haiku").unwrap_err();

  assert!(matches!(err, BuildError::UnsupportedPlatform(ref os) if os == "haiku"));
  assert!(fake.calls().is_empty());
  assert!(!env.build_dir().exists());
}

#[test]
fn build_dir_over_source_is_rejected_before_any_write() {
  let env = TestEnv::new();
  let fake = env.fake();
  let mut options = env.options();
  options.build_dir = env.source_dir();

  let err = Orchestrator::new(&fake)
    .build(&BuildTarget::default(), &options, &env.host("linux"))
    .unwrap_err();

  assert!(matches!(err, BuildError::BuildDirConflict { role: "source", .. }));
  assert!(fake.calls().is_empty());
  assert!(env.source_dir().join("CMakeLists.txt").exists());
}

#[test]
fn build_dir_above_source_is_rejected() {
  let env = TestEnv::new();
  let fake = env.fake();
  let mut options = env.options();
  options.build_dir = env.root.clone();

  let err = Orchestrator::new(&fake)
    .build(&BuildTarget::default(), &options, &env.host("linux"))
    .unwrap_err();

  assert!(matches!(err, BuildError::BuildDirConflict { .. }));
  assert!(env.source_dir().join("CMakeLists.txt").exists());
}

#[test]
fn missing_toolchain_writes_nothing() {
  let env = TestEnv::new();
  let mut fake = env.fake();
  fake.installed = false;

  let err = env.build(&fake, "linux").unwrap_err();

  assert!(matches!(err, BuildError::ToolchainMissing { ref program, .. } if program == "cmake"));
  assert_eq!(fake.calls().len(), 1);
  assert!(!env.out_dir().exists());
  assert!(!env.build_dir().exists());
}

#[test]
fn broken_toolchain_counts_as_missing() {
  let env = TestEnv::new();
  let mut fake = env.fake();
  fake.probe_code = 127;

  let err = env.build(&fake, "darwin").unwrap_err();

  assert!(matches!(err, BuildError::ToolchainMissing { .. }));
  assert!(!env.out_dir().exists());
}

#[test]
fn missing_binding_is_artifact_missing_without_loader() {
  let env = TestEnv::new();
  let mut fake = env.fake();
  fake.generates_binding = false;

  let err = env.build(&fake, "linux").unwrap_err();

  match err {
    BuildError::ArtifactMissing(path) => {
      assert!(path.ends_with("extern/nlopt/src/swig/nlopt.py"));
    }
    other => panic!("expected ArtifactMissing, got {other:?}"),
  }
  assert_eq!(entry_names(&env.out_dir()), vec![FAKE_MODULE]);
  assert!(!env.out_dir().join("__init__.py").exists());
}

#[test]
fn configure_failure_stops_before_build() {
  let env = TestEnv::new();
  let mut fake = env.fake();
  fake.configure_code = 1;

  let err = env.build(&fake, "linux").unwrap_err();

  match err {
    BuildError::ExternalBuildFailure { step, code, output, cwd, .. } => {
      assert_eq!(step, BuildStep::Configure);
      assert_eq!(code, Some(1));
      assert!(output.contains("fake cmake failure"));
      assert_eq!(cwd, env.build_dir());
    }
    other => panic!("expected ExternalBuildFailure, got {other:?}"),
  }
  assert_eq!(fake.calls().len(), 2);
}

#[test]
fn build_failure_is_reported_as_build_step() {
  let env = TestEnv::new();
  let mut fake = env.fake();
  fake.build_code = 2;

  let err = env.build(&fake, "windows").unwrap_err();

  assert!(matches!(
    err,
    BuildError::ExternalBuildFailure {
      step: BuildStep::Build,
      code: Some(2),
      ..
    }
  ));
  assert!(!env.out_dir().join("__init__.py").exists());
}

#[test]
fn windows_build_uses_msbuild_flags() {
  let env = TestEnv::new();
  let fake = env.fake();

  env.build(&fake, "windows").unwrap();

  let calls = fake.calls();
  assert!(calls[1].args[1].starts_with("-DCMAKE_LIBRARY_OUTPUT_DIRECTORY_RELEASE="));
  assert_eq!(calls[2].args.last().map(String::as_str), Some("-m"));
}
