/// Project file looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "nlopt-build.toml";

/// Python module produced by the build.
pub const MODULE_NAME: &str = "nlopt";

/// Package version declared for the distribution.
pub const PACKAGE_VERSION: &str = "2.6.1";

/// Python module generated by SWIG; the loader re-exports it.
pub const BINDING_MODULE: &str = "nlopt";

/// Generated binding file, relative to the scratch build directory.
pub const BINDING_RELATIVE_PATH: &[&str] = &["extern", "nlopt", "src", "swig", "nlopt.py"];

/// Loader stub written next to the compiled extension.
pub const LOADER_FILE_NAME: &str = "__init__.py";

/// Language bindings of the upstream project that are never built.
pub const DISABLED_BINDINGS: &[&str] = &["NLOPT_GUILE", "NLOPT_MATLAB", "NLOPT_OCTAVE"];

/// Compiler flags variable handed to the configure step.
pub const CXXFLAGS_VAR: &str = "CXXFLAGS";

/// Overrides the Python interpreter CMake is pointed at.
pub const PYTHON_EXECUTABLE_VAR: &str = "PYTHON_EXECUTABLE";
