use std::fmt;

use serde::Serialize;

/// Operating systems the extension can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  pub const ALL: [Os; 3] = [Os::Linux, Os::MacOs, Os::Windows];

  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    Self::parse(std::env::consts::OS)
  }

  /// Parse a host OS identifier as reported by `std::env::consts::OS`.
  ///
  /// `darwin` is accepted as an alias for macOS.
  pub fn parse(name: &str) -> Option<Self> {
    match name {
      "linux" => Some(Self::Linux),
      "macos" | "darwin" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }

  /// Extension module suffix handed to the configure step.
  pub fn extension_suffix(&self) -> &'static str {
    match self {
      Self::Windows => ".abi3.so",
      Self::Linux | Self::MacOs => ".abi3.pyd",
    }
  }

  /// Multi-config generators (Visual Studio) need the per-configuration
  /// output directory set as well, or artifacts land in `Release/`.
  pub fn needs_per_config_output_dir(&self) -> bool {
    matches!(self, Self::Windows)
  }

  /// Flag passed through to the native build tool after `--`.
  pub fn parallel_flag(&self, jobs: usize) -> String {
    match self {
      Self::Windows => "-m".to_string(),
      Self::Linux | Self::MacOs => format!("-j{}", jobs),
    }
  }

  /// Native files shipped inside the package on this platform.
  pub fn package_data(&self) -> &'static [&'static str] {
    match self {
      Self::Windows => &["nlopt.dll", "_nlopt.pyd"],
      Self::Linux | Self::MacOs => &["nlopt.so", "_nlopt.pyd"],
    }
  }

  /// Renders a path the way the configure step expects it.
  pub fn render_path(&self, path: &std::path::Path) -> String {
    let s = path.to_string_lossy();
    match self {
      Self::Windows => s.replace('\\', "/"),
      Self::Linux | Self::MacOs => s.into_owned(),
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
