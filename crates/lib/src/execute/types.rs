use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A fully constructed external command.
///
/// Built once from a `BuildConfig` and never mutated, so the same
/// configuration always yields the same invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  /// Working directory; the runner's own cwd when `None`.
  pub cwd: Option<PathBuf>,
  /// Variables set on top of the inherited environment.
  pub env: BTreeMap<String, String>,
}

impl Invocation {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: None,
      env: BTreeMap::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
    self.cwd = Some(cwd.into());
    self
  }

  pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  /// Program and arguments joined by spaces, quoting arguments that
  /// contain whitespace or quotes.
  pub fn command_line(&self) -> String {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .map(quote)
      .collect::<Vec<_>>()
      .join(" ")
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (key, value) in &self.env {
      write!(f, "{}={} ", key, quote(value))?;
    }
    write!(f, "{}", self.command_line())
  }
}

fn quote(s: &str) -> String {
  if s.is_empty() {
    return "''".to_string();
  }
  if s.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
    format!("'{}'", s.replace('\'', r"'\''"))
  } else {
    s.to_string()
  }
}

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
  /// Exit code, `None` when the process was killed by a signal.
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl CommandOutput {
  pub fn success() -> Self {
    Self {
      code: Some(0),
      ..Default::default()
    }
  }

  pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
    Self {
      code: Some(code),
      stderr: stderr.into(),
      ..Default::default()
    }
  }

  pub fn is_success(&self) -> bool {
    self.code == Some(0)
  }

  /// Stdout followed by stderr, for diagnostics.
  pub fn combined(&self) -> String {
    match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
      (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr.trim_end()),
      (false, true) => self.stdout.trim_end().to_string(),
      (true, false) => self.stderr.trim_end().to_string(),
      (true, true) => String::new(),
    }
  }
}
