use std::io;
use std::process::Command;

use tracing::debug;

use super::types::{CommandOutput, Invocation};

/// Runs external commands to completion.
///
/// An `Err` means the process could not be spawned at all; a process that
/// ran and exited non-zero is reported through [`CommandOutput::code`].
pub trait Runner {
  fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;
}

impl<R: Runner + ?Sized> Runner for &R {
  fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
    (**self).run(invocation)
  }
}

/// Blocking runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
  fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args);
    if let Some(cwd) = &invocation.cwd {
      command.current_dir(cwd);
    }
    command.envs(&invocation.env);

    debug!(program = %invocation.program, cwd = ?invocation.cwd, "spawning process");

    let output = command.output()?;

    Ok(CommandOutput {
      code: output.status.code(),
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
  }
}
