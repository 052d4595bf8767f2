mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::BuildArgs;
use crate::output::{OutputFormat, print_error};

/// nlopt-build - Build the NLopt Python extension with CMake
#[derive(Parser)]
#[command(name = "nlopt-build")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Project file (default: ./nlopt-build.toml if present)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Configure and build NLopt, then assemble the Python package
  Build {
    #[command(flatten)]
    args: BuildArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Print the commands a build would run, without running anything
  Plan {
    #[command(flatten)]
    args: BuildArgs,
  },

  /// Show host platform and toolchain information
  Info {
    /// CMake program to probe
    #[arg(long, default_value = "cmake")]
    cmake: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Print the declared package metadata
  Metadata {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let config = cli.config.as_deref();
  let result = match cli.command {
    Commands::Build { args, output } => cmd::cmd_build(config, &args, output),
    Commands::Plan { args } => cmd::cmd_plan(config, &args),
    Commands::Info { cmake, output } => cmd::cmd_info(&cmake, output),
    Commands::Metadata { output } => cmd::cmd_metadata(config, output),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
