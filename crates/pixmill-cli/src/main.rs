//! pixmill - raster image editing from scripts or an interactive shell

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "pixmill")]
#[command(author, version, about = "Raster image editing via a small command language")]
#[command(long_about = "
Applies pixel transforms to named images held in memory.

Examples:
  pixmill run edit.txt                              # Execute a script file
  pixmill shell                                     # Read commands from stdin
  pixmill exec load koala.ppm k \\; sepia k s \\; save s.png s
  pixmill -v --keep-going run batch.txt             # Debug logging, continue on errors
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Default log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Continue with the next line after a failing command
    #[arg(long, global = true)]
    keep_going: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a script file line by line
    Run(RunArgs),

    /// Read commands from stdin until `quit` or end of input
    Shell,

    /// Execute commands given on the command line, separated by `;`
    Exec(ExecArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Script file
    pub script: PathBuf,
}

#[derive(Args)]
pub struct ExecArgs {
    /// Command words; `;` separates commands
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub command: Vec<String>,
}

fn init_logging(verbose: bool, level: &str) {
    let default = if verbose { "debug" } else { level };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, &cli.log_level);

    match cli.command {
        Commands::Run(args) => commands::run::run(args, cli.keep_going),
        Commands::Shell => commands::shell::run(),
        Commands::Exec(args) => commands::exec::run(args, cli.keep_going),
    }
}
