//! CLI subcommand implementations

pub mod exec;
pub mod run;
pub mod shell;

use anyhow::{bail, Result};
use pixmill_cli::RunSummary;
#[allow(unused_imports)]
use tracing::{debug, info};

/// Turns a summary with failures into an error exit.
pub fn finish(summary: RunSummary) -> Result<()> {
    info!(performed = summary.performed, failed = summary.failed, "Finished");
    if summary.failed > 0 {
        bail!("{} command(s) failed", summary.failed);
    }
    Ok(())
}
