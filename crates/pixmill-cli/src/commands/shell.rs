//! `pixmill shell`

use anyhow::Result;
use pixmill_cli::Interpreter;
use std::io;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Interactive sessions always keep going after a failed command.
pub fn run() -> Result<()> {
    trace!("shell::run");
    let mut interp = Interpreter::new(true);
    let stdout = io::stdout();
    let summary = interp.run_reader(io::stdin().lock(), &mut stdout.lock())?;
    debug!(?summary, "shell closed");
    Ok(())
}
