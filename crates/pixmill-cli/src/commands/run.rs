//! `pixmill run <SCRIPT>`

use crate::RunArgs;
use anyhow::Result;
use pixmill_cli::Interpreter;
use std::io;
#[allow(unused_imports)]
use tracing::{debug, trace};

pub fn run(args: RunArgs, keep_going: bool) -> Result<()> {
    trace!(script = %args.script.display(), keep_going, "run::run");
    let mut interp = Interpreter::new(keep_going);
    let stdout = io::stdout();
    let summary = interp.run_file(&args.script, &mut stdout.lock())?;
    super::finish(summary)
}
