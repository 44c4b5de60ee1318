//! `pixmill exec <COMMAND>...`

use crate::ExecArgs;
use anyhow::Result;
use pixmill_cli::Interpreter;
use std::io;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Joins the words back into script text, one command per `;`.
pub fn script_text(words: &[String]) -> String {
    words.join(" ").split(';').map(str::trim).collect::<Vec<_>>().join("\n")
}

pub fn run(args: ExecArgs, keep_going: bool) -> Result<()> {
    let text = script_text(&args.command);
    trace!(lines = text.lines().count(), keep_going, "exec::run");
    let mut interp = Interpreter::new(keep_going);
    let stdout = io::stdout();
    let summary = interp.run_str(&text, &mut stdout.lock())?;
    super::finish(summary)
}
