//! Line-oriented command interpreter.
//!
//! Reads one command per line, dispatches it through the verb table and
//! writes a transcript. Blank lines and `#` comments are skipped, `q` or
//! `quit` stops reading, and `run <path>` executes another script against
//! the same registry. A relative `run` path inside a script file resolves
//! against that file's directory.
//!
//! # Example
//!
//! ```rust
//! use pixmill_cli::script::Interpreter;
//!
//! let mut interp = Interpreter::new(true);
//! let mut transcript: Vec<u8> = Vec::new();
//! let summary = interp.run_str("# nothing loaded yet\nblur koala out\nquit\n", &mut transcript).unwrap();
//! assert_eq!(summary.failed, 1);
//! assert!(summary.quit);
//! ```

use crate::store::ImageStore;
use crate::verbs::{self, CommandError, Invocation};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
#[allow(unused_imports)]
use tracing::{debug, info, trace, warn};

/// How deep `run` may nest scripts.
pub const MAX_DEPTH: usize = 16;

/// What a single line did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank line or comment.
    Skipped,
    /// Command executed.
    Performed,
    /// `q` / `quit`.
    Quit,
}

/// Counters for one script or session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands that succeeded.
    pub performed: usize,
    /// Commands that failed. At most one unless keep-going is on.
    pub failed: usize,
    /// True if the input ended with `q` / `quit`.
    pub quit: bool,
}

/// Executes script lines against an [`ImageStore`].
#[derive(Debug, Default)]
pub struct Interpreter {
    store: ImageStore,
    keep_going: bool,
    depth: usize,
    /// Directory of the script file being executed.
    base: Option<PathBuf>,
}

impl Interpreter {
    /// New interpreter with an empty registry.
    ///
    /// With `keep_going` a failing line is reported in the transcript and
    /// the next line runs; otherwise the first failure ends the run.
    pub fn new(keep_going: bool) -> Self {
        Self {
            keep_going,
            ..Self::default()
        }
    }

    /// The image registry.
    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    /// Mutable access to the image registry.
    pub fn store_mut(&mut self) -> &mut ImageStore {
        &mut self.store
    }

    /// Executes one line. Nested scripts write their transcript to `out`.
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> Result<Outcome> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Outcome::Skipped);
        }
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(Outcome::Quit);
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = tokens.split_first() else {
            return Ok(Outcome::Skipped);
        };
        let inv = Invocation::new(verb, args);

        match verb {
            "run" => self.run_nested(&inv, out)?,
            "help" => {
                inv.expect_len(0, "")?;
                for name in verbs::VERBS.iter().chain(["run", "help", "quit"].iter()) {
                    writeln!(out, "  {}", name)?;
                }
            }
            _ => {
                let handler = verbs::lookup(verb).ok_or_else(|| CommandError::Unknown(verb.to_string()))?;
                info!(command = verb, args = args.len(), "Executing");
                handler(&mut self.store, &inv)?;
            }
        }
        Ok(Outcome::Performed)
    }

    /// Executes every line of `input`, writing a transcript to `out`.
    pub fn run_reader<R: BufRead>(&mut self, input: R, out: &mut dyn Write) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for line in input.lines() {
            let line = line.context("Failed to read command input")?;
            match self.execute(&line, out) {
                Ok(Outcome::Skipped) => {}
                Ok(Outcome::Performed) => {
                    summary.performed += 1;
                    writeln!(out, "Command performed: {}", line.trim())?;
                }
                Ok(Outcome::Quit) => {
                    summary.quit = true;
                    writeln!(out, "Exiting application")?;
                    break;
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!(line = line.trim(), error = %format!("{:#}", e), "Command failed");
                    if !self.keep_going {
                        return Err(e.context(format!("Command failed: {}", line.trim())));
                    }
                    writeln!(out, "{:#}", e)?;
                }
            }
        }
        debug!(?summary, "run finished");
        Ok(summary)
    }

    /// Executes in-memory script text.
    pub fn run_str(&mut self, text: &str, out: &mut dyn Write) -> Result<RunSummary> {
        self.run_reader(text.as_bytes(), out)
    }

    /// Executes a script file.
    pub fn run_file(&mut self, path: &Path, out: &mut dyn Write) -> Result<RunSummary> {
        let file = File::open(path).with_context(|| format!("Failed to open script: {}", path.display()))?;
        info!(path = %path.display(), depth = self.depth, "Running script");
        let dir = path.parent().map(Path::to_path_buf);
        let outer = std::mem::replace(&mut self.base, dir);
        let result = self.run_reader(BufReader::new(file), out);
        self.base = outer;
        result
    }

    /// Resolves a `run` argument against the calling script's directory.
    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn run_nested(&mut self, inv: &Invocation<'_>, out: &mut dyn Write) -> Result<()> {
        inv.expect_len(1, "<script-path>")?;
        if self.depth >= MAX_DEPTH {
            return Err(CommandError::TooDeep(MAX_DEPTH).into());
        }
        let path = self.resolve(inv.args[0]);
        debug!(path = %path.display(), "Resolved nested script");
        self.depth += 1;
        let result = self.run_file(&path, out);
        self.depth -= 1;
        let summary = result?;
        if summary.failed > 0 {
            anyhow::bail!("{} command(s) failed in {}", summary.failed, inv.args[0]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use pixmill_core::PixelBuffer;

    fn transcript(buf: &[u8]) -> String {
        String::from_utf8(buf.to_vec()).unwrap()
    }

    #[test]
    fn test_skips_comments_and_blanks() {
        let mut interp = Interpreter::new(false);
        let mut out: Vec<u8> = Vec::new();
        let summary = interp.run_str("\n   \n# comment\n", &mut out).unwrap();
        assert_eq!(summary, RunSummary::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_transcript_and_quit() {
        let mut interp = Interpreter::new(false);
        interp.store_mut().insert("img", PixelBuffer::rgb(2, 2).unwrap());
        let mut out: Vec<u8> = Vec::new();
        let summary = interp
            .run_str("brighten 10 img up\nQUIT\nsepia img never\n", &mut out)
            .unwrap();
        assert_eq!(summary.performed, 1);
        assert!(summary.quit);
        assert_eq!(
            transcript(&out),
            "Command performed: brighten 10 img up\nExiting application\n"
        );
        assert!(interp.store().contains("up"));
        assert!(!interp.store().contains("never"));
    }

    #[test]
    fn test_stops_on_first_failure() {
        let mut interp = Interpreter::new(false);
        let mut out: Vec<u8> = Vec::new();
        let err = interp.run_str("blur ghost out\nhelp\n", &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Command failed: blur ghost out");
        assert_eq!(
            err.downcast_ref::<StoreError>(),
            Some(&StoreError::NotFound("ghost".into()))
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_keep_going_reports_errors() {
        let mut interp = Interpreter::new(true);
        interp.store_mut().insert("img", PixelBuffer::rgb(2, 2).unwrap());
        let mut out: Vec<u8> = Vec::new();
        let summary = interp
            .run_str("frobnicate img\nvertical-flip img flipped\n", &mut out)
            .unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.performed, 1);
        assert_eq!(
            transcript(&out),
            "unknown command 'frobnicate'\nCommand performed: vertical-flip img flipped\n"
        );
    }

    #[test]
    fn test_nested_run() {
        let dir = tempfile::tempdir().unwrap();
        let inner = dir.path().join("inner.txt");
        std::fs::write(&inner, "brighten 5 img bright\n").unwrap();

        let mut interp = Interpreter::new(false);
        interp.store_mut().insert("img", PixelBuffer::rgb(1, 1).unwrap());
        let mut out: Vec<u8> = Vec::new();
        let script = format!("run {}\n", inner.display());
        interp.run_str(&script, &mut out).unwrap();

        assert_eq!(interp.store().get("bright").unwrap().plane(0), &[5]);
        let text = transcript(&out);
        assert!(text.starts_with("Command performed: brighten 5 img bright\n"));
        assert!(text.ends_with(&format!("Command performed: run {}\n", inner.display())));
    }

    #[test]
    fn test_nested_run_resolves_relative_to_script() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("outer.txt"), "run sub/middle.txt\n").unwrap();
        std::fs::write(dir.path().join("sub/middle.txt"), "run inner.txt\n").unwrap();
        std::fs::write(dir.path().join("sub/inner.txt"), "brighten 7 img bright\n").unwrap();

        let mut interp = Interpreter::new(false);
        interp.store_mut().insert("img", PixelBuffer::rgb(1, 1).unwrap());
        let summary = interp.run_file(&dir.path().join("outer.txt"), &mut std::io::sink()).unwrap();

        assert_eq!(summary.performed, 1);
        assert_eq!(interp.store().get("bright").unwrap().plane(0), &[7]);
        assert_eq!(interp.base, None);
    }

    #[test]
    fn test_self_recursive_script_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loop.txt");
        std::fs::write(&path, format!("run {}\n", path.display())).unwrap();

        let mut interp = Interpreter::new(false);
        let err = interp.run_file(&path, &mut std::io::sink()).unwrap_err();
        assert!(err.chain().any(|e| e.downcast_ref::<CommandError>() == Some(&CommandError::TooDeep(MAX_DEPTH))));
    }

    #[test]
    fn test_help_lists_verbs() {
        let mut interp = Interpreter::new(false);
        let mut out: Vec<u8> = Vec::new();
        interp.run_str("help\n", &mut out).unwrap();
        let text = transcript(&out);
        assert!(text.contains("  levels-adjust\n"));
        assert!(text.ends_with("Command performed: help\n"));
    }
}
