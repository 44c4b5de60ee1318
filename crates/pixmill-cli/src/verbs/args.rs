//! Token parsing shared by the script verbs.

use std::str::FromStr;
use thiserror::Error;

/// Script line errors that happen before any image work starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The verb is not in the command table.
    #[error("unknown command '{0}'")]
    Unknown(String),

    /// Wrong number or shape of arguments.
    #[error("usage: {command} {usage}")]
    Usage {
        /// Verb as typed.
        command: String,
        /// Expected argument pattern.
        usage: &'static str,
    },

    /// A numeric argument did not parse.
    #[error("{command}: cannot parse {what} from '{value}'")]
    Parse {
        /// Verb as typed.
        command: String,
        /// Which argument.
        what: &'static str,
        /// Offending token.
        value: String,
    },

    /// `run` recursed past the nesting limit.
    #[error("scripts nested more than {0} levels deep")]
    TooDeep(usize),
}

/// How a filter-style verb picks the pixels it touches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coverage<'a> {
    /// Whole image.
    Full,
    /// Only pixels where the named mask image is not white.
    Masked(&'a str),
    /// Filtered left part, original right part.
    Split(f32),
}

/// Source, destination and coverage of a filter-style verb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterTarget<'a> {
    /// Source image name.
    pub src: &'a str,
    /// Destination image name.
    pub dst: &'a str,
    /// Pixels to operate on.
    pub coverage: Coverage<'a>,
}

/// One tokenized script line.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// Verb as typed.
    pub verb: &'a str,
    /// Tokens after the verb.
    pub args: &'a [&'a str],
}

impl<'a> Invocation<'a> {
    /// Wraps a verb and its arguments.
    pub fn new(verb: &'a str, args: &'a [&'a str]) -> Self {
        Self { verb, args }
    }

    /// Usage error for this verb.
    pub fn usage(&self, usage: &'static str) -> CommandError {
        CommandError::Usage {
            command: self.verb.to_string(),
            usage,
        }
    }

    /// Requires exactly `count` arguments.
    pub fn expect_len(&self, count: usize, usage: &'static str) -> Result<(), CommandError> {
        if self.args.len() == count {
            Ok(())
        } else {
            Err(self.usage(usage))
        }
    }

    /// Parses argument `index` as a number.
    pub fn number<T: FromStr>(&self, index: usize, what: &'static str) -> Result<T, CommandError> {
        let token = self.args.get(index).copied().unwrap_or_default();
        token.parse().map_err(|_| CommandError::Parse {
            command: self.verb.to_string(),
            what,
            value: token.to_string(),
        })
    }

    /// Accepts `fixed` arguments optionally followed by `split <p>`.
    pub fn optional_split(&self, fixed: usize, usage: &'static str) -> Result<Option<f32>, CommandError> {
        match self.args.len() {
            n if n == fixed => Ok(None),
            n if n == fixed + 2 && self.args[fixed] == "split" => {
                self.number(fixed + 1, "split percentage").map(Some)
            }
            _ => Err(self.usage(usage)),
        }
    }

    /// Accepts `<src> <dst>`, `<src> <mask> <dst>` or `<src> <dst> split <p>`.
    pub fn filter_target(&self, usage: &'static str) -> Result<FilterTarget<'a>, CommandError> {
        match *self.args {
            [src, dst] => Ok(FilterTarget {
                src,
                dst,
                coverage: Coverage::Full,
            }),
            [src, mask, dst] => Ok(FilterTarget {
                src,
                dst,
                coverage: Coverage::Masked(mask),
            }),
            [src, dst, "split", _] => Ok(FilterTarget {
                src,
                dst,
                coverage: Coverage::Split(self.number(3, "split percentage")?),
            }),
            _ => Err(self.usage(usage)),
        }
    }
}
