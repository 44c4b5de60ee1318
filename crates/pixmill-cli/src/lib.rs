//! # pixmill-cli
//!
//! The pieces behind the `pixmill` binary: a registry of named images and
//! an interpreter for the line-oriented command language.
//!
//! ```text
//! load images/koala.ppm koala
//! levels-adjust 20 100 230 koala koala-lv split 50
//! compress 80 koala-lv koala-small
//! save out/koala-small.png koala-small
//! ```
//!
//! # Example
//!
//! ```rust
//! use pixmill_cli::script::Interpreter;
//! use pixmill_core::PixelBuffer;
//!
//! let mut interp = Interpreter::new(false);
//! interp.store_mut().insert("img", PixelBuffer::rgb(4, 4).unwrap());
//! let mut transcript: Vec<u8> = Vec::new();
//! interp.run_str("sepia img warm\nhorizontal-flip warm warm\n", &mut transcript).unwrap();
//! assert!(interp.store().contains("warm"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod script;
pub mod store;
pub mod verbs;

pub use script::{Interpreter, Outcome, RunSummary};
pub use store::{ImageStore, StoreError};
pub use verbs::CommandError;
