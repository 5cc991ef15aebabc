//! The firmware window-scanner application: wires the `magic` signature
//! engine together with CLI parsing, file I/O, logging, and the stdout
//! reporter. See `DESIGN.md` for the module-by-module grounding.

pub mod cli;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod reporter;
pub mod scanner;
pub mod transform;

pub use error::AppError;
