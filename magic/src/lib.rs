//! A `file(1)`-style hierarchical signature-matching engine, built to run
//! against in-memory byte windows rather than whole files.
//!
//! This crate is the reusable matching engine (modelled on this workspace's
//! `flirt`/byte-signature crate): it owns the rule data model, the value
//! reader, the date formatter, the test evaluator, the rule walker, the
//! signature engine and the string searcher. It performs no I/O and knows
//! nothing about CLI flags, files, or the sliding-window scan loop — see the
//! `fwscan` crate for that.

pub mod database;
pub mod date;
pub mod engine;
pub mod eval;
pub mod rule;
pub mod string_search;
pub mod template;
pub mod value;
pub mod walker;

pub use database::{validate, DatabaseError};
pub use engine::{Match, SignatureEngine};
pub use rule::{IntTest, NumericOp, Rule, RuleKind, SignatureEntry, StringTest};
pub use string_search::{StringMatch, StringSearcher};
pub use value::{Endian, Width};
