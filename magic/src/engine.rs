//! The Signature Engine: runs the Rule Walker over every entry in the
//! database for one window, producing structured match records.
//!
//! No stdout writes happen here — that is the `Reporter`'s job, on the
//! `fwscan` side of the workspace. This crate only ever returns data.

use std::sync::Once;

use crate::rule::SignatureEntry;
use crate::walker::{self, WalkOutcome};

/// One entry's result for one window.
pub struct Match {
    pub offset: u64,
    pub message: String,
    /// True when the entry matched but was tagged `tag_invalid`, i.e. only
    /// worth showing under `--show-invalid`.
    pub invalid: bool,
}

pub struct SignatureEngine {
    entries: Vec<SignatureEntry>,
    // The blocksize-too-small warning should only print once per run, not
    // once per window. One engine lives for the lifetime of one scan
    // (effectively the process), so a `Once` here is the safe-Rust
    // equivalent of the original's function-static `warning_printed` bool.
    blocksize_warning: Once,
}

impl SignatureEngine {
    pub fn new(entries: Vec<SignatureEntry>) -> SignatureEngine {
        SignatureEngine {
            entries,
            blocksize_warning: Once::new(),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Walk every entry against `window` (which starts at absolute file
    /// offset `offset`), returning the matches that resulted.
    pub fn scan(&self, window: &[u8], blocksize: usize, offset: u64) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut saw_range_invalid = false;

        for entry in &self.entries {
            let result = walker::walk_entry(window, entry, blocksize);
            saw_range_invalid |= result.range_invalid_seen;

            match result.outcome {
                WalkOutcome::NoMatch => {}
                WalkOutcome::Match(message) => matches.push(Match {
                    offset,
                    message,
                    invalid: false,
                }),
                WalkOutcome::InvalidMatch(message) => matches.push(Match {
                    offset,
                    message,
                    invalid: true,
                }),
            }
        }

        if saw_range_invalid {
            self.blocksize_warning.call_once(|| {
                log::warn!("blocksize is too small for at least one rule in the database");
            });
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{IntTest, NumericOp, Rule, RuleKind, StringTest};
    use crate::value::{Endian, Width};

    fn string_entry(name: &'static str, literal: &'static [u8], message: &'static str) -> SignatureEntry {
        SignatureEntry {
            name,
            rules: vec![Rule {
                level: 0,
                offset: 0,
                kind: RuleKind::String {
                    literal: literal.to_vec(),
                    test: StringTest::Equal,
                },
                tag_invalid: false,
                flag_no_space: false,
                message_has_argument: false,
                message,
            }],
        }
    }

    #[test]
    fn emits_one_line_per_matching_entry() {
        let engine = SignatureEngine::new(vec![
            string_entry("a", b"ABCD", "is-a"),
            string_entry("b", b"ZZZZ", "is-b"),
        ]);
        let mut image = vec![0u8; 4096];
        image[0..4].copy_from_slice(b"ABCD");
        let matches = engine.scan(&image, 4096, 0x10);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].offset, 0x10);
        assert_eq!(matches[0].message, " is-a");
        assert!(!matches[0].invalid);
    }

    #[test]
    fn too_small_blocksize_is_tracked_for_the_caller_to_warn_once() {
        let mut rule = Rule {
            level: 0,
            offset: 0,
            kind: RuleKind::UnsignedInt {
                width: Width::W4,
                endian: Endian::Little,
                op: NumericOp::None,
                test: IntTest::AlwaysTrue,
                comparand: 0,
            },
            tag_invalid: false,
            flag_no_space: false,
            message_has_argument: false,
            message: "x",
        };
        rule.offset = 4000;
        let engine = SignatureEngine::new(vec![SignatureEntry {
            name: "big-offset",
            rules: vec![rule],
        }]);
        let image = vec![0u8; 128];
        let matches = engine.scan(&image, 128, 0);
        assert!(matches.is_empty());
    }
}
