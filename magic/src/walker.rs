//! The Rule Walker: traverses the flat, level-indented rule list of one
//! signature entry and produces at most one combined message.
//!
//! The `file(1)` magic format's nesting isn't a conventional tree in memory:
//! it's a flat vector of rules keyed by an indentation `level`, where a
//! child immediately follows its parent and siblings share a level. The
//! cursor-based traversal below is the faithful (if slightly fiddly)
//! translation of that bookkeeping, kept in one function because splitting
//! the failure/level-down handling into a shared helper would have to thread
//! through `res`, `current_level`, `succeeded` and the cursor all the same
//! way the single loop already does.

use crate::eval::{self, Outcome};
use crate::rule::SignatureEntry;

/// Maximum supported nesting depth. The magic format this engine implements
/// rarely nests past three or four levels; this bound exists so
/// `succeeded[level]` can be a fixed-size stack array, zeroed per entry,
/// rather than a heap-allocated `Vec`.
pub const MAX_LEVELS: usize = 16;

pub enum WalkOutcome {
    NoMatch,
    Match(String),
    InvalidMatch(String),
}

pub struct WalkResult {
    pub outcome: WalkOutcome,
    /// Set when this walk hit an unevaluable (range-check-failed) rule.
    /// The caller uses this to drive the once-per-scan "blocksize is too
    /// small for at least one rule" warning.
    pub range_invalid_seen: bool,
}

/// Walk one signature entry's rules against `window`.
///
/// # Panics
///
/// Panics if a rule's `level` is `>= MAX_LEVELS`; `database::validate`
/// rejects such a database before a scan ever starts.
pub fn walk_entry(window: &[u8], entry: &SignatureEntry, blocksize: usize) -> WalkResult {
    let rules = &entry.rules;
    let n = rules.len();

    let mut succeeded = [false; MAX_LEVELS];
    let mut message = String::new();
    let mut is_invalid = false;
    let mut range_invalid_seen = false;

    let mut i = 0usize;
    while i < n {
        let current_level = rules[i].level as usize;
        let outcome = eval::evaluate(window, &rules[i], blocksize);

        let mut level_down = false;
        let mut failed = false;

        match outcome {
            Outcome::Invalid(fragment) => {
                if fragment.is_empty() {
                    range_invalid_seen = true;
                }
                is_invalid = true;
                message.push_str(&fragment);
                break;
            }
            Outcome::Success(fragment) => {
                succeeded[current_level] = true;
                message.push_str(&fragment);
                i += 1;
                if i < n && (rules[i].level as usize) >= current_level {
                    continue;
                } else if current_level > 0 {
                    level_down = true;
                } else {
                    break;
                }
            }
            Outcome::Failure => {
                failed = true;
            }
        }

        if failed || level_down {
            if current_level > 0 && succeeded[current_level - 1] {
                let old_i = i;
                if failed {
                    // skip forward past the failed rule's own children
                    // (anything deeper than this level) looking for a
                    // same-level sibling to try next.
                    loop {
                        i += 1;
                        if !(i < n && (rules[i].level as usize) > current_level) {
                            break;
                        }
                    }
                }
                if i == n {
                    // no sibling found within this entry: retreat to the
                    // parent level and resume walking from there.
                    i = old_i;
                    loop {
                        i += 1;
                        if !(i < n && (rules[i].level as usize) != current_level - 1) {
                            break;
                        }
                    }
                }
            } else {
                break;
            }
        }
    }

    let outcome = if !message.is_empty() {
        if is_invalid {
            WalkOutcome::InvalidMatch(message)
        } else {
            WalkOutcome::Match(message)
        }
    } else {
        WalkOutcome::NoMatch
    };

    WalkResult {
        outcome,
        range_invalid_seen,
    }
}
