//! The magic database itself.
//!
//! The actual catalogue of known filesystem signatures is generated from an
//! external source (a converted `file(1)` magic file, or a hand-maintained
//! firmware-specific one) and is out of scope for this crate. What lives
//! here is the interface that catalogue has to satisfy
//! (`SignatureEntry`/`Rule`, see `crate::rule`) plus `validate`, the
//! load-time check that rejects a malformed database before any scanning
//! starts.
//!
//! `builtin()` below is a small illustrative catalogue — a handful of
//! well-known filesystem magic numbers, entered by hand for this workspace's
//! tests and examples — standing in for the generated artefact a real
//! deployment would produce from an actual signature converter.

use failure::Fail;

use crate::rule::{IntTest, NumericOp, Rule, RuleKind, SignatureEntry, StringTest};
use crate::template::{self, TemplateError};
use crate::value::{Endian, Width};
use crate::walker::MAX_LEVELS;

#[derive(Debug, Fail)]
pub enum DatabaseError {
    #[fail(
        display = "entry {:?}, rule {}: nesting level {} exceeds the maximum supported depth {}",
        entry, rule_index, level, max
    )]
    LevelTooDeep {
        entry: &'static str,
        rule_index: usize,
        level: u8,
        max: usize,
    },

    #[fail(
        display = "entry {:?}, rule {}: unspecified endian is only valid for single-byte fields",
        entry, rule_index
    )]
    UnspecifiedEndianOnWideField { entry: &'static str, rule_index: usize },

    #[fail(display = "entry {:?}, rule {}: {}", entry, rule_index, source)]
    BadTemplate {
        entry: &'static str,
        rule_index: usize,
        #[fail(cause)]
        source: TemplateError,
    },
}

/// Validate a compiled-in database before it is used to scan anything.
///
/// Catches the malformed-rule conditions the rule's type shape can't already
/// rule out by construction: an unspecified-endian field wider than one
/// byte, a nesting level past `MAX_LEVELS`, and a message template whose
/// placeholder count disagrees with `message_has_argument`.
pub fn validate(entries: &[SignatureEntry]) -> Result<(), DatabaseError> {
    for entry in entries {
        for (rule_index, rule) in entry.rules.iter().enumerate() {
            if rule.level as usize >= MAX_LEVELS {
                return Err(DatabaseError::LevelTooDeep {
                    entry: entry.name,
                    rule_index,
                    level: rule.level,
                    max: MAX_LEVELS,
                });
            }

            let wide_and_unspecified = match &rule.kind {
                RuleKind::UnsignedInt { width, endian, .. } | RuleKind::SignedInt { width, endian, .. } => {
                    *endian == Endian::Unspecified && *width != Width::W1
                }
                _ => false,
            };
            if wide_and_unspecified {
                return Err(DatabaseError::UnspecifiedEndianOnWideField {
                    entry: entry.name,
                    rule_index,
                });
            }

            template::validate(rule.message, rule.message_has_argument).map_err(|source| {
                DatabaseError::BadTemplate {
                    entry: entry.name,
                    rule_index,
                    source,
                }
            })?;
        }
    }
    Ok(())
}

fn string_rule(level: u8, offset: usize, literal: &'static [u8], message: &'static str) -> Rule {
    Rule {
        level,
        offset,
        kind: RuleKind::String {
            literal: literal.to_vec(),
            test: StringTest::Equal,
        },
        tag_invalid: false,
        flag_no_space: false,
        message_has_argument: false,
        message,
    }
}

fn u32le_equal(level: u8, offset: usize, comparand: u32, message: &'static str) -> Rule {
    Rule {
        level,
        offset,
        kind: RuleKind::UnsignedInt {
            width: Width::W4,
            endian: Endian::Little,
            op: NumericOp::None,
            test: IntTest::Equal,
            comparand: comparand as u64,
        },
        tag_invalid: false,
        flag_no_space: false,
        message_has_argument: false,
        message,
    }
}

fn u16le_any(level: u8, offset: usize, message: &'static str) -> Rule {
    Rule {
        level,
        offset,
        kind: RuleKind::UnsignedInt {
            width: Width::W2,
            endian: Endian::Little,
            op: NumericOp::None,
            test: IntTest::AlwaysTrue,
            comparand: 0,
        },
        tag_invalid: false,
        flag_no_space: false,
        message_has_argument: true,
        message,
    }
}

/// A small illustrative catalogue of real filesystem magic numbers. Not
/// exhaustive and not meant to be: see the module-level doc comment.
pub fn builtin() -> Vec<SignatureEntry> {
    vec![
        SignatureEntry {
            name: "squashfs-le-v4",
            rules: vec![
                string_rule(0, 0, b"hsqs", "Squashfs filesystem, little endian, version"),
                u16le_any(1, 28, "{}.x"),
            ],
        },
        SignatureEntry {
            name: "cramfs",
            rules: vec![u32le_equal(0, 0, 0x2841_1c28, "Cramfs filesystem")],
        },
        SignatureEntry {
            name: "romfs",
            rules: vec![string_rule(0, 0, b"-rom1fs-", "romfs filesystem")],
        },
        SignatureEntry {
            name: "jffs2-le",
            rules: vec![Rule {
                level: 0,
                offset: 0,
                kind: RuleKind::UnsignedInt {
                    width: Width::W2,
                    endian: Endian::Little,
                    op: NumericOp::None,
                    test: IntTest::Equal,
                    comparand: 0x1985,
                },
                tag_invalid: false,
                flag_no_space: false,
                message_has_argument: false,
                message: "JFFS2 filesystem, little endian",
            }],
        },
        SignatureEntry {
            name: "built-timestamp-demo",
            rules: vec![
                string_rule(0, 0, b"IMG1", "firmware image container,"),
                Rule {
                    level: 1,
                    offset: 8,
                    kind: RuleKind::UnsignedDate { endian: Endian::Little },
                    tag_invalid: false,
                    flag_no_space: false,
                    message_has_argument: true,
                    message: "built {}",
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_database_is_valid() {
        assert!(validate(&builtin()).is_ok());
    }

    #[test]
    fn unspecified_endian_on_wide_field_is_rejected() {
        let bad = vec![SignatureEntry {
            name: "bad",
            rules: vec![Rule {
                level: 0,
                offset: 0,
                kind: RuleKind::UnsignedInt {
                    width: Width::W2,
                    endian: Endian::Unspecified,
                    op: NumericOp::None,
                    test: IntTest::AlwaysTrue,
                    comparand: 0,
                },
                tag_invalid: false,
                flag_no_space: false,
                message_has_argument: false,
                message: "x",
            }],
        }];
        assert!(matches!(
            validate(&bad),
            Err(DatabaseError::UnspecifiedEndianOnWideField { .. })
        ));
    }

    #[test]
    fn level_past_max_depth_is_rejected() {
        let bad = vec![SignatureEntry {
            name: "too-deep",
            rules: vec![Rule {
                level: MAX_LEVELS as u8,
                offset: 0,
                kind: RuleKind::UnsignedInt {
                    width: Width::W1,
                    endian: Endian::Unspecified,
                    op: NumericOp::None,
                    test: IntTest::AlwaysTrue,
                    comparand: 0,
                },
                tag_invalid: false,
                flag_no_space: false,
                message_has_argument: false,
                message: "x",
            }],
        }];
        assert!(matches!(validate(&bad), Err(DatabaseError::LevelTooDeep { .. })));
    }

    #[test]
    fn mismatched_template_placeholder_is_rejected() {
        let bad = vec![SignatureEntry {
            name: "bad-template",
            rules: vec![string_rule(0, 0, b"AB", "no placeholder but {} claims one")],
        }];
        // string_rule sets message_has_argument=false, so this message's
        // stray placeholder should fail validation.
        assert!(matches!(validate(&bad), Err(DatabaseError::BadTemplate { .. })));
    }
}
