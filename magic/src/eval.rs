//! The Test Evaluator: given one rule and a byte window, decide
//! success/failure/invalid and render the rule's message fragment.

use crate::rule::{IntTest, Rule, RuleKind, StringTest};
use crate::template::{self, Arg};
use crate::{date, value};

/// Outcome of evaluating one rule. `Invalid`'s fragment is non-empty only
/// when the rule was demoted by `tag_invalid` (an unevaluable rule carries
/// an empty fragment, so a rule that's out of range for this blocksize
/// doesn't spam the same empty diagnostic on every window).
pub enum Outcome {
    Success(String),
    Failure,
    Invalid(String),
}

/// Evaluate `rule` against `window`, which is exactly `blocksize` bytes.
pub fn evaluate(window: &[u8], rule: &Rule, blocksize: usize) -> Outcome {
    // Range check: a rule whose field would run past the end of the window
    // is unevaluable. The original fsfuzz tool checks `offset > B`, which
    // under-counts by the field's width and can read past the window when
    // offset == B; this checks the full `offset + width` instead.
    if rule.offset + rule.kind.width() > blocksize {
        return Outcome::Invalid(String::new());
    }

    let (matched, arg) = match &rule.kind {
        RuleKind::String { literal, test } => {
            let window_slice = &window[rule.offset..rule.offset + literal.len()];
            let equal = window_slice == literal.as_slice();
            let matched = match test {
                StringTest::Equal => equal,
                StringTest::NotEqual => !equal,
            };
            let s = value::read_cstr(window, rule.offset);
            (matched, Arg::Str(s))
        }
        RuleKind::SignedDate { endian } => {
            let raw = value::read_signed(window, rule.offset, crate::value::Width::W4, *endian);
            let formatted = date::format_local(raw);
            (true, Arg::Date(formatted))
        }
        RuleKind::UnsignedDate { endian } => {
            let raw = value::read_unsigned(window, rule.offset, crate::value::Width::W4, *endian);
            let formatted = date::format_local(raw as i64);
            (true, Arg::Date(formatted))
        }
        RuleKind::SignedInt {
            width,
            endian,
            test,
            comparand,
        } => {
            let v = value::read_signed(window, rule.offset, *width, *endian);
            (eval_signed_test(*test, v, *comparand), Arg::Int(v))
        }
        RuleKind::UnsignedInt {
            width,
            endian,
            test,
            comparand,
            ..
        } => {
            let raw = value::read_unsigned(window, rule.offset, *width, *endian);
            let v = rule.apply_numeric_op(raw);
            (eval_unsigned_test(*test, v, *comparand), Arg::Int(v as i64))
        }
    };

    if !matched {
        return Outcome::Failure;
    }

    let fragment = render_fragment(rule, arg);

    if rule.tag_invalid {
        Outcome::Invalid(fragment)
    } else {
        Outcome::Success(fragment)
    }
}

fn eval_signed_test(test: IntTest, v: i64, comparand: i64) -> bool {
    match test {
        IntTest::AlwaysTrue => true,
        IntTest::Equal => v == comparand,
        IntTest::LessThan => v < comparand,
        IntTest::GreaterThan => v > comparand,
        IntTest::NotEqual => v != comparand,
        IntTest::AllBitsSet => (v & comparand) == comparand,
    }
}

fn eval_unsigned_test(test: IntTest, v: u64, comparand: u64) -> bool {
    match test {
        IntTest::AlwaysTrue => true,
        IntTest::Equal => v == comparand,
        IntTest::LessThan => v < comparand,
        IntTest::GreaterThan => v > comparand,
        IntTest::NotEqual => v != comparand,
        IntTest::AllBitsSet => (v & comparand) == comparand,
    }
}

fn render_fragment(rule: &Rule, arg: Arg) -> String {
    let mut out = String::new();
    if !rule.flag_no_space {
        out.push(' ');
    }
    let substituted = if rule.message_has_argument {
        template::render(rule.message, Some(arg))
    } else {
        template::render(rule.message, None)
    };
    out.push_str(&substituted);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{NumericOp, Rule, RuleKind};
    use crate::value::{Endian, Width};

    fn string_rule(offset: usize, literal: &[u8], test: StringTest, message: &'static str) -> Rule {
        Rule {
            level: 0,
            offset,
            kind: RuleKind::String {
                literal: literal.to_vec(),
                test,
            },
            tag_invalid: false,
            flag_no_space: false,
            message_has_argument: false,
            message,
        }
    }

    #[test]
    fn scenario_trivial_magic() {
        let mut image = vec![0u8; 4096];
        image[0..4].copy_from_slice(b"ABCD");
        let rule = string_rule(0, b"ABCD", StringTest::Equal, "four letters");
        match evaluate(&image, &rule, 4096) {
            Outcome::Success(frag) => assert_eq!(frag, " four letters"),
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn rule_offset_past_window_is_invalid_with_empty_fragment() {
        let image = vec![0u8; 16];
        let rule = string_rule(20, b"AB", StringTest::Equal, "never");
        match evaluate(&image, &rule, 16) {
            Outcome::Invalid(frag) => assert_eq!(frag, ""),
            _ => panic!("expected invalid"),
        }
    }

    #[test]
    fn rule_at_offset_equal_to_blocksize_is_invalid() {
        // a rule starting exactly at the end of the window has no room for
        // its field and must be invalid, not silently clamped.
        let image = vec![0u8; 16];
        let rule = Rule {
            level: 0,
            offset: 16,
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
        };
        match evaluate(&image, &rule, 16) {
            Outcome::Invalid(_) => {}
            _ => panic!("expected invalid"),
        }
    }

    #[test]
    fn tag_invalid_demotes_success_but_keeps_fragment() {
        let mut image = vec![0u8; 16];
        image[0..2].copy_from_slice(b"AB");
        let mut rule = string_rule(0, b"AB", StringTest::Equal, "demoted");
        rule.tag_invalid = true;
        match evaluate(&image, &rule, 16) {
            Outcome::Invalid(frag) => assert_eq!(frag, " demoted"),
            _ => panic!("expected invalid with rendered fragment"),
        }
    }

    #[test]
    fn xor_match_scenario() {
        // a window XOR-obfuscated with 0xAA should read back as all-0xAA
        // once the transform is reversed; big-endian DATA_UINT32 equal test.
        let image = vec![0xAAu8; 512];
        let rule = Rule {
            level: 0,
            offset: 0,
            kind: RuleKind::UnsignedInt {
                width: Width::W4,
                endian: Endian::Big,
                op: NumericOp::None,
                test: IntTest::Equal,
                comparand: 0xAAAA_AAAA,
            },
            tag_invalid: false,
            flag_no_space: false,
            message_has_argument: false,
            message: "xor match",
        };
        match evaluate(&image, &rule, 512) {
            Outcome::Success(frag) => assert_eq!(frag, " xor match"),
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn all_bits_set_with_zero_comparand_matches_everything() {
        let rule = Rule {
            level: 0,
            offset: 0,
            kind: RuleKind::UnsignedInt {
                width: Width::W1,
                endian: Endian::Unspecified,
                op: NumericOp::None,
                test: IntTest::AllBitsSet,
                comparand: 0,
            },
            tag_invalid: false,
            flag_no_space: false,
            message_has_argument: false,
            message: "always",
        };
        for byte in 0u8..=255 {
            let image = [byte];
            match evaluate(&image, &rule, 1) {
                Outcome::Success(_) => {}
                _ => panic!("expected success for byte {}", byte),
            }
        }
    }

    #[test]
    fn date_rule_always_succeeds_regardless_of_value() {
        let image = [0u8; 4];
        let rule = Rule {
            level: 0,
            offset: 0,
            kind: RuleKind::SignedDate { endian: Endian::Little },
            tag_invalid: false,
            flag_no_space: false,
            message_has_argument: true,
            message: "created {}",
        };
        match evaluate(&image, &rule, 4) {
            Outcome::Success(frag) => assert!(frag.contains("created")),
            _ => panic!("expected success"),
        }
    }
}
