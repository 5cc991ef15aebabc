//! The magic database's data model.
//!
//! The classic `file(1)` magic format encodes a rule as one struct with a
//! `data_type`/`test_type`/`operation_on_value` that are cross-validated at
//! runtime. Here the fields that only make sense together live inside one
//! `RuleKind` variant instead: a string rule simply has no operand to
//! bitwise-and; a signed integer rule simply has no operation field to
//! misuse.

use crate::value::{Endian, Width};

/// How to test a numeric value once it has been read and any
/// `NumericOp` applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntTest {
    AlwaysTrue,
    Equal,
    LessThan,
    GreaterThan,
    NotEqual,
    AllBitsSet,
}

/// How to test a byte-literal rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringTest {
    Equal,
    NotEqual,
}

/// Pre-operation applied to an unsigned value before testing. Only
/// representable on unsigned rules: the magic format forbids it for signed
/// integers outright, so `RuleKind::SignedInt` simply has no such field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericOp {
    None,
    And(u64),
    Multiply(u64),
}

impl NumericOp {
    fn apply(self, v: u64) -> u64 {
        match self {
            NumericOp::None => v,
            NumericOp::And(mask) => v & mask,
            NumericOp::Multiply(factor) => v.wrapping_mul(factor),
        }
    }
}

/// The part of a rule that varies by data type. Malformed combinations
/// (string+non-equality test, signed+pre-operation, date-as-test-subject)
/// are unrepresentable rather than runtime-checked.
#[derive(Clone, Debug)]
pub enum RuleKind {
    String {
        literal: Vec<u8>,
        test: StringTest,
    },
    SignedInt {
        width: Width,
        endian: Endian,
        test: IntTest,
        comparand: i64,
    },
    UnsignedInt {
        width: Width,
        endian: Endian,
        op: NumericOp,
        test: IntTest,
        comparand: u64,
    },
    /// 32-bit signed seconds-since-epoch. Always "succeeds": the magic
    /// format never evaluates a test condition against a date value, it
    /// just renders the formatted date whenever the rule is reached.
    SignedDate { endian: Endian },
    /// 32-bit unsigned seconds-since-epoch. Same unconditional-success
    /// behaviour as `SignedDate`.
    UnsignedDate { endian: Endian },
}

impl RuleKind {
    pub fn width(&self) -> usize {
        match self {
            RuleKind::String { literal, .. } => literal.len(),
            RuleKind::SignedInt { width, .. } => width.bytes(),
            RuleKind::UnsignedInt { width, .. } => width.bytes(),
            RuleKind::SignedDate { .. } | RuleKind::UnsignedDate { .. } => 4,
        }
    }
}

/// One row of the magic database.
#[derive(Clone, Debug)]
pub struct Rule {
    pub level: u8,
    pub offset: usize,
    pub kind: RuleKind,

    /// If set, a successful match is demoted to "invalid".
    pub tag_invalid: bool,
    /// If set, the emitted fragment has no leading space.
    pub flag_no_space: bool,
    /// If set, `message` contains one `{}`-style substitution.
    pub message_has_argument: bool,
    /// Single-substitution human-readable template.
    pub message: &'static str,
}

impl Rule {
    pub(crate) fn apply_numeric_op(&self, v: u64) -> u64 {
        match &self.kind {
            RuleKind::UnsignedInt { op, .. } => op.apply(v),
            _ => v,
        }
    }
}

/// A named set of rules; matches independently against one window.
#[derive(Clone, Debug)]
pub struct SignatureEntry {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_op_and_is_modular() {
        assert_eq!(NumericOp::And(0x0F).apply(0xFF), 0x0F);
    }

    #[test]
    fn numeric_op_multiply_wraps() {
        assert_eq!(NumericOp::Multiply(2).apply(u64::MAX), u64::MAX.wrapping_mul(2));
    }
}
