//! Message-template substitution.
//!
//! The original magic format substitutes its message strings with a raw
//! `printf`-style call driven by the rule's declared type, which trusts the
//! database author to keep the format specifier and the data type in sync.
//! Here each template is parsed once at database load instead, verifying at
//! most one placeholder whose presence matches the rule's
//! `message_has_argument` flag, rather than trusting unchecked runtime
//! formatting.
//!
//! The placeholder token is `{}`, matched literally (no format specifiers
//! inside it — the rule's own data type already tells us whether the
//! substituted value is an integer, a string or a formatted date).

use failure::Fail;

const PLACEHOLDER: &str = "{}";

#[derive(Debug, Fail)]
pub enum TemplateError {
    #[fail(
        display = "message {:?} has {} placeholders, expected {}",
        message, found, expected
    )]
    PlaceholderCountMismatch {
        message: String,
        found: usize,
        expected: usize,
    },
}

/// A value substituted into a message template.
pub enum Arg {
    Int(i64),
    Str(String),
    Date(String),
}

/// Check that `message` has exactly one placeholder if `has_argument` is
/// true, and none otherwise. Called once per rule at database load time.
pub fn validate(message: &str, has_argument: bool) -> Result<(), TemplateError> {
    let found = message.matches(PLACEHOLDER).count();
    let expected = if has_argument { 1 } else { 0 };
    if found != expected {
        return Err(TemplateError::PlaceholderCountMismatch {
            message: message.to_string(),
            found,
            expected,
        });
    }
    Ok(())
}

/// Render `message`, substituting `arg` into its one placeholder (if any).
pub fn render(message: &str, arg: Option<Arg>) -> String {
    match arg {
        Some(Arg::Int(v)) => message.replacen(PLACEHOLDER, &v.to_string(), 1),
        Some(Arg::Str(s)) => message.replacen(PLACEHOLDER, &s, 1),
        Some(Arg::Date(s)) => message.replacen(PLACEHOLDER, &s, 1),
        None => message.to_string(),
    }
}
