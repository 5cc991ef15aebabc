//! Parses the `--string` argument into raw bytes.
//!
//! The original tool treats `--string` as a raw literal with no escaping.
//! This implementation additionally accepts backslash escapes (`\n`, `\t`,
//! `\0`, `\xNN`, `\\`) so binary patterns containing unprintable bytes can be
//! expressed on the command line. A literal with no backslashes parses to
//! exactly its own bytes, so existing usages are unaffected.
//!
//! Written in the byte-signature-parser idiom this workspace's matching
//! engine is grounded on: small `nom` combinators over hex digits and a
//! handful of literal tags.

use failure::Fail;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while_m_n};
use nom::character::complete::anychar;
use nom::combinator::{map, map_res, verify};
use nom::multi::many1;
use nom::IResult;

#[derive(Debug, Fail)]
pub enum PatternError {
    #[fail(display = "could not parse --string pattern {:?}", _0)]
    Malformed(String),
}

fn is_hex_digit(c: char) -> bool {
    c.is_digit(16)
}

fn from_hex(input: &str) -> Result<u8, std::num::ParseIntError> {
    u8::from_str_radix(input, 16)
}

fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, is_hex_digit), from_hex)(input)
}

fn escape(input: &str) -> IResult<&str, u8> {
    alt((
        map(tag("\\n"), |_| b'\n'),
        map(tag("\\t"), |_| b'\t'),
        map(tag("\\0"), |_| 0u8),
        map(tag("\\\\"), |_| b'\\'),
        nom::sequence::preceded(tag("\\x"), hex_byte),
    ))(input)
}

fn literal_byte(input: &str) -> IResult<&str, u8> {
    map(verify(anychar, |c: &char| *c != '\\'), |c: char| c as u8)(input)
}

fn pattern_byte(input: &str) -> IResult<&str, u8> {
    alt((escape, literal_byte))(input)
}

/// Parse a `--string` argument into the raw bytes it represents.
pub fn parse(input: &str) -> Result<Vec<u8>, PatternError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    match many1(pattern_byte)(input) {
        Ok((rest, bytes)) if rest.is_empty() => Ok(bytes),
        _ => Err(PatternError::Malformed(input.to_string())),
    }
}
