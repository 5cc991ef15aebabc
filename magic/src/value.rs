//! Fixed-width integer extraction from a byte window.
//!
//! No I/O, no allocation: every function here is a pure combination of a
//! handful of bytes already resident in memory.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order used to combine a multi-byte field.
///
/// `Unspecified` is only a legal choice for single-byte fields (the caller
/// must enforce this; see `magic::database::validate`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
    Unspecified,
}

/// Width, in bytes, of an integer field. The only widths the magic format
/// recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    W1 = 1,
    W2 = 2,
    W4 = 4,
    W8 = 8,
}

impl Width {
    pub fn bytes(self) -> usize {
        self as usize
    }
}

/// Combine `width` consecutive bytes from `window[offset..]` under `endian`
/// into a `u64`.
///
/// # Panics
///
/// Panics if `endian` is `Unspecified` and `width != W1` (a malformed-rule
/// condition that should have been caught by `validate` long before a value
/// is ever read), or if the window does not hold `width` bytes starting at
/// `offset` (a caller bug: range-checking is the Test Evaluator's job, not
/// this function's).
pub fn read_unsigned(window: &[u8], offset: usize, width: Width, endian: Endian) -> u64 {
    let buf = &window[offset..offset + width.bytes()];
    match (width, endian) {
        (Width::W1, _) => buf[0] as u64,
        (_, Endian::Unspecified) => {
            panic!("read_unsigned: unspecified endian for a field wider than one byte")
        }
        (Width::W2, Endian::Little) => LittleEndian::read_u16(buf) as u64,
        (Width::W2, Endian::Big) => BigEndian::read_u16(buf) as u64,
        (Width::W4, Endian::Little) => LittleEndian::read_u32(buf) as u64,
        (Width::W4, Endian::Big) => BigEndian::read_u32(buf) as u64,
        (Width::W8, Endian::Little) => LittleEndian::read_u64(buf),
        (Width::W8, Endian::Big) => BigEndian::read_u64(buf),
    }
}

/// Same combination as `read_unsigned`, then sign-extends from `width * 8`
/// bits to 64.
pub fn read_signed(window: &[u8], offset: usize, width: Width, endian: Endian) -> i64 {
    let u = read_unsigned(window, offset, width, endian);
    let bits = width.bytes() * 8;
    if bits == 64 {
        return u as i64;
    }
    let sign_bit = 1u64 << (bits - 1);
    if u & sign_bit != 0 {
        // two's complement sign extension: fill the high bits with 1s.
        (u | (!0u64 << bits)) as i64
    } else {
        u as i64
    }
}

/// Extract a printable/C-style string starting at `offset`: bytes up to
/// (not including) the first NUL or the end of the window, decoded lossily.
///
/// Used when substituting a string-typed rule's value into its message
/// template.
pub fn read_cstr(window: &[u8], offset: usize) -> String {
    if offset >= window.len() {
        return String::new();
    }
    let rest = &window[offset..];
    let end = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
    String::from_utf8_lossy(&rest[..end]).into_owned()
}
