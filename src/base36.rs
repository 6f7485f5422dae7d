//! Base36 conversion with fixed-width padding.
//!
//! Fixed-width output keeps the least significant digits: a value that needs
//! more digits than requested is clipped at the front, so `1234567890`
//! (`"kf12oi"`) rendered on 4 digits reads `"12oi"`.

use crate::error::Error;
use std::fmt;
use std::ops::Deref;

/// The digits used for base36 output, lowercase.
pub const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Maximum number of digits a [`Base36`] buffer holds.
pub const MAX_DIGITS: usize = 15;

const BASE: u64 = 36;

/// A base36 string kept on the stack.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Base36 {
    buf: [u8; MAX_DIGITS],
    len: u8,
}

impl Base36 {
    /// Returns the digits as a string slice.
    pub fn as_str(&self) -> &str {
        // ALPHABET digits and ascii pad characters only
        std::str::from_utf8(&self.buf[..self.len as usize]).unwrap_or_default()
    }

    /// Returns the digits as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl Deref for Base36 {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Base36 {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Base36 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Base36 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq<str> for Base36 {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Base36 {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Writes the digits of `n`, most significant first, into `buf` and returns
/// how many were written.
fn write_digits(mut n: u64, buf: &mut [u8; MAX_DIGITS]) -> usize {
    let mut inverted = [0u8; MAX_DIGITS];
    let mut len = 0;
    loop {
        inverted[len] = ALPHABET[(n % BASE) as usize];
        n /= BASE;
        len += 1;
        if n == 0 || len == MAX_DIGITS {
            break;
        }
    }
    for (i, digit) in inverted[..len].iter().rev().enumerate() {
        buf[i] = *digit;
    }
    len
}

/// Pads or clips `digits` to the width of `out`.
fn fit(digits: &[u8], out: &mut [u8], pad: u8) {
    let width = out.len();
    if digits.len() >= width {
        out.copy_from_slice(&digits[digits.len() - width..]);
    } else {
        let fill = width - digits.len();
        out[..fill].fill(pad);
        out[fill..].copy_from_slice(digits);
    }
}

/// Converts `n` to base36. Zero is `"0"`.
pub fn encode(n: u64) -> Base36 {
    let mut buf = [0u8; MAX_DIGITS];
    let len = write_digits(n, &mut buf);
    Base36 {
        buf,
        len: len as u8,
    }
}

/// Converts `n` to base36 on exactly `width` characters.
///
/// Shorter results are left padded with `pad`, longer ones keep their last
/// `width` digits. `pad` must be an ascii character, anything else is
/// replaced by `'0'`.
///
/// Fails with [`Error::PadWidthTooLarge`] when `width` exceeds
/// [`MAX_DIGITS`].
pub fn encode_padded(n: u64, width: u8, pad: char) -> Result<Base36, Error> {
    if width as usize > MAX_DIGITS {
        return Err(Error::PadWidthTooLarge(width));
    }
    let pad = if pad.is_ascii() { pad as u8 } else { b'0' };
    let digits = encode(n);
    let mut buf = [0u8; MAX_DIGITS];
    fit(digits.as_bytes(), &mut buf[..width as usize], pad);
    Ok(Base36 { buf, len: width })
}

/// Converts `n` to exactly `W` zero padded base36 digits.
///
/// The width is checked at compile time, so this can not fail.
pub fn encode_fixed<const W: usize>(n: u64) -> [u8; W] {
    const { assert!(W <= MAX_DIGITS, "base36 width exceeds MAX_DIGITS") };
    let digits = encode(n);
    let mut out = [0u8; W];
    fit(digits.as_bytes(), &mut out, b'0');
    out
}

/// Parses base36 digits back into a number. Upper case digits are accepted.
pub fn decode(text: &str) -> Result<u64, Error> {
    if text.is_empty() {
        return Err(Error::EmptyBase36);
    }
    text.chars().try_fold(0u64, |acc, c| {
        let digit = c.to_digit(36).ok_or(Error::InvalidBase36Digit(c))?;
        acc.checked_mul(BASE)
            .and_then(|acc| acc.checked_add(u64::from(digit)))
            .ok_or(Error::Base36Overflow)
    })
}
