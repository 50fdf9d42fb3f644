//! Percent-encoding and decoding.

use std::borrow::Cow;

use crate::error::{fail, Component, SyntaxError, SyntaxErrorKind};
use crate::mask::{self, Mask};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

fn push_pct(buf: &mut String, x: u8) {
    buf.push('%');
    buf.push(HEX_DIGITS[(x >> 4) as usize] as char);
    buf.push(HEX_DIGITS[(x & 0xf) as usize] as char);
}

/// Percent-encodes the characters of `s` that do not match `mask`,
/// with uppercase hexadecimal digits.
///
/// Characters outside ASCII are encoded as the octets of their UTF-8
/// representation. When `space_as_plus` is set, a space becomes `+`
/// instead of `%20`.
///
/// The input is returned as-is when nothing needs encoding.
pub fn encode(s: &str, mask: Mask, space_as_plus: bool) -> Cow<'_, str> {
    let mut out: Option<String> = None;
    for (i, c) in s.char_indices() {
        if mask.allows(c) {
            if let Some(buf) = &mut out {
                buf.push(c);
            }
            continue;
        }
        let buf = out.get_or_insert_with(|| String::from(&s[..i]));
        if c == ' ' && space_as_plus {
            buf.push('+');
        } else {
            let mut utf8 = [0; 4];
            for &x in c.encode_utf8(&mut utf8).as_bytes() {
                push_pct(buf, x);
            }
        }
    }
    match out {
        Some(buf) => Cow::Owned(buf),
        None => Cow::Borrowed(s),
    }
}

/// The outcome of decoding a component.
pub(crate) enum Decoded<'a> {
    /// The decoded text, with invalid UTF-8 sequences replaced by U+FFFD.
    Text(Cow<'a, str>),
    /// The component contains `%2F` and the caller forbids it.
    EncodedSlash,
}

fn hex_value(x: u8) -> Option<u8> {
    match x {
        b'0'..=b'9' => Some(x - b'0'),
        b'A'..=b'F' => Some(x - b'A' + 10),
        b'a'..=b'f' => Some(x - b'a' + 10),
        _ => None,
    }
}

pub(crate) fn decode_inner<'a>(
    s: &'a str,
    plus_as_space: bool,
    allow_encoded_slash: bool,
) -> Result<Decoded<'a>, SyntaxError> {
    if !s.contains('%') {
        let text = if plus_as_space && s.contains('+') {
            Cow::Owned(s.replace('+', " "))
        } else {
            Cow::Borrowed(s)
        };
        return Ok(Decoded::Text(text));
    }

    let bytes = s.as_bytes();
    let mut buf = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let x = bytes[i];
        if x == b'%' {
            if i + 2 >= bytes.len() {
                return fail(s, SyntaxErrorKind::MalformedOctet, i);
            }
            let octet = match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                (Some(hi), Some(lo)) => hi << 4 | lo,
                _ => return fail(s, SyntaxErrorKind::MalformedOctet, i),
            };
            if octet == b'/' && !allow_encoded_slash {
                return Ok(Decoded::EncodedSlash);
            }
            buf.push(octet);
            i += 3;
        } else {
            if x == b'+' && plus_as_space {
                buf.push(b' ');
            } else {
                buf.push(x);
            }
            i += 1;
        }
    }
    let text = String::from_utf8_lossy(&buf).into_owned();
    Ok(Decoded::Text(Cow::Owned(text)))
}

/// Decodes a percent-encoded string.
///
/// Invalid UTF-8 in the decoded octets is replaced with U+FFFD. When
/// `plus_as_space` is set, an unencoded `+` decodes to a space.
///
/// # Errors
///
/// Fails when a `%` is not followed by two hexadecimal digits.
pub fn decode(s: &str, plus_as_space: bool) -> Result<Cow<'_, str>, SyntaxError> {
    match decode_inner(s, plus_as_space, true)? {
        Decoded::Text(text) => Ok(text),
        Decoded::EncodedSlash => unreachable!(),
    }
}

/// Decodes a component that was validated on construction.
pub(crate) fn decode_validated(s: &str, plus_as_space: bool) -> String {
    match decode_inner(s, plus_as_space, true) {
        Ok(Decoded::Text(text)) => text.into_owned(),
        _ => unreachable!("component validated on construction"),
    }
}

/// Decodes a validated path, or returns `None` if it contains `%2F`.
pub(crate) fn decode_validated_path(s: &str) -> Option<String> {
    match decode_inner(s, false, false) {
        Ok(Decoded::Text(text)) => Some(text.into_owned()),
        Ok(Decoded::EncodedSlash) => None,
        Err(_) => unreachable!("path validated on construction"),
    }
}

/// Scans `s` in `start..end` for characters matching `mask`, treating
/// a percent-encoded octet as matching when the mask admits one.
///
/// Returns the index of the first non-matching character, or `end`.
///
/// # Errors
///
/// Fails when a `%` within a class admitting percent-encoded octets
/// is not followed by two hexadecimal digits.
pub(crate) fn scan(s: &str, start: usize, end: usize, mask: Mask) -> Result<usize, SyntaxError> {
    let bytes = s.as_bytes();
    let mut i = start;
    while i < end {
        let x = bytes[i];
        if x == b'%' && mask.allows_enc() {
            if i + 2 >= end
                || !mask::HEXDIG.allows_byte(bytes[i + 1])
                || !mask::HEXDIG.allows_byte(bytes[i + 2])
            {
                return fail(s, SyntaxErrorKind::MalformedOctet, i);
            }
            i += 3;
        } else if mask.allows_byte(x) {
            i += 1;
        } else {
            break;
        }
    }
    Ok(i)
}

/// Validates a whole component against `mask`.
pub(crate) fn check(s: &str, mask: Mask, component: Component) -> Result<(), SyntaxError> {
    check_range(s, 0, s.len(), mask, component)
}

/// Validates `s` in `start..end` against `mask`, reporting the
/// component name on failure.
pub(crate) fn check_range(
    s: &str,
    start: usize,
    end: usize,
    mask: Mask,
    component: Component,
) -> Result<(), SyntaxError> {
    let i = scan(s, start, end, mask)?;
    if i < end {
        return fail(s, SyntaxErrorKind::IllegalCharacter(component), i);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::{PATH, QUERY_FRAGMENT};

    #[test]
    fn borrows_when_unchanged() {
        assert!(matches!(encode("abc", PATH, false), Cow::Borrowed("abc")));
        assert!(matches!(decode("abc", false), Ok(Cow::Borrowed("abc"))));
    }

    #[test]
    fn scan_stops_at_first_mismatch() {
        assert_eq!(scan("a/b?c", 0, 5, PATH).unwrap(), 3);
        assert_eq!(scan("a%2Fb", 0, 5, PATH).unwrap(), 5);
        assert_eq!(scan("a%2Fb", 0, 5, QUERY_FRAGMENT).unwrap(), 5);
        assert!(scan("a%2", 0, 3, PATH).is_err());
        assert!(scan("a%GG", 0, 4, PATH).is_err());
    }
}
