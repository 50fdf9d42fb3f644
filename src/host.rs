//! Host validators: DNS-compatible hostnames and IPv6 address literals.

use crate::encoding;
use crate::error::{fail, Component, SyntaxError, SyntaxErrorKind};
use crate::mask;

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Checks that `host` is a hostname compliant with DNS: 1 to 253
/// characters of dot-separated labels, each 1 to 63 characters of
/// letters, digits and hyphens, neither starting nor ending with a
/// hyphen. A single trailing dot is permitted.
///
/// The final label must not consist solely of digits, so that a
/// hostname is never mistakable for an IPv4 address.
pub fn check_dns_host(host: &str) -> Result<(), SyntaxError> {
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return Err(SyntaxError::new(
            host,
            SyntaxErrorKind::HostnameLengthOutOfRange,
            None,
        ));
    }
    let s = host.strip_suffix('.').unwrap_or(host);
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return fail(host, SyntaxErrorKind::EmptyLabel, 0);
    }

    let mut start = 0;
    for i in 0..=bytes.len() {
        if i < bytes.len() && bytes[i] != b'.' {
            let x = bytes[i];
            if !(x.is_ascii_alphanumeric() || x == b'-') {
                return fail(host, SyntaxErrorKind::IllegalCharacter(Component::Host), i);
            }
            continue;
        }
        let label = &bytes[start..i];
        if label.is_empty() {
            return fail(host, SyntaxErrorKind::EmptyLabel, start);
        }
        if label.len() > MAX_LABEL_LEN {
            return fail(host, SyntaxErrorKind::LabelTooLong, start);
        }
        if label[0] == b'-' || label[label.len() - 1] == b'-' {
            return fail(host, SyntaxErrorKind::HyphenAtLabelBoundary, start);
        }
        if i == bytes.len() && label.iter().all(u8::is_ascii_digit) {
            return fail(host, SyntaxErrorKind::NumericFinalLabel, start);
        }
        start = i + 1;
    }
    Ok(())
}

/// Checks that `s[start..end]` is an IPv6 address, optionally followed
/// by a `%`-delimited zone ID.
///
/// When `encoded` is set the substring is taken from a percent-encoded
/// URI, so the zone ID delimiter must read `%25` and the zone ID itself
/// may contain percent-encoded octets.
///
/// Error indices refer to positions in `s`.
pub fn check_ipv6(s: &str, start: usize, end: usize, encoded: bool) -> Result<(), SyntaxError> {
    let bytes = s.as_bytes();

    let mut addr_end = end;
    if let Some(p) = bytes[start..end].iter().position(|&x| x == b'%') {
        let p = start + p;
        addr_end = p;
        let zone_start = if encoded {
            if end - p < 3 || bytes[p + 1] != b'2' || bytes[p + 2] != b'5' {
                return fail(s, SyntaxErrorKind::ExpectedPercent25, p);
            }
            p + 3
        } else {
            p + 1
        };
        if zone_start >= end {
            return fail(s, SyntaxErrorKind::EmptyZoneId, p);
        }
        let q = encoding::scan(s, zone_start, end, mask::ZONE_ID)?;
        if q < end {
            return fail(s, SyntaxErrorKind::IllegalCharacter(Component::ZoneId), q);
        }
    }

    if addr_end - start > 45 {
        return fail(s, SyntaxErrorKind::AddressTooLong, start);
    }
    if addr_end - start < 2 {
        return fail(s, SyntaxErrorKind::AddressTooShort, start);
    }

    let mut i = start;
    let mut groups = 0u32;
    let mut compressed = false;

    if bytes[i] == b':' {
        if bytes[i + 1] != b':' {
            return fail(s, SyntaxErrorKind::MalformedIpv6Address, i);
        }
        compressed = true;
        i += 2;
        if i == addr_end {
            return Ok(());
        }
    }

    loop {
        // a 16-bit hexadecimal group, or a trailing dotted-quad
        let group_start = i;
        while i < addr_end && mask::HEXDIG.allows_byte(bytes[i]) {
            i += 1;
        }
        if i < addr_end && bytes[i] == b'.' {
            check_ipv4(s, group_start, addr_end)?;
            groups += 2;
            i = addr_end;
        } else {
            let digits = i - group_start;
            if digits == 0 {
                return fail(s, SyntaxErrorKind::MalformedIpv6Address, i);
            }
            if digits > 4 {
                return fail(s, SyntaxErrorKind::HexSequenceTooLong, group_start);
            }
            groups += 1;
        }
        if i == addr_end {
            break;
        }
        if bytes[i] != b':' {
            return fail(s, SyntaxErrorKind::MalformedIpv6Address, i);
        }
        i += 1;
        if i < addr_end && bytes[i] == b':' {
            if compressed {
                return fail(s, SyntaxErrorKind::MultipleCompressions, i - 1);
            }
            compressed = true;
            i += 1;
            if i == addr_end {
                break;
            }
        } else if i == addr_end {
            // a single trailing colon
            return fail(s, SyntaxErrorKind::MalformedIpv6Address, i - 1);
        }
    }

    let legal = if compressed { groups <= 7 } else { groups == 8 };
    if !legal {
        return fail(s, SyntaxErrorKind::MalformedIpv6Address, start);
    }
    Ok(())
}

/// Checks that `s[start..end]` is a dotted-quad IPv4 address with
/// decimal octets in 0..=255 and no leading zeros.
fn check_ipv4(s: &str, start: usize, end: usize) -> Result<(), SyntaxError> {
    let bytes = s.as_bytes();
    let mut i = start;
    for octet in 0..4 {
        if octet > 0 {
            if i >= end || bytes[i] != b'.' {
                return fail(s, SyntaxErrorKind::ExpectedIpv4Address, start);
            }
            i += 1;
        }
        let digit_start = i;
        while i < end && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let digits = i - digit_start;
        if digits == 0 || digits > 3 || (digits > 1 && bytes[digit_start] == b'0') {
            return fail(s, SyntaxErrorKind::ExpectedIpv4Address, start);
        }
        let value = bytes[digit_start..i]
            .iter()
            .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
        if value > 255 {
            return fail(s, SyntaxErrorKind::ExpectedIpv4Address, start);
        }
    }
    if i != end {
        return fail(s, SyntaxErrorKind::ExpectedIpv4Address, start);
    }
    Ok(())
}
