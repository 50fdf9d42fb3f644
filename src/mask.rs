//! Character classes of RFC 3986, as pairs of 64-bit masks.
//!
//! The low mask covers characters 0..64 and the high mask characters
//! 64..128; a character matches a class when its bit is set. Bit 0 of
//! the low mask never corresponds to a character (NUL is not permitted
//! anywhere in a URI) and is reserved as a flag telling whether the
//! class admits percent-encoded octets.

/// A character class.
#[derive(Clone, Copy, Debug)]
pub struct Mask {
    low: u64,
    high: u64,
}

impl Mask {
    /// Generates a mask that matches the given characters.
    pub const fn gen(mut chars: &[u8]) -> Mask {
        let (mut low, mut high) = (0u64, 0u64);
        while let [cur, rem @ ..] = chars {
            let x = *cur;
            assert!(x != 0 && x != b'%' && x < 128);
            if x < 64 {
                low |= 1 << x;
            } else {
                high |= 1 << (x - 64);
            }
            chars = rem;
        }
        Mask { low, high }
    }

    /// Generates a mask that matches the inclusive range of characters.
    pub const fn gen_range(start: u8, end: u8) -> Mask {
        assert!(start != 0 && start <= end && end < 128);
        let (mut low, mut high) = (0u64, 0u64);
        let mut x = start;
        loop {
            if x < 64 {
                low |= 1 << x;
            } else {
                high |= 1 << (x - 64);
            }
            if x == end {
                break;
            }
            x += 1;
        }
        Mask { low, high }
    }

    /// Combines two masks.
    pub const fn or(self, other: Mask) -> Mask {
        Mask {
            low: self.low | other.low,
            high: self.high | other.high,
        }
    }

    /// Removes from this mask the characters of another.
    pub const fn sub(self, other: Mask) -> Mask {
        Mask {
            low: self.low & !other.low,
            high: self.high & !other.high,
        }
    }

    /// Marks the class as admitting percent-encoded octets.
    pub const fn enc(self) -> Mask {
        Mask {
            low: self.low | 1,
            high: self.high,
        }
    }

    /// Returns `true` if the class admits percent-encoded octets.
    pub const fn allows_enc(self) -> bool {
        self.low & 1 != 0
    }

    /// Returns `true` if the character matches the class.
    ///
    /// Non-ASCII characters never match.
    pub const fn allows(self, c: char) -> bool {
        let x = c as u32;
        if x == 0 {
            false
        } else if x < 64 {
            self.low & (1 << x) != 0
        } else if x < 128 {
            self.high & (1 << (x - 64)) != 0
        } else {
            false
        }
    }

    /// Byte-level equivalent of [`allows`](Self::allows).
    pub(crate) const fn allows_byte(self, x: u8) -> bool {
        x < 128 && self.allows(x as char)
    }

    #[cfg(test)]
    pub(crate) const fn low(self) -> u64 {
        self.low
    }

    #[cfg(test)]
    pub(crate) const fn high(self) -> u64 {
        self.high
    }
}

/// ALPHA = %x41-5A / %x61-7A
pub const ALPHA: Mask = Mask::gen_range(b'A', b'Z').or(Mask::gen_range(b'a', b'z'));

/// DIGIT = %x30-39
pub const DIGIT: Mask = Mask::gen_range(b'0', b'9');

/// HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"
///
/// Lowercase hexadecimal digits are matched as well.
pub const HEXDIG: Mask = DIGIT
    .or(Mask::gen_range(b'A', b'F'))
    .or(Mask::gen_range(b'a', b'f'));

/// The class that matches nothing but percent-encoded octets.
pub const PCT_ENCODED: Mask = Mask { low: 0, high: 0 }.enc();

/// sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///            / "*" / "+" / "," / ";" / "="
pub const SUB_DELIMS: Mask = Mask::gen(b"!$&'()*+,;=");

/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
pub const UNRESERVED: Mask = ALPHA.or(DIGIT).or(Mask::gen(b"-._~"));

/// pchar = unreserved / pct-encoded / sub-delims / ":" / "@"
pub const PCHAR: Mask = UNRESERVED.or(SUB_DELIMS).or(Mask::gen(b":@")).enc();

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
pub const SCHEME: Mask = ALPHA.or(DIGIT).or(Mask::gen(b"+-."));

/// userinfo = *( unreserved / pct-encoded / sub-delims / ":" )
pub const USERINFO: Mask = UNRESERVED.or(SUB_DELIMS).or(Mask::gen(b":")).enc();

/// reg-name = *( unreserved / pct-encoded / sub-delims )
pub const REG_NAME: Mask = UNRESERVED.or(SUB_DELIMS).enc();

/// The zone ID of an IPv6 literal: unreserved characters, with
/// percent-encoded octets admitted.
pub const ZONE_ID: Mask = UNRESERVED.enc();

/// The characters that may appear anywhere in a path:
/// pchar plus the segment separator.
pub const PATH: Mask = PCHAR.or(Mask::gen(b"/"));

/// query = *( pchar / "/" / "?" ), same as fragment.
pub const QUERY_FRAGMENT: Mask = PCHAR.or(Mask::gen(b"/?"));

/// The characters that survive unencoded inside a single query
/// parameter name or value: the query class less its delimiters
/// and the plus sign.
pub const QUERY_PARAM: Mask = QUERY_FRAGMENT.sub(Mask::gen(b"&+="));
