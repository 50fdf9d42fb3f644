use proptest::prelude::*;
use uritools::encoding::{decode, encode};
use uritools::mask::{PCHAR, QUERY_FRAGMENT, QUERY_PARAM};
use uritools::SyntaxErrorKind;

const RAW: &str = "😃a 测试1`~!@#$%^&+=";
const ENCODED: &str = "%F0%9F%98%83a%20%E6%B5%8B%E8%AF%951%60~!@%23$%25%5E&+=";

#[test]
fn encode_query_fragment() {
    assert_eq!(encode(RAW, QUERY_FRAGMENT, false), ENCODED);
}

#[test]
fn decode_is_case_insensitive() {
    assert_eq!(decode(ENCODED, false).unwrap(), RAW);
    assert_eq!(decode(&ENCODED.to_lowercase(), false).unwrap(), RAW);
}

#[test]
fn encode_query_param() {
    assert_eq!(encode("&+= ", QUERY_PARAM, true), "%26%2B%3D+");
}

#[test]
fn plus_as_space() {
    assert_eq!(decode("a+b+c+d+e", true).unwrap(), "a b c d e");
    assert_eq!(decode("a+b", false).unwrap(), "a+b");
}

#[test]
fn malformed_octets() {
    for s in ["%EX", "abc%", "a%2", "%%33"] {
        let e = decode(s, false).unwrap_err();
        assert_eq!(e.kind(), SyntaxErrorKind::MalformedOctet);
    }
    assert_eq!(decode("abc%", false).unwrap_err().index(), Some(3));
}

#[test]
fn lossy_utf8() {
    assert_eq!(decode("%E6%B5%8B", false).unwrap(), "测");
    assert_eq!(decode("%FF", false).unwrap(), "\u{FFFD}");
    assert_eq!(decode("a%E6b", false).unwrap(), "a\u{FFFD}b");
}

#[test]
fn unchanged_input_is_borrowed() {
    assert!(matches!(
        encode("unreserved-._~", PCHAR, false),
        std::borrow::Cow::Borrowed(_)
    ));
}

proptest! {
    #[test]
    fn round_trip(s in "\\PC*") {
        let encoded = encode(&s, QUERY_FRAGMENT, false);
        prop_assert_eq!(decode(&encoded, false).unwrap(), s.as_str());
    }

    #[test]
    fn round_trip_space_as_plus(s in "\\PC*") {
        let encoded = encode(&s, QUERY_PARAM, true);
        prop_assert_eq!(decode(&encoded, true).unwrap(), s.as_str());
    }

    #[test]
    fn encoded_is_ascii(s in "\\PC*") {
        prop_assert!(encode(&s, PCHAR, false).is_ascii());
    }
}
