use uritools::{Component, SyntaxErrorKind, Uri};

fn parse(s: &str) -> Uri {
    Uri::parse(s).unwrap_or_else(|e| panic!("{e}"))
}

#[test]
fn full_uri() {
    let uri = parse("foo://user@example.com:8042/over/there?name=ferret#nose");
    assert_eq!(uri.scheme(), Some("foo"));
    assert_eq!(uri.userinfo(), Some("user"));
    assert_eq!(uri.encoded_userinfo(), Some("user"));
    assert_eq!(uri.host(), Some("example.com"));
    assert_eq!(uri.encoded_host(), Some("example.com"));
    assert_eq!(uri.port(), Some(8042));
    assert_eq!(uri.path(), Some("/over/there"));
    assert_eq!(uri.encoded_path(), "/over/there");
    assert_eq!(uri.path_segments(), ["over", "there"]);
    assert_eq!(uri.encoded_query(), Some("name=ferret"));
    assert_eq!(uri.fragment(), Some("nose"));
    assert!(!uri.is_relative());
    assert!(!uri.is_opaque());
    assert_eq!(
        uri.as_str(),
        "foo://user@example.com:8042/over/there?name=ferret#nose"
    );
}

#[test]
fn empty_input() {
    let uri = parse("");
    assert_eq!(uri.scheme(), None);
    assert_eq!(uri.encoded_host(), None);
    assert_eq!(uri.port(), None);
    assert_eq!(uri.encoded_path(), "");
    assert_eq!(uri.path(), Some(""));
    assert!(uri.path_segments().is_empty());
    assert_eq!(uri.encoded_query(), None);
    assert_eq!(uri.encoded_fragment(), None);
    assert!(uri.is_relative());
    assert_eq!(uri.as_str(), "");
}

#[test]
fn empty_but_present_query_and_fragment() {
    let uri = parse("?#");
    assert_eq!(uri.encoded_query(), Some(""));
    assert_eq!(uri.encoded_fragment(), Some(""));
    assert_eq!(uri.query_parameters(), Some(&[][..]));
    assert_eq!(uri.fragment(), Some(""));
}

#[test]
fn encoded_slash_in_path() {
    let uri = parse("%2F");
    assert_eq!(uri.path(), None);
    assert_eq!(uri.encoded_path(), "%2F");
    assert_eq!(uri.path_segments(), ["/"]);
}

#[test]
fn query_parameters() {
    let uri = parse("?a=1&&b&c=&=d&e=f+g");
    let params = uri.query_parameters().unwrap();
    assert_eq!(
        params,
        [
            ("a".to_owned(), Some("1".to_owned())),
            ("b".to_owned(), None),
            ("c".to_owned(), Some(String::new())),
            (String::new(), Some("d".to_owned())),
            ("e".to_owned(), Some("f g".to_owned())),
        ]
    );

    // a parameter splits at its first '='
    let uri = parse("?a=b=c");
    assert_eq!(
        uri.query_parameters().unwrap(),
        [("a".to_owned(), Some("b=c".to_owned()))]
    );
}

#[test]
fn delimiter_precedence() {
    // a '#' before '?' leaves no room for a query
    let uri = parse("http://a/b#frag?not-a-query");
    assert_eq!(uri.encoded_query(), None);
    assert_eq!(uri.encoded_fragment(), Some("frag?not-a-query"));

    let uri = parse("http://a/b?x/y?z#f/g?h");
    assert_eq!(uri.encoded_query(), Some("x/y?z"));
    assert_eq!(uri.encoded_fragment(), Some("f/g?h"));
}

#[test]
fn no_scheme_with_colon_in_later_segment() {
    let uri = parse("a/b:c");
    assert_eq!(uri.scheme(), None);
    assert_eq!(uri.encoded_path(), "a/b:c");

    let uri = parse("a:b/c");
    assert_eq!(uri.scheme(), Some("a"));
    assert_eq!(uri.encoded_path(), "b/c");
}

#[test]
fn authority_forms() {
    let uri = parse("foo://");
    assert_eq!(uri.encoded_host(), Some(""));
    assert_eq!(uri.encoded_path(), "");

    let uri = parse("//host/path");
    assert!(uri.is_relative());
    assert_eq!(uri.encoded_host(), Some("host"));
    assert_eq!(uri.encoded_path(), "/path");

    let uri = parse("http://user@host");
    assert_eq!(uri.encoded_userinfo(), Some("user"));
    assert_eq!(uri.encoded_host(), Some("host"));

    // an empty port is dropped
    let uri = parse("http://host:");
    assert_eq!(uri.encoded_host(), Some("host"));
    assert_eq!(uri.port(), None);
}

#[test]
fn opaque() {
    let uri = parse("mailto:user@example.com");
    assert!(uri.is_opaque());
    assert_eq!(uri.encoded_path(), "user@example.com");

    assert!(!parse("http://a/b").is_opaque());
    assert!(!parse("a/b").is_opaque());
}

#[test]
fn idna_host_decoding() {
    let uri = parse("http://xn--0zwm56d");
    assert_eq!(uri.encoded_host(), Some("xn--0zwm56d"));
    assert_eq!(uri.host(), Some("测试"));
}

#[test]
fn percent_decoded_views() {
    let uri = parse("http://u%20ser@h/p%20ath?q#f%20rag");
    assert_eq!(uri.userinfo(), Some("u ser"));
    assert_eq!(uri.path(), Some("/p ath"));
    assert_eq!(uri.fragment(), Some("f rag"));
}

#[test]
fn errors() {
    let e = Uri::parse(":foo").unwrap_err();
    assert_eq!(e.kind(), SyntaxErrorKind::ExpectedScheme);
    assert_eq!(e.index(), Some(0));

    let e = Uri::parse("1http://a").unwrap_err();
    assert_eq!(e.kind(), SyntaxErrorKind::IllegalCharacter(Component::Scheme));
    assert_eq!(e.index(), Some(0));

    let e = Uri::parse("a b").unwrap_err();
    assert_eq!(e.kind(), SyntaxErrorKind::IllegalCharacter(Component::Path));
    assert_eq!(e.index(), Some(1));

    let e = Uri::parse("http://host:8a").unwrap_err();
    assert_eq!(e.kind(), SyntaxErrorKind::IllegalCharacter(Component::Port));

    let e = Uri::parse("http://host:99999999999").unwrap_err();
    assert_eq!(e.kind(), SyntaxErrorKind::PortTooLarge);

    let e = Uri::parse("%GG").unwrap_err();
    assert_eq!(e.kind(), SyntaxErrorKind::MalformedOctet);
    assert_eq!(e.index(), Some(0));

    let e = Uri::parse("http://ho st").unwrap_err();
    assert_eq!(e.kind(), SyntaxErrorKind::IllegalCharacter(Component::Host));

    let e = Uri::parse("café").unwrap_err();
    assert_eq!(e.kind(), SyntaxErrorKind::IllegalCharacter(Component::Path));
}

#[test]
fn round_trips() {
    for s in [
        "http://example.com/",
        "ftp://ftp.is.co.za/rfc/rfc1808.txt",
        "ldap://[2001:db8::7]/c=GB?objectClass?one",
        "mailto:John.Doe@example.com",
        "news:comp.infosystems.www.servers.unix",
        "tel:+1-816-555-1212",
        "telnet://192.0.2.16:80/",
        "urn:oasis:names:specification:docbook:dtd:xml:4.1.2",
        "//relative/with/authority",
        "?query-only",
        "#fragment-only",
    ] {
        assert_eq!(parse(s).as_str(), s);
        assert_eq!(parse(s).to_string(), s);
    }
}

#[test]
fn from_str_and_try_from() {
    let uri: Uri = "http://a/b".parse().unwrap();
    assert_eq!(uri.as_str(), "http://a/b");
    let uri = Uri::try_from("http://a/c").unwrap();
    assert_eq!(uri.as_str(), "http://a/c");
}

#[test]
fn as_builder_round_trip() {
    let uri = parse("foo://user@example.com:8042/over/there?name=ferret#nose");
    let rebuilt = uri.as_builder().build().unwrap();
    assert_eq!(rebuilt, uri);
    assert_eq!(rebuilt.as_str(), uri.as_str());
}
