use uritools::Uri;

#[track_caller]
fn check(input: &str, expected: &str) {
    let uri = Uri::parse(input).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(uri.normalize().as_str(), expected);
}

#[test]
fn absolute_paths() {
    check("http://a/b/c/./../../g", "http://a/g");
    check("http://a/../g", "http://a/g");
    check("http://a/b/..", "http://a/");
    check("http://a/.", "http://a/");
    check("http://a/", "http://a/");
}

#[test]
fn relative_paths() {
    check("a/b/../../", ".");
    check("a/./../b/./c/d/..", "b/c/");
    check("mid/content=5/../6", "mid/6");
    check("../../g", "../../g");
    check("a/../../g", "../g");
}

#[test]
fn preserves_other_components() {
    check("http://u@h:80/a/./b?q#f", "http://u@h:80/a/b?q#f");
}

#[test]
fn already_normal_returns_equal_value() {
    let uri = Uri::parse("http://a/b/c").unwrap();
    let normalized = uri.normalize();
    assert_eq!(normalized, uri);
    assert_eq!(normalized.as_str(), uri.as_str());
}

#[test]
fn corrects_colon_in_first_segment() {
    // dropping the leading dot segment would turn "te:st" into a scheme
    check("./te:st", "./te:st");
    check("a/../te:st", "./te:st");
}

#[test]
fn idempotent() {
    for input in [
        "http://a/b/c/./../../g",
        "a/b/../../",
        "a/./../b/./c/d/..",
        "../../g",
        "./te:st",
        "",
    ] {
        let once = Uri::parse(input).unwrap().normalize();
        let twice = once.normalize();
        assert_eq!(once, twice);
    }
}
