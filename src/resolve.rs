//! Reference resolution per RFC 3986 Section 5.3.

use crate::normalize::normalize_path;
use crate::uri::Uri;

/// Resolves `reference` against `base`.
///
/// # Panics
///
/// Panics if `base` is relative.
pub(crate) fn resolve(base: &Uri, reference: &Uri) -> Uri {
    assert!(
        !base.is_relative(),
        "cannot resolve against a relative base"
    );

    let (t_scheme, t_userinfo, t_host, t_port, t_path, t_query);

    if reference.scheme().is_some() {
        t_scheme = reference.scheme();
        t_userinfo = reference.encoded_userinfo();
        t_host = reference.encoded_host();
        t_port = reference.port();
        t_path = normalize_path(reference.encoded_path());
        t_query = reference.encoded_query();
    } else {
        t_scheme = base.scheme();
        if reference.encoded_host().is_some() {
            t_userinfo = reference.encoded_userinfo();
            t_host = reference.encoded_host();
            t_port = reference.port();
            t_path = normalize_path(reference.encoded_path());
            t_query = reference.encoded_query();
        } else {
            t_userinfo = base.encoded_userinfo();
            t_host = base.encoded_host();
            t_port = base.port();
            let ref_path = reference.encoded_path();
            if ref_path.is_empty() {
                t_path = base.encoded_path().to_owned();
                t_query = reference.encoded_query().or(base.encoded_query());
            } else {
                if ref_path.starts_with('/') {
                    t_path = normalize_path(ref_path);
                } else if base.encoded_host().is_some() && base.encoded_path().is_empty() {
                    t_path = normalize_path(&format!("/{ref_path}"));
                } else {
                    t_path = normalize_path(&merge_paths(base.encoded_path(), ref_path));
                }
                t_query = reference.encoded_query();
            }
        }
    }

    Uri::from_parts(
        t_scheme.map(str::to_owned),
        t_userinfo.map(str::to_owned),
        t_host.map(str::to_owned),
        t_port,
        t_path,
        t_query.map(str::to_owned),
        reference.encoded_fragment().map(str::to_owned),
    )
}

/// Merges a reference path with the path of a base URI,
/// per RFC 3986 Section 5.3.3.
fn merge_paths(base: &str, reference: &str) -> String {
    match base.rfind('/') {
        Some(i) => format!("{}{}", &base[..=i], reference),
        None => reference.to_owned(),
    }
}
