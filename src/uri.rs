//! The `Uri` value type.

use core::fmt;
use core::fmt::Write;
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use std::sync::OnceLock;

use crate::builder::Builder;
use crate::encoding::{decode_validated, decode_validated_path};
use crate::error::SyntaxError;
use crate::{parser, resolve};

/// An immutable URI reference conforming to RFC 3986, stored as its
/// encoded components.
///
/// Decoded views of the components are computed on first access and
/// memoized, as is the canonical string form.
pub struct Uri {
    scheme: Option<String>,
    userinfo: Option<String>,
    host: Option<String>,
    port: Option<u32>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
    cache: Cache,
}

#[derive(Default)]
struct Cache {
    userinfo: OnceLock<String>,
    host: OnceLock<String>,
    path: OnceLock<Option<String>>,
    segments: OnceLock<Vec<String>>,
    params: OnceLock<Vec<(String, Option<String>)>>,
    fragment: OnceLock<String>,
    string: OnceLock<String>,
}

impl Clone for Cache {
    fn clone(&self) -> Cache {
        // decoded views are recomputed on demand
        Cache::default()
    }
}

impl Uri {
    /// Parses a URI reference from its encoded string form.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when the input violates the RFC 3986
    /// grammar.
    pub fn parse(input: &str) -> Result<Uri, SyntaxError> {
        parser::parse(input)
    }

    /// Creates a new empty builder.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Creates a builder seeded with the encoded components of this
    /// URI reference.
    pub fn as_builder(&self) -> Builder {
        let mut b = Builder::new().port_opt(self.port);
        if let Some(scheme) = self.scheme() {
            b = b.scheme(scheme);
        }
        if let Some(userinfo) = self.encoded_userinfo() {
            b = b.encoded_userinfo(userinfo);
        }
        if let Some(host) = self.encoded_host() {
            b = b.encoded_host(host);
        }
        b = b.encoded_path(&self.path);
        if let Some(query) = self.encoded_query() {
            b = b.encoded_query(query);
        }
        if let Some(fragment) = self.encoded_fragment() {
            b = b.encoded_fragment(fragment);
        }
        b
    }

    pub(crate) fn from_parts(
        scheme: Option<String>,
        userinfo: Option<String>,
        host: Option<String>,
        port: Option<u32>,
        path: String,
        query: Option<String>,
        fragment: Option<String>,
    ) -> Uri {
        Uri {
            scheme,
            userinfo,
            host,
            port,
            path,
            query,
            fragment,
            cache: Cache::default(),
        }
    }

    /// Returns the scheme, or `None` for a relative reference.
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the decoded user information.
    pub fn userinfo(&self) -> Option<&str> {
        let encoded = self.userinfo.as_deref()?;
        Some(self.cache.userinfo.get_or_init(|| decode_validated(encoded, false)))
    }

    /// Returns the encoded user information.
    pub fn encoded_userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }

    /// Returns the decoded host.
    ///
    /// An IPv6 literal is returned without the enclosing brackets; a
    /// registered name goes through IDNA ToUnicode before decoding.
    pub fn host(&self) -> Option<&str> {
        let encoded = self.host.as_deref()?;
        Some(self.cache.host.get_or_init(|| {
            match encoded.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
                Some(inner) => decode_validated(inner, false),
                None => {
                    let (unicode, _) = idna::domain_to_unicode(encoded);
                    decode_validated(&unicode, false)
                }
            }
        }))
    }

    /// Returns the encoded host, brackets included for an IPv6 literal.
    pub fn encoded_host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the port.
    pub fn port(&self) -> Option<u32> {
        self.port
    }

    /// Returns the decoded path, or `None` when the path contains an
    /// encoded slash `%2F`, which no decoded string can represent
    /// without changing the segment structure.
    pub fn path(&self) -> Option<&str> {
        self.cache
            .path
            .get_or_init(|| decode_validated_path(&self.path))
            .as_deref()
    }

    /// Returns the encoded path.
    pub fn encoded_path(&self) -> &str {
        &self.path
    }

    /// Returns the decoded path segments, without leading or trailing
    /// slashes.
    ///
    /// When the path contains `%2F`, each segment of the encoded path
    /// is decoded individually, so a segment may itself contain `/`.
    pub fn path_segments(&self) -> &[String] {
        self.cache.segments.get_or_init(|| {
            let (path, encoded) = match self.path() {
                Some(path) => (path, false),
                None => (self.path.as_str(), true),
            };
            if path.is_empty() {
                return Vec::new();
            }
            let path = path.strip_prefix('/').unwrap_or(path);
            path.split('/')
                .map(|seg| {
                    if encoded {
                        decode_validated(seg, false)
                    } else {
                        seg.to_owned()
                    }
                })
                .collect()
        })
    }

    /// Returns the encoded query.
    pub fn encoded_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the decoded query parameters in order of appearance.
    ///
    /// Empty parameters (as in `"a=1&&b=2"`) are skipped; a parameter
    /// without `=` has no value. Names and values are decoded with
    /// plus-as-space.
    pub fn query_parameters(&self) -> Option<&[(String, Option<String>)]> {
        let query = self.query.as_deref()?;
        Some(
            self.cache
                .params
                .get_or_init(|| parse_query_parameters(query)),
        )
    }

    /// Returns the decoded fragment.
    pub fn fragment(&self) -> Option<&str> {
        let encoded = self.fragment.as_deref()?;
        Some(self.cache.fragment.get_or_init(|| decode_validated(encoded, false)))
    }

    /// Returns the encoded fragment.
    pub fn encoded_fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns `true` if the scheme is absent.
    pub fn is_relative(&self) -> bool {
        self.scheme.is_none()
    }

    /// Returns `true` if this is an opaque URI: a scheme is present,
    /// no authority, and a path that does not start with `/`.
    pub fn is_opaque(&self) -> bool {
        self.scheme.is_some() && self.host.is_none() && !self.path.starts_with('/')
    }

    /// Returns an equal URI reference with dot segments removed from
    /// the path.
    pub fn normalize(&self) -> Uri {
        let path = crate::normalize::normalize_path(&self.path);
        if path.len() == self.path.len() {
            return self.clone();
        }
        let mut uri = Uri::from_parts(
            self.scheme.clone(),
            self.userinfo.clone(),
            self.host.clone(),
            self.port,
            path,
            self.query.clone(),
            self.fragment.clone(),
        );
        uri.correct_no_scheme_path();
        uri
    }

    /// Resolves `reference` against this URI reference, per RFC 3986
    /// Section 5.3.
    ///
    /// # Panics
    ///
    /// Panics if this URI reference is relative.
    pub fn resolve(&self, reference: &Uri) -> Uri {
        resolve::resolve(self, reference)
    }

    /// Parses `reference` and resolves it against this URI reference.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when `reference` violates the
    /// RFC 3986 grammar.
    ///
    /// # Panics
    ///
    /// Panics if this URI reference is relative.
    pub fn resolve_str(&self, reference: &str) -> Result<Uri, SyntaxError> {
        Ok(self.resolve(&Uri::parse(reference)?))
    }

    /// Returns the canonical string form, built on first access and
    /// memoized.
    pub fn as_str(&self) -> &str {
        self.cache.string.get_or_init(|| self.build_string())
    }

    /// Prefixes a rootless no-scheme path with `./` when its first
    /// segment contains a colon, which would otherwise parse back as
    /// a scheme delimiter.
    pub(crate) fn correct_no_scheme_path(&mut self) {
        if self.scheme.is_none()
            && !self.path.starts_with('/')
            && first_segment_contains_colon(&self.path)
        {
            self.path = format!("./{}", self.path);
        }
    }

    fn build_string(&self) -> String {
        let mut buf = String::new();
        if let Some(scheme) = &self.scheme {
            buf.push_str(scheme);
            buf.push(':');
        }
        if let Some(host) = &self.host {
            buf.push_str("//");
            if let Some(userinfo) = &self.userinfo {
                buf.push_str(userinfo);
                buf.push('@');
            }
            buf.push_str(host);
            if let Some(port) = self.port {
                write!(buf, ":{port}").unwrap();
            }
        }
        buf.push_str(&self.path);
        if let Some(query) = &self.query {
            buf.push('?');
            buf.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            buf.push('#');
            buf.push_str(fragment);
        }
        buf
    }
}

pub(crate) fn first_segment_contains_colon(path: &str) -> bool {
    path.split_once('/').map_or(path, |x| x.0).contains(':')
}

fn parse_query_parameters(query: &str) -> Vec<(String, Option<String>)> {
    query
        .split('&')
        .filter(|param| !param.is_empty())
        .map(|param| match param.split_once('=') {
            Some((name, value)) => (
                decode_validated(name, true),
                Some(decode_validated(value, true)),
            ),
            None => (decode_validated(param, true), None),
        })
        .collect()
}

impl Clone for Uri {
    fn clone(&self) -> Uri {
        Uri {
            scheme: self.scheme.clone(),
            userinfo: self.userinfo.clone(),
            host: self.host.clone(),
            port: self.port,
            path: self.path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
            cache: Cache::default(),
        }
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Uri) -> bool {
        self.scheme == other.scheme
            && self.userinfo == other.userinfo
            && self.host == other.host
            && self.port == other.port
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl Eq for Uri {}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.userinfo.hash(state);
        self.host.hash(state);
        self.port.hash(state);
        self.path.hash(state);
        self.query.hash(state);
        self.fragment.hash(state);
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme)
            .field("userinfo", &self.userinfo)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("fragment", &self.fragment)
            .finish()
    }
}

impl FromStr for Uri {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Uri, SyntaxError> {
        Uri::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = SyntaxError;

    fn try_from(s: &str) -> Result<Uri, SyntaxError> {
        Uri::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Uri, D::Error> {
        use serde::de::Error;
        let s = String::deserialize(deserializer)?;
        Uri::parse(&s).map_err(D::Error::custom)
    }
}
