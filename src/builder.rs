//! A validating builder of URI references.

use crate::encoding::{check, encode};
use crate::error::{BuildError, Component, SyntaxError, SyntaxErrorKind};
use crate::host::{check_dns_host, check_ipv6};
use crate::mask;
use crate::uri::Uri;

/// How a raw host given to [`Builder::host`] is turned into its
/// encoded form.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum HostEncoding {
    /// Convert the host with IDNA ToASCII and check that the result
    /// is a DNS-compatible hostname.
    #[default]
    DnsCompatible,
    /// Percent-encode the host as a registered name.
    PercentEncoded,
}

/// A builder of [`Uri`] values with fluent, self-consuming setters.
///
/// Raw setters encode their input; `encoded_*` setters validate it
/// instead. Validation failures are reported by [`build`](Self::build).
/// Calling a whole-value setter after the corresponding append setter
/// is a programming error and panics.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    scheme: Option<String>,
    userinfo: Option<String>,
    host: Option<HostInput>,
    host_encoding: HostEncoding,
    port: Option<u32>,
    path: String,
    path_appended: bool,
    query: Option<String>,
    query_appended: bool,
    fragment: Option<String>,
    error: Option<BuildError>,
}

#[derive(Clone, Debug)]
enum HostInput {
    Raw(String),
    Encoded(String),
}

impl Builder {
    /// Creates a new empty builder.
    pub fn new() -> Builder {
        Builder::default()
    }

    fn record(mut self, result: Result<(), SyntaxError>) -> Builder {
        if let Err(e) = result {
            if self.error.is_none() {
                self.error = Some(e.into());
            }
        }
        self
    }

    /// Sets the scheme.
    pub fn scheme(mut self, scheme: &str) -> Builder {
        let result = check_scheme(scheme);
        self.scheme = Some(scheme.to_owned());
        self.record(result)
    }

    /// Encodes and sets the user information.
    pub fn userinfo(mut self, userinfo: &str) -> Builder {
        self.userinfo = Some(encode(userinfo, mask::USERINFO, false).into_owned());
        self
    }

    /// Sets the already-encoded user information.
    pub fn encoded_userinfo(mut self, userinfo: &str) -> Builder {
        let result = check(userinfo, mask::USERINFO, Component::Userinfo);
        self.userinfo = Some(userinfo.to_owned());
        self.record(result)
    }

    /// Sets the host from its decoded form.
    ///
    /// A host containing `:` is taken for an IPv6 address, optionally
    /// with a `%`-delimited zone ID, and is bracketed on build. Any
    /// other host is converted per [`host_encoding`](Self::host_encoding).
    pub fn host(mut self, host: &str) -> Builder {
        self.host = Some(HostInput::Raw(host.to_owned()));
        self
    }

    /// Sets the encoding applied to a raw host on build.
    pub fn host_encoding(mut self, encoding: HostEncoding) -> Builder {
        self.host_encoding = encoding;
        self
    }

    /// Sets the already-encoded host, brackets included for an IPv6
    /// literal.
    pub fn encoded_host(mut self, host: &str) -> Builder {
        let result = check_encoded_host(host);
        self.host = Some(HostInput::Encoded(host.to_owned()));
        self.record(result)
    }

    /// Sets the port.
    pub fn port(mut self, port: u32) -> Builder {
        self.port = Some(port);
        self
    }

    pub(crate) fn port_opt(mut self, port: Option<u32>) -> Builder {
        self.port = port;
        self
    }

    /// Encodes and sets the whole path, resetting any appended
    /// segments.
    pub fn path(mut self, path: &str) -> Builder {
        self.path = encode(path, mask::PATH, false).into_owned();
        self.path_appended = false;
        self
    }

    /// Encodes and appends one path segment.
    ///
    /// A `/` separator is inserted when the current path is non-empty
    /// and does not already end with one.
    pub fn append_path_segment(mut self, segment: &str) -> Builder {
        if !self.path.is_empty() && !self.path.ends_with('/') {
            self.path.push('/');
        }
        self.path.push_str(&encode(segment, mask::PCHAR, false));
        self.path_appended = true;
        self
    }

    /// Sets the already-encoded whole path.
    ///
    /// # Panics
    ///
    /// Panics if the path has been appended to.
    pub fn encoded_path(mut self, path: &str) -> Builder {
        assert!(!self.path_appended, "path already appended to");
        let result = check(path, mask::PATH, Component::Path);
        self.path = path.to_owned();
        self.record(result)
    }

    /// Encodes and appends one query parameter pair.
    pub fn query_parameter(mut self, name: &str, value: &str) -> Builder {
        let name = encode(name, mask::QUERY_PARAM, false);
        let value = encode(value, mask::QUERY_PARAM, false);
        let query = self.query.get_or_insert_with(String::new);
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&name);
        query.push('=');
        query.push_str(&value);
        self.query_appended = true;
        self
    }

    /// Sets the already-encoded whole query.
    ///
    /// # Panics
    ///
    /// Panics if the query has been appended to.
    pub fn encoded_query(mut self, query: &str) -> Builder {
        assert!(!self.query_appended, "query already appended to");
        let result = check(query, mask::QUERY_FRAGMENT, Component::Query);
        self.query = Some(query.to_owned());
        self.record(result)
    }

    /// Drops the current query.
    ///
    /// # Panics
    ///
    /// Panics if the query has been appended to.
    pub fn clear_query(mut self) -> Builder {
        assert!(!self.query_appended, "query already appended to");
        self.query = None;
        self
    }

    /// Encodes and sets the fragment.
    pub fn fragment(mut self, fragment: &str) -> Builder {
        self.fragment = Some(encode(fragment, mask::QUERY_FRAGMENT, false).into_owned());
        self
    }

    /// Sets the already-encoded fragment.
    pub fn encoded_fragment(mut self, fragment: &str) -> Builder {
        let result = check(fragment, mask::QUERY_FRAGMENT, Component::Fragment);
        self.fragment = Some(fragment.to_owned());
        self.record(result)
    }

    /// Builds the URI reference.
    ///
    /// # Errors
    ///
    /// Returns the first validation error recorded by a setter, or a
    /// structural [`BuildError`] when the combination of components
    /// violates the URI grammar.
    pub fn build(self) -> Result<Uri, BuildError> {
        if let Some(e) = self.error {
            return Err(e);
        }

        let host = match self.host {
            None => None,
            Some(HostInput::Encoded(host)) => Some(host),
            Some(HostInput::Raw(host)) => Some(encode_host(&host, self.host_encoding)?),
        };

        let mut path = self.path;
        if host.is_some() {
            if !path.is_empty() && !path.starts_with('/') {
                return Err(BuildError::RootlessPathWithAuthority);
            }
        } else if path.starts_with("//") {
            return Err(BuildError::DoubleSlashPathWithoutAuthority);
        } else if self.scheme.is_none() && crate::uri::first_segment_contains_colon(&path) {
            path = format!("./{path}");
        }

        // userinfo and port are meaningless without a host
        let (userinfo, port) = if host.is_some() {
            (self.userinfo, self.port)
        } else {
            (None, None)
        };

        Ok(Uri::from_parts(
            self.scheme,
            userinfo,
            host,
            port,
            path,
            self.query,
            self.fragment,
        ))
    }
}

fn check_scheme(scheme: &str) -> Result<(), SyntaxError> {
    match scheme.chars().next() {
        None => Err(SyntaxError::new(
            scheme,
            SyntaxErrorKind::ExpectedScheme,
            Some(0),
        )),
        Some(c) if !mask::ALPHA.allows(c) => Err(SyntaxError::new(
            scheme,
            SyntaxErrorKind::IllegalCharacter(Component::Scheme),
            Some(0),
        )),
        Some(_) => check(scheme, mask::SCHEME, Component::Scheme),
    }
}

fn check_encoded_host(host: &str) -> Result<(), SyntaxError> {
    match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        Some(_) => check_ipv6(host, 1, host.len() - 1, true),
        None => check(host, mask::REG_NAME, Component::Host),
    }
}

fn encode_host(host: &str, encoding: HostEncoding) -> Result<String, BuildError> {
    if host.contains(':') {
        check_ipv6(host, 0, host.len(), false).map_err(BuildError::InvalidComponent)?;
        return Ok(match host.split_once('%') {
            Some((address, zone)) => {
                format!("[{}%25{}]", address, encode(zone, mask::ZONE_ID, false))
            }
            None => format!("[{host}]"),
        });
    }
    match encoding {
        HostEncoding::DnsCompatible => {
            let ascii = idna::domain_to_ascii(host)
                .map_err(|_| BuildError::IdnaConversionFailed(host.to_owned()))?;
            check_dns_host(&ascii).map_err(BuildError::DnsIncompatibleHostname)?;
            Ok(ascii)
        }
        HostEncoding::PercentEncoded => Ok(encode(host, mask::REG_NAME, false).into_owned()),
    }
}
