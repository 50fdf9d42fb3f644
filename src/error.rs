//! Error types for parsing and building.

use thiserror::Error;

/// A URI component in which a syntax error may occur.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Component {
    /// The scheme.
    Scheme,
    /// The user information subcomponent of the authority.
    Userinfo,
    /// The host subcomponent of the authority.
    Host,
    /// The port subcomponent of the authority.
    Port,
    /// The path.
    Path,
    /// The query.
    Query,
    /// The fragment.
    Fragment,
    /// The zone ID of an IPv6 literal.
    ZoneId,
}

impl Component {
    fn as_str(&self) -> &'static str {
        match self {
            Component::Scheme => "scheme",
            Component::Userinfo => "userinfo",
            Component::Host => "host",
            Component::Port => "port",
            Component::Path => "path",
            Component::Query => "query",
            Component::Fragment => "fragment",
            Component::ZoneId => "zone ID",
        }
    }
}

/// Detailed cause of a [`SyntaxError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    /// A scheme delimiter was found with no scheme before it.
    #[error("expected scheme")]
    ExpectedScheme,
    /// A character not permitted in the component.
    #[error("illegal character in {}", .0.as_str())]
    IllegalCharacter(Component),
    /// A `%` not followed by two hexadecimal digits.
    #[error("malformed percent-encoded octet")]
    MalformedOctet,
    /// An IPv6 address that fits no production of the grammar.
    #[error("malformed IPv6 address")]
    MalformedIpv6Address,
    /// More than four hexadecimal digits in an IPv6 group.
    #[error("hexadecimal sequence too long")]
    HexSequenceTooLong,
    /// More than one `::` in an IPv6 address.
    #[error("multiple compressions in IPv6 address")]
    MultipleCompressions,
    /// Where a dotted-quad IPv4 address was required, none was found.
    #[error("expected IPv4 address")]
    ExpectedIpv4Address,
    /// A zone ID delimiter in a percent-encoded address must read `%25`.
    #[error("expected %25")]
    ExpectedPercent25,
    /// An empty zone ID after the delimiter.
    #[error("empty zone ID")]
    EmptyZoneId,
    /// An IPv6 address longer than 45 characters.
    #[error("IPv6 address too long")]
    AddressTooLong,
    /// An IPv6 address shorter than 2 characters.
    #[error("IPv6 address too short")]
    AddressTooShort,
    /// A port number that does not fit in a `u32`.
    #[error("port number too large")]
    PortTooLarge,
    /// A hostname that is empty or longer than 253 characters.
    #[error("hostname length out of range")]
    HostnameLengthOutOfRange,
    /// An empty label in a hostname.
    #[error("empty label in hostname")]
    EmptyLabel,
    /// A hostname label longer than 63 characters.
    #[error("hostname label too long")]
    LabelTooLong,
    /// A hostname label starting or ending with a hyphen.
    #[error("hostname label starts or ends with a hyphen")]
    HyphenAtLabelBoundary,
    /// A final hostname label consisting solely of digits.
    #[error("final hostname label is all-numeric")]
    NumericFinalLabel,
}

/// An error occurring while validating a URI reference or one of its
/// components against the RFC 3986 grammar.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind}{} in {input:?}", fmt_index(.index))]
pub struct SyntaxError {
    input: String,
    kind: SyntaxErrorKind,
    index: Option<usize>,
}

fn fmt_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at index {i}"),
        None => String::new(),
    }
}

impl SyntaxError {
    pub(crate) fn new(input: &str, kind: SyntaxErrorKind, index: Option<usize>) -> SyntaxError {
        SyntaxError {
            input: input.to_owned(),
            kind,
            index,
        }
    }

    /// Returns the input string that failed validation.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the detailed cause of the error.
    pub fn kind(&self) -> SyntaxErrorKind {
        self.kind
    }

    /// Returns the byte index at which the error occurred, if pinpointable.
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

/// Fails with a [`SyntaxError`] at the given index.
pub(crate) fn fail<T>(input: &str, kind: SyntaxErrorKind, index: usize) -> Result<T, SyntaxError> {
    Err(SyntaxError::new(input, kind, Some(index)))
}

/// An error occurring while building a URI reference.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The path is rootless while an authority is present.
    #[error("path is rootless when authority is present")]
    RootlessPathWithAuthority,
    /// The path starts with `//` while no authority is present.
    #[error("path starts with \"//\" when authority is not present")]
    DoubleSlashPathWithoutAuthority,
    /// A component given to the builder failed validation.
    #[error("invalid component: {0}")]
    InvalidComponent(#[from] SyntaxError),
    /// An IDNA-encoded host is not a DNS-compatible hostname.
    #[error("DNS-incompatible hostname: {0}")]
    DnsIncompatibleHostname(SyntaxError),
    /// The host could not be converted with IDNA ToASCII.
    #[error("IDNA conversion failed for host {0:?}")]
    IdnaConversionFailed(String),
}
