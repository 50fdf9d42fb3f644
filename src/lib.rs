//! A library for parsing, building, normalizing and resolving URI
//! references compliant with [RFC 3986], with support for IPv6 zone
//! IDs ([RFC 6874]) and IDNA hostnames ([RFC 3490]).
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986
//! [RFC 6874]: https://datatracker.ietf.org/doc/html/rfc6874
//! [RFC 3490]: https://datatracker.ietf.org/doc/html/rfc3490
//!
//! # Examples
//!
//! Parse and inspect a URI reference:
//!
//! ```
//! use uritools::Uri;
//!
//! let uri = Uri::parse("https://user@example.com:8042/over/there?name=ferret#nose")?;
//! assert_eq!(uri.scheme(), Some("https"));
//! assert_eq!(uri.host(), Some("example.com"));
//! assert_eq!(uri.port(), Some(8042));
//! assert_eq!(uri.path(), Some("/over/there"));
//! # Ok::<_, uritools::SyntaxError>(())
//! ```
//!
//! Build one from components:
//!
//! ```
//! use uritools::Uri;
//!
//! let uri = Uri::builder()
//!     .scheme("https")
//!     .host("example.com")
//!     .path("/search")
//!     .query_parameter("q", "uri syntax")
//!     .build()?;
//! assert_eq!(uri.as_str(), "https://example.com/search?q=uri%20syntax");
//! # Ok::<_, uritools::BuildError>(())
//! ```
//!
//! # Crate features
//!
//! - `serde`: Enables the `Serialize` and `Deserialize` implementations
//!   for [`Uri`], which serialize as the canonical string form.

#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]

mod builder;
pub mod encoding;
mod error;
pub mod host;
pub mod mask;
mod normalize;
mod parser;
mod resolve;
mod uri;

pub use builder::{Builder, HostEncoding};
pub use error::{BuildError, Component, SyntaxError, SyntaxErrorKind};
pub use uri::Uri;
