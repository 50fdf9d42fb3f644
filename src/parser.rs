//! An index-based, single-pass parser of URI references.

use crate::encoding::check_range;
use crate::error::{fail, Component, SyntaxError, SyntaxErrorKind};
use crate::host::check_ipv6;
use crate::mask;
use crate::uri::Uri;

/// Parses a URI reference per RFC 3986 Appendix A.
pub(crate) fn parse(input: &str) -> Result<Uri, SyntaxError> {
    Parser {
        input,
        scheme: None,
        userinfo: None,
        host: None,
        port: None,
        path: String::new(),
        query: None,
        fragment: None,
    }
    .parse()
}

struct Parser<'a> {
    input: &'a str,
    scheme: Option<String>,
    userinfo: Option<String>,
    host: Option<String>,
    port: Option<u32>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Parser<'_> {
    fn parse(mut self) -> Result<Uri, SyntaxError> {
        let input = self.input;
        let len = input.len();
        if len == 0 {
            return Ok(self.into_uri());
        }

        let (colon, slash, mut question, hash) = scan_delimiters(input);
        if colon == 0 {
            return fail(input, SyntaxErrorKind::ExpectedScheme, 0);
        }
        // a '#' before '?' leaves no room for a query
        if hash < question {
            question = len;
        }

        let mut pos = 0;
        if colon < slash && colon < question && colon < hash {
            if !mask::ALPHA.allows_byte(input.as_bytes()[0]) {
                return fail(
                    input,
                    SyntaxErrorKind::IllegalCharacter(Component::Scheme),
                    0,
                );
            }
            check_range(input, 1, colon, mask::SCHEME, Component::Scheme)?;
            self.scheme = Some(input[..colon].to_owned());
            pos = colon + 1;
        }

        let hier_end = question.min(hash);
        self.parse_hier_part(pos, hier_end)?;

        if question != len {
            check_range(input, question + 1, hash, mask::QUERY_FRAGMENT, Component::Query)?;
            self.query = Some(input[question + 1..hash].to_owned());
        }
        if hash != len {
            check_range(input, hash + 1, len, mask::QUERY_FRAGMENT, Component::Fragment)?;
            self.fragment = Some(input[hash + 1..].to_owned());
        }
        Ok(self.into_uri())
    }

    fn parse_hier_part(&mut self, start: usize, end: usize) -> Result<(), SyntaxError> {
        let input = self.input;
        let mut pos = start;
        if input[start..end].starts_with("//") {
            pos = start + 2;
            let authority_end = match input[pos..end].find('/') {
                Some(i) => pos + i,
                None => end,
            };
            self.parse_authority(pos, authority_end)?;
            pos = authority_end;
        }
        check_range(input, pos, end, mask::PATH, Component::Path)?;
        self.path = input[pos..end].to_owned();
        Ok(())
    }

    fn parse_authority(&mut self, start: usize, end: usize) -> Result<(), SyntaxError> {
        let input = self.input;
        let bytes = input.as_bytes();
        let mut pos = start;

        // userinfo cannot contain '@'; splitting at the first one
        // leaves any extras in the host, which rejects them
        if let Some(i) = input[pos..end].find('@') {
            let at = pos + i;
            check_range(input, pos, at, mask::USERINFO, Component::Userinfo)?;
            self.userinfo = Some(input[pos..at].to_owned());
            pos = at + 1;
        }

        // scan backwards for the port delimiter, stopping at a bracket
        let mut host_end = end;
        let mut i = end;
        while i > pos {
            i -= 1;
            match bytes[i] {
                b']' => break,
                b':' => {
                    if i != end - 1 {
                        check_range(input, i + 1, end, mask::DIGIT, Component::Port)?;
                        let port = input[i + 1..end]
                            .parse()
                            .map_err(|_| SyntaxError::new(input, SyntaxErrorKind::PortTooLarge, Some(i + 1)))?;
                        self.port = Some(port);
                    }
                    host_end = i;
                    break;
                }
                _ => {}
            }
        }

        let host = &input[pos..host_end];
        if host.starts_with('[') && host.ends_with(']') && host.len() >= 2 {
            check_ipv6(input, pos + 1, host_end - 1, true)?;
        } else {
            check_range(input, pos, host_end, mask::REG_NAME, Component::Host)?;
        }
        self.host = Some(host.to_owned());
        Ok(())
    }

    fn into_uri(self) -> Uri {
        Uri::from_parts(
            self.scheme,
            self.userinfo,
            self.host,
            self.port,
            self.path,
            self.query,
            self.fragment,
        )
    }
}

/// Returns the index of the first `:`, `/`, `?` and `#` in `input`,
/// with the input length standing in for absence.
fn scan_delimiters(input: &str) -> (usize, usize, usize, usize) {
    let len = input.len();
    let (mut colon, mut slash, mut question, mut hash) = (len, len, len, len);
    for (i, x) in input.bytes().enumerate() {
        match x {
            b':' if colon == len => colon = i,
            b'/' if slash == len => slash = i,
            b'?' if question == len => question = i,
            b'#' if hash == len => hash = i,
            _ => {}
        }
    }
    (colon, slash, question, hash)
}
