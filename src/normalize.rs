//! Path normalization: the remove-dot-segments algorithm of
//! RFC 3986 Section 5.2.4.

/// Removes dot segments from a path.
///
/// For a relative path, leading `..` segments that cannot be matched
/// against a real segment are kept, so the result still resolves to
/// the same target. A non-empty path that normalizes away entirely
/// becomes `"."` to preserve its presence.
pub(crate) fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let bytes = path.as_bytes();
    let len = bytes.len();
    let absolute = bytes[0] == b'/';

    let mut buf = String::with_capacity(len);
    // output positions at or before `limit` hold kept ".." segments
    // that a later ".." must not consume
    let mut limit = 0;
    let mut seg_start = 0;
    let mut dots = 0i32;

    let mut i = usize::from(absolute);
    while i <= len {
        if i < len && bytes[i] != b'/' {
            if bytes[i] == b'.' {
                if dots != -1 {
                    dots += 1;
                }
            } else {
                dots = -1;
            }
            i += 1;
            continue;
        }

        let start = seg_start;
        let count = dots;
        let at_end = i == len;
        seg_start = i;
        dots = 0;

        if count == 1 {
            // "." — drop the segment, keeping a trailing slash
            if at_end && (absolute || !buf.is_empty()) {
                buf.push('/');
            }
            i += 1;
            continue;
        }
        if count == 2 {
            // ".." — rewind one segment if one is available
            if absolute || buf.len() != limit {
                let pos = rewind(&mut buf, limit);
                if at_end && (absolute || pos != 0) {
                    buf.push('/');
                }
                i += 1;
                continue;
            }
            // nothing to consume: the ".." itself is kept below
            limit = buf.len() + (i - start);
        }
        buf.push_str(&path[start..i]);
        i += 1;
    }

    let mut out = buf.as_str();
    if !absolute {
        out = out.strip_prefix('/').unwrap_or(out);
    }
    if out.is_empty() {
        return String::from(".");
    }
    if out.len() == buf.len() {
        buf
    } else {
        out.to_owned()
    }
}

/// Truncates `buf` back to the previous `/`, not crossing `limit`.
/// Returns the new length.
fn rewind(buf: &mut String, limit: usize) -> usize {
    let bytes = buf.as_bytes();
    let mut i = match bytes.len() {
        0 => return 0,
        n => n - 1,
    };
    while i > limit && bytes[i] != b'/' {
        i -= 1;
    }
    buf.truncate(i);
    i
}

#[cfg(test)]
mod tests {
    use super::normalize_path;

    #[track_caller]
    fn check(path: &str, expected: &str) {
        assert_eq!(normalize_path(path), expected);
    }

    #[test]
    fn absolute() {
        check("/a/b/c/./../../g", "/a/g");
        check("/../g", "/g");
        check("/./g", "/g");
        check("/a/b/..", "/a/");
        check("/a/b/.", "/a/b/");
        check("/.", "/");
        check("/..", "/");
        check("/", "/");
    }

    #[test]
    fn relative() {
        check("mid/content=5/../6", "mid/6");
        check("a/b/../../", ".");
        check("a/./../b/./c/d/..", "b/c/");
        check("../g", "../g");
        check("../../g", "../../g");
        check("a/../../g", "../g");
        check("a/../b", "b");
        check(".", ".");
        check("..", "..");
        check("./", ".");
        check("g.", "g.");
        check(".g", ".g");
        check("g..", "g..");
        check("..g", "..g");
    }

    #[test]
    fn idempotent() {
        for path in ["/a/g", "mid/6", "../../g", "b/c/", ".", "/"] {
            assert_eq!(normalize_path(path), path);
        }
    }
}
