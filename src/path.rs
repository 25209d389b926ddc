//! Path primitives
//!
//! Parsing, joining and normalizing `pathname?search#hash` strings, basename
//! stripping and percent-decoding of captured path segments.

use std::borrow::Cow;
use std::fmt;

/// A fully specified location path.
///
/// `pathname` starts with `/`, `search` is empty or starts with `?` and `hash`
/// is empty or starts with `#` whenever the value comes out of path resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Path {
    /// The URL pathname, e.g. `/users/42`
    pub pathname: String,
    /// The query string including the leading `?`, or empty
    pub search: String,
    /// The fragment including the leading `#`, or empty
    pub hash: String,
}

impl Path {
    /// Create a path with only a pathname
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: String::new(),
            hash: String::new(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&create_path(&PartialPath::from(self.clone())))
    }
}

/// A path where every part may be missing.
///
/// A missing pathname is different from an empty one: `"?tab=2"` parses to a
/// `PartialPath` without a pathname, which [`resolve_to`](crate::resolve_to)
/// resolves against the current location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct PartialPath {
    pub pathname: Option<String>,
    pub search: Option<String>,
    pub hash: Option<String>,
}

impl PartialPath {
    /// Create a partial path with only a pathname
    pub fn pathname(pathname: impl Into<String>) -> Self {
        Self {
            pathname: Some(pathname.into()),
            ..Self::default()
        }
    }

    /// Set the search part
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set the hash part
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }
}

impl From<&str> for PartialPath {
    fn from(path: &str) -> Self {
        parse_path(path)
    }
}

impl From<String> for PartialPath {
    fn from(path: String) -> Self {
        parse_path(&path)
    }
}

impl From<Path> for PartialPath {
    fn from(path: Path) -> Self {
        Self {
            pathname: Some(path.pathname),
            search: Some(path.search),
            hash: Some(path.hash),
        }
    }
}

/// A navigation target: either an href string or a structured path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum To {
    /// A string such as `"../edit?draft=1"`
    Href(String),
    /// A structured target
    Path(PartialPath),
}

impl To {
    /// Split into the parsed path and whether the target was the empty href `""`.
    pub(crate) fn into_parts(self) -> (PartialPath, bool) {
        match self {
            To::Href(href) => {
                let empty = href.is_empty();
                (parse_path(&href), empty)
            }
            To::Path(path) => (path, false),
        }
    }
}

impl From<&str> for To {
    fn from(href: &str) -> Self {
        To::Href(href.to_string())
    }
}

impl From<String> for To {
    fn from(href: String) -> Self {
        To::Href(href)
    }
}

impl From<PartialPath> for To {
    fn from(path: PartialPath) -> Self {
        To::Path(path)
    }
}

impl From<Path> for To {
    fn from(path: Path) -> Self {
        To::Path(path.into())
    }
}

/// Parse a `pathname?search#hash` string.
///
/// Empty parts are left as `None`.
///
/// # Example
///
/// ```
/// use route_matcher::parse_path;
///
/// let path = parse_path("/users?page=2#top");
/// assert_eq!(path.pathname.as_deref(), Some("/users"));
/// assert_eq!(path.search.as_deref(), Some("?page=2"));
/// assert_eq!(path.hash.as_deref(), Some("#top"));
/// ```
pub fn parse_path(path: &str) -> PartialPath {
    let mut parsed = PartialPath::default();
    let mut rest = path;

    if let Some(index) = rest.find('#') {
        parsed.hash = Some(rest[index..].to_string());
        rest = &rest[..index];
    }

    if let Some(index) = rest.find('?') {
        parsed.search = Some(rest[index..].to_string());
        rest = &rest[..index];
    }

    if !rest.is_empty() {
        parsed.pathname = Some(rest.to_string());
    }

    parsed
}

/// Build a `pathname?search#hash` string. The inverse of [`parse_path`].
pub fn create_path(path: &PartialPath) -> String {
    let mut href = path.pathname.clone().unwrap_or_else(|| "/".to_string());
    href.push_str(&normalize_search(path.search.as_deref().unwrap_or("")));
    href.push_str(&normalize_hash(path.hash.as_deref().unwrap_or("")));
    href
}

/// Join path pieces with `/` and collapse repeated slashes.
///
/// # Example
///
/// ```
/// use route_matcher::join_paths;
///
/// assert_eq!(join_paths(&["/dashboard/", "settings"]), "/dashboard/settings");
/// assert_eq!(join_paths(&["", "users"]), "/users");
/// ```
pub fn join_paths(paths: &[&str]) -> String {
    let joined = paths.join("/");
    let mut result = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c == '/' && result.ends_with('/') {
            continue;
        }
        result.push(c);
    }
    result
}

/// Strip trailing slashes and force a single leading slash.
pub fn normalize_pathname(pathname: &str) -> String {
    let trimmed = pathname.trim_end_matches('/').trim_start_matches('/');
    format!("/{}", trimmed)
}

/// Empty or bare `?` becomes empty; otherwise a leading `?` is ensured.
pub fn normalize_search(search: &str) -> Cow<'_, str> {
    normalize_prefixed(search, '?')
}

/// Empty or bare `#` becomes empty; otherwise a leading `#` is ensured.
pub fn normalize_hash(hash: &str) -> Cow<'_, str> {
    normalize_prefixed(hash, '#')
}

fn normalize_prefixed(value: &str, prefix: char) -> Cow<'_, str> {
    if value.is_empty() || (value.len() == 1 && value.starts_with(prefix)) {
        Cow::Borrowed("")
    } else if value.starts_with(prefix) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("{}{}", prefix, value))
    }
}

/// Remove the application basename from a pathname.
///
/// The prefix comparison ignores case, Unicode included. Returns `None` when
/// the pathname is not under the basename.
///
/// # Example
///
/// ```
/// use route_matcher::strip_basename;
///
/// assert_eq!(strip_basename("/app/home", "/app"), Some("/home"));
/// assert_eq!(strip_basename("/app", "/app"), Some("/"));
/// assert_eq!(strip_basename("/ap", "/app"), None);
/// assert_eq!(strip_basename("/apple", "/app"), None);
/// ```
pub fn strip_basename<'a>(pathname: &'a str, basename: &str) -> Option<&'a str> {
    if basename == "/" {
        return Some(pathname);
    }

    // Offsets come from the pathname: case folding may change byte lengths.
    let mut chars = pathname.char_indices();
    let mut end = 0;
    for expected in basename.chars() {
        let (index, c) = chars.next()?;
        if !c.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        end = index + c.len_utf8();
    }

    // A basename with a trailing slash keeps that slash on the remainder.
    let start = if basename.ends_with('/') { end - 1 } else { end };
    let rest = &pathname[start..];

    if !rest.is_empty() && !rest.starts_with('/') {
        return None;
    }

    Some(if rest.is_empty() { "/" } else { rest })
}

/// Collapse trailing slashes the way a pathname base is formed: `"/a//"`
/// becomes `"/a"`, while a lone `"/"` (or `"///"`) stays `"/"`.
pub(crate) fn trim_trailing_slashes(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && !path.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Why a percent-encoded segment could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` not followed by two hex digits at the given byte offset
    MalformedEscape { index: usize },
    /// The decoded bytes are not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MalformedEscape { index } => {
                write!(f, "malformed escape sequence at byte {}", index)
            }
            DecodeError::InvalidUtf8 => f.write_str("decoded bytes are not valid UTF-8"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Percent-decode a captured path segment.
///
/// Unlike lenient decoders, a `%` that does not start a two-digit hex escape
/// is an error, as is an escape sequence that decodes to invalid UTF-8.
pub fn decode_path_segment(value: &str) -> Result<Cow<'_, str>, DecodeError> {
    let bytes = value.as_bytes();
    let mut from = 0;

    while let Some(offset) = bytes[from..].iter().position(|&b| b == b'%') {
        let index = from + offset;
        let valid = bytes
            .get(index + 1..index + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(DecodeError::MalformedEscape { index });
        }
        from = index + 3;
    }

    urlencoding::decode(value).map_err(|_| DecodeError::InvalidUtf8)
}

// ============================================================================
// Tests
// ============================================================================
