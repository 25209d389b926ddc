//! Relative path resolution
//!
//! [`resolve_path`] resolves a target against a plain pathname, segment by
//! segment. [`resolve_to`] resolves it against a matched route chain, where a
//! leading `..` climbs one *route* level rather than one URL segment: from
//! `/users/:id/edit/*` matched as `/users/5/edit/a/b`, `..` goes to
//! `/users/5`, not `/users/5/edit/a`.

use crate::path::{normalize_hash, normalize_search, PartialPath, Path, To};
use crate::trace_log;

/// Resolve a target against a pathname.
///
/// Absolute target pathnames are returned as given. A target without a
/// pathname keeps `from_pathname`.
///
/// # Example
///
/// ```
/// use route_matcher::resolve_path;
///
/// assert_eq!(resolve_path("../settings", "/users/5").pathname, "/users/settings");
/// assert_eq!(resolve_path("/about", "/users/5").pathname, "/about");
///
/// let path = resolve_path("?tab=2", "/users/5");
/// assert_eq!(path.pathname, "/users/5");
/// assert_eq!(path.search, "?tab=2");
/// ```
pub fn resolve_path(to: impl Into<To>, from_pathname: &str) -> Path {
    let (to, _) = to.into().into_parts();
    resolve_partial(&to, from_pathname)
}

fn resolve_partial(to: &PartialPath, from_pathname: &str) -> Path {
    let pathname = match to.pathname.as_deref() {
        Some(pathname) if pathname.starts_with('/') => pathname.to_string(),
        Some(pathname) if !pathname.is_empty() => resolve_pathname(pathname, from_pathname),
        _ => from_pathname.to_string(),
    };

    Path {
        pathname,
        search: normalize_search(to.search.as_deref().unwrap_or("")).into_owned(),
        hash: normalize_hash(to.hash.as_deref().unwrap_or("")).into_owned(),
    }
}

fn resolve_pathname(relative_path: &str, from_pathname: &str) -> String {
    let mut segments: Vec<&str> = from_pathname.trim_end_matches('/').split('/').collect();

    for segment in relative_path.split('/') {
        match segment {
            ".." => {
                // Never pop the root segment
                if segments.len() > 1 {
                    segments.pop();
                }
            }
            "." => {}
            _ => segments.push(segment),
        }
    }

    if segments.len() > 1 {
        segments.join("/")
    } else {
        "/".to_string()
    }
}

/// Resolve a navigation target against the matched route chain.
///
/// `route_pathnames` are the pathname bases of the matched routes that
/// contribute a URL level (see [`route_pathnames`](crate::route_pathnames)),
/// root first. `location_pathname` is used when the target has no pathname,
/// e.g. `"?tab=2"` or `"#section"`.
///
/// # Example
///
/// ```
/// use route_matcher::{resolve_to, PartialPath};
///
/// let chain = ["/users", "/users/5"];
///
/// let path = resolve_to(PartialPath::pathname(".."), &chain, "/users/5");
/// assert_eq!(path.pathname, "/users");
///
/// let path = resolve_to("edit", &chain, "/users/5");
/// assert_eq!(path.pathname, "/users/5/edit");
/// ```
pub fn resolve_to<S: AsRef<str>>(
    to: impl Into<To>,
    route_pathnames: &[S],
    location_pathname: &str,
) -> Path {
    let (mut to, empty_href) = to.into().into_parts();

    let to_pathname = if empty_href || to.pathname.as_deref() == Some("") {
        Some("/".to_string())
    } else {
        to.pathname.clone()
    };

    let from = match &to_pathname {
        None => location_pathname.to_string(),
        Some(to_pathname) => {
            let mut levels_up = 0;

            if to_pathname.starts_with("..") {
                let segments: Vec<&str> = to_pathname.split('/').collect();
                levels_up = segments.iter().take_while(|s| **s == "..").count();
                to.pathname = Some(segments[levels_up..].join("/"));
            }

            // Climbing past the first route lands on the root.
            route_pathnames
                .len()
                .checked_sub(levels_up + 1)
                .and_then(|index| route_pathnames.get(index))
                .map_or_else(|| "/".to_string(), |p| p.as_ref().to_string())
        }
    };

    trace_log!("Resolving {:?} from '{}'", to, from);
    let mut path = resolve_partial(&to, &from);

    // Keep an explicit trailing slash from the target.
    if let Some(to_pathname) = &to_pathname {
        if to_pathname != "/" && to_pathname.ends_with('/') && !path.pathname.ends_with('/') {
            path.pathname.push('/');
        }
    }

    path
}

// ============================================================================
// Tests
// ============================================================================
