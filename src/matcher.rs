//! Route chain matching
//!
//! Tries ranked branches in order. For each branch every route along the
//! chain matches a piece of the pathname: parents match a prefix and hand
//! the rest to their children, the last route has to match to the end. The
//! first branch whose whole chain matches wins.

use crate::branch::{flatten_routes, rank_route_branches, Branch};
use crate::error::Result;
use crate::logging::{LogReporter, WarningReporter};
use crate::params::RouteParams;
use crate::path::{join_paths, normalize_pathname, strip_basename, PartialPath};
use crate::pattern::{match_path_with, PathMatch, PathPattern};
use crate::route::Route;
use crate::{debug_log, trace_log};
use std::fmt;

/// One matched route in a chain
pub struct RouteMatch<'a, T> {
    /// Params accumulated from the root down to this route
    pub params: RouteParams,
    /// The portion of the pathname matched up to and including this route
    pub pathname: String,
    /// `pathname` without trailing slashes; what child routes build on
    pub pathname_base: String,
    /// The matched route
    pub route: &'a Route<T>,
}

impl<T> Clone for RouteMatch<'_, T> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            pathname: self.pathname.clone(),
            pathname_base: self.pathname_base.clone(),
            route: self.route,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RouteMatch<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("params", &self.params)
            .field("pathname", &self.pathname)
            .field("pathname_base", &self.pathname_base)
            .field("payload", &self.route.payload)
            .finish()
    }
}

impl<T> RouteMatch<'_, T> {
    /// The matched route's payload
    pub fn payload(&self) -> &T {
        &self.route.payload
    }
}

/// Match a route tree against a location.
///
/// `location` may be a path string (search and hash are ignored) or a
/// [`PartialPath`]. The `basename` is stripped first; use `"/"` for none.
///
/// Returns `Ok(None)` when nothing matches.
///
/// # Example
///
/// ```
/// use route_matcher::{match_routes, Route};
///
/// let routes = vec![Route::new("/users", "users").children(vec![
///     Route::new(":id", "user"),
/// ])];
///
/// let matches = match_routes(&routes, "/users/42?tab=posts", "/").unwrap().unwrap();
/// assert_eq!(matches.len(), 2);
/// assert_eq!(*matches[1].payload(), "user");
/// assert_eq!(matches[1].params.get("id"), Some("42"));
/// ```
pub fn match_routes<'a, T>(
    routes: &'a [Route<T>],
    location: impl Into<PartialPath>,
    basename: &str,
) -> Result<Option<Vec<RouteMatch<'a, T>>>> {
    match_routes_with(routes, location, basename, &LogReporter)
}

/// Match a route tree, sending warnings to `reporter`.
pub fn match_routes_with<'a, T>(
    routes: &'a [Route<T>],
    location: impl Into<PartialPath>,
    basename: &str,
    reporter: &dyn WarningReporter,
) -> Result<Option<Vec<RouteMatch<'a, T>>>> {
    let mut branches = flatten_routes(routes)?;
    rank_route_branches(&mut branches);

    let location = location.into();
    let pathname = location
        .pathname
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or("/");

    Ok(match_ranked_branches(
        &branches,
        routes,
        pathname,
        basename,
        |pattern, remaining| match_path_with(pattern, remaining, reporter),
    ))
}

/// Try already-ranked branches in order and return the first full match.
pub(crate) fn match_ranked_branches<'a, T, F>(
    branches: &[Branch],
    routes: &'a [Route<T>],
    pathname: &str,
    basename: &str,
    mut match_segment: F,
) -> Option<Vec<RouteMatch<'a, T>>>
where
    F: FnMut(&PathPattern, &str) -> Option<PathMatch>,
{
    let Some(pathname) = strip_basename(pathname, basename) else {
        trace_log!("Pathname '{}' is outside basename '{}'", pathname, basename);
        return None;
    };

    for branch in branches {
        trace_log!("Trying branch '{}' (score {})", branch.path, branch.score);
        if let Some(matches) = match_route_branch(branch, routes, pathname, &mut match_segment) {
            debug_log!("Matched '{}' with branch '{}'", pathname, branch.path);
            return Some(matches);
        }
    }

    debug_log!("No route matched '{}'", pathname);
    None
}

/// Match a single branch against a basename-free pathname.
///
/// `match_segment` matches one route pattern against the remaining pathname;
/// pass [`match_path`](crate::match_path) or a cached equivalent.
pub fn match_route_branch<'a, T, F>(
    branch: &Branch,
    routes: &'a [Route<T>],
    pathname: &str,
    mut match_segment: F,
) -> Option<Vec<RouteMatch<'a, T>>>
where
    F: FnMut(&PathPattern, &str) -> Option<PathMatch>,
{
    let chain = branch.routes(routes)?;
    let last = branch.segments.len().saturating_sub(1);

    let mut params = RouteParams::new();
    let mut matched_pathname = String::from("/");
    let mut matches = Vec::with_capacity(chain.len());

    for (index, (segment, route)) in branch.segments.iter().zip(chain).enumerate() {
        let remaining = if matched_pathname == "/" {
            pathname
        } else {
            match pathname.get(matched_pathname.len()..) {
                Some(rest) if !rest.is_empty() => rest,
                _ => "/",
            }
        };

        let pattern = PathPattern {
            path: segment.relative_path.clone(),
            case_sensitive: segment.case_sensitive,
            end: index == last,
        };
        let matched = match_segment(&pattern, remaining)?;

        params.merge_missing(matched.params);
        matches.push(RouteMatch {
            params: params.clone(),
            pathname: join_paths(&[&matched_pathname, &matched.pathname]),
            pathname_base: normalize_pathname(&join_paths(&[
                &matched_pathname,
                &matched.pathname_base,
            ])),
            route,
        });

        if matched.pathname_base != "/" {
            matched_pathname = join_paths(&[&matched_pathname, &matched.pathname_base]);
        }
    }

    Some(matches)
}

/// The pathnames a relative `..` steps through, for
/// [`resolve_to`](crate::resolve_to).
///
/// Index and pathless layout routes share their parent's URL, so they do not
/// add a level. The first match always counts.
pub fn route_pathnames<T>(matches: &[RouteMatch<'_, T>]) -> Vec<String> {
    matches
        .iter()
        .enumerate()
        .filter(|(index, m)| *index == 0 || m.route.has_path())
        .map(|(_, m)| m.pathname_base.clone())
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
