//! Prebuilt route table
//!
//! [`match_routes`](crate::match_routes) flattens and ranks the route tree on
//! every call. A [`Router`] does that once, reports configuration errors up
//! front and then answers matches against the ranked branch list.

#[cfg(feature = "cache")]
use crate::cache::PatternCache;
use crate::branch::{flatten_routes, rank_route_branches, Branch};
use crate::error::Result;
use crate::logging::{LogReporter, WarningReporter};
use crate::matcher::{match_ranked_branches, RouteMatch};
use crate::path::PartialPath;
use crate::pattern::match_path_with;
use crate::route::Route;
use crate::info_log;
use std::fmt;
use std::sync::Arc;

/// Route tree with its branches flattened and ranked
///
/// # Example
///
/// ```
/// use route_matcher::{Route, Router};
///
/// let router = Router::new(vec![
///     Route::new("/", "root").children(vec![
///         Route::index("home"),
///         Route::new("users/:id", "user"),
///     ]),
/// ])
/// .unwrap()
/// .basename("/app");
///
/// let matches = router.match_routes("/app/users/7").unwrap();
/// assert_eq!(*matches[1].payload(), "user");
/// assert_eq!(matches[1].params.get("id"), Some("7"));
///
/// assert!(router.match_routes("/users/7").is_none());
/// ```
pub struct Router<T> {
    routes: Vec<Route<T>>,
    branches: Vec<Branch>,
    basename: String,
    reporter: Arc<dyn WarningReporter + Send + Sync>,
}

impl<T> Router<T> {
    /// Build a router from a route tree.
    ///
    /// Fails with the same configuration errors as
    /// [`flatten_routes`](crate::flatten_routes).
    pub fn new(routes: Vec<Route<T>>) -> Result<Self> {
        let mut branches = flatten_routes(&routes)?;
        rank_route_branches(&mut branches);
        info_log!("Router ready with {} ranked branches", branches.len());

        Ok(Self {
            routes,
            branches,
            basename: "/".to_string(),
            reporter: Arc::new(LogReporter),
        })
    }

    /// Set the application basename stripped before matching (default `/`)
    pub fn basename(mut self, basename: impl Into<String>) -> Self {
        let basename = basename.into();
        self.basename = if basename.is_empty() {
            "/".to_string()
        } else {
            basename
        };
        self
    }

    /// Set where non-fatal warnings go (default [`LogReporter`])
    pub fn reporter(mut self, reporter: impl WarningReporter + Send + Sync + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    /// The route tree
    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }

    /// Branches in ranked order, best first
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Match a location against the route tree.
    ///
    /// Returns `None` when the location is outside the basename or no branch
    /// matches.
    pub fn match_routes(&self, location: impl Into<PartialPath>) -> Option<Vec<RouteMatch<'_, T>>> {
        let location = location.into();
        let pathname = location
            .pathname
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("/");
        let reporter: &dyn WarningReporter = &*self.reporter;

        match_ranked_branches(
            &self.branches,
            &self.routes,
            pathname,
            &self.basename,
            |pattern, remaining| match_path_with(pattern, remaining, reporter),
        )
    }

    /// Like [`match_routes`](Self::match_routes), reusing compiled patterns
    /// from `cache`.
    #[cfg(feature = "cache")]
    pub fn match_routes_cached(
        &self,
        location: impl Into<PartialPath>,
        cache: &mut PatternCache,
    ) -> Option<Vec<RouteMatch<'_, T>>> {
        let location = location.into();
        let pathname = location
            .pathname
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("/");
        let reporter: &dyn WarningReporter = &*self.reporter;

        match_ranked_branches(
            &self.branches,
            &self.routes,
            pathname,
            &self.basename,
            |pattern, remaining| cache.match_path(pattern, remaining, reporter),
        )
    }
}

impl<T: Clone> Clone for Router<T> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
            branches: self.branches.clone(),
            basename: self.basename.clone(),
            reporter: Arc::clone(&self.reporter),
        }
    }
}

impl<T> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.len())
            .field("branches", &self.branches)
            .field("basename", &self.basename)
            .finish_non_exhaustive()
    }
}
