//! Route definition
//!
//! A route tree is a list of [`Route`] nodes. Each node carries an opaque
//! payload (a handler, a component id, anything) that the matcher hands back
//! untouched in its [`RouteMatch`](crate::RouteMatch) results.

/// A node in the route tree
///
/// # Example
///
/// ```
/// use route_matcher::Route;
///
/// let routes = vec![
///     Route::new("/", "root").children(vec![
///         Route::index("home"),
///         Route::new("users", "users").children(vec![
///             Route::index("user-list"),
///             Route::new(":id", "user-detail"),
///         ]),
///         Route::new("*", "not-found"),
///     ]),
/// ];
/// assert_eq!(routes[0].children.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route<T> {
    /// Path pattern relative to the parent route, or absolute (starting with
    /// `/`) when it repeats the parent's full path. `None` for index and
    /// pathless layout routes.
    pub path: Option<String>,
    /// Nested routes
    pub children: Vec<Route<T>>,
    /// Whether this is the index route of its parent
    pub index: bool,
    /// Match this route's path case-sensitively
    pub case_sensitive: bool,
    /// Caller data returned with matches
    pub payload: T,
}

impl<T> Route<T> {
    /// Create a route with a path pattern
    pub fn new(path: impl Into<String>, payload: T) -> Self {
        Self {
            path: Some(path.into()),
            children: Vec::new(),
            index: false,
            case_sensitive: false,
            payload,
        }
    }

    /// Create an index route: it matches exactly its parent's path
    pub fn index(payload: T) -> Self {
        Self {
            path: None,
            children: Vec::new(),
            index: true,
            case_sensitive: false,
            payload,
        }
    }

    /// Create a pathless layout route that only groups its children
    pub fn layout(payload: T) -> Self {
        Self {
            path: None,
            children: Vec::new(),
            index: false,
            case_sensitive: false,
            payload,
        }
    }

    /// Replace the child routes
    pub fn children(mut self, children: Vec<Route<T>>) -> Self {
        self.children = children;
        self
    }

    /// Add a single child route
    pub fn child(mut self, child: Route<T>) -> Self {
        self.children.push(child);
        self
    }

    /// Set case-sensitive matching for this route's own path
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// The route path, or `""` when it has none
    pub fn relative_path(&self) -> &str {
        self.path.as_deref().unwrap_or("")
    }

    /// Whether this route has a non-empty path of its own
    pub fn has_path(&self) -> bool {
        self.path.as_deref().is_some_and(|p| !p.is_empty())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_new() {
        let route = Route::new("/users/:id", ());
        assert_eq!(route.path.as_deref(), Some("/users/:id"));
        assert!(!route.index);
        assert!(!route.case_sensitive);
        assert!(route.children.is_empty());
    }

    #[test]
    fn test_index_and_layout() {
        let index = Route::index(1);
        assert!(index.index);
        assert_eq!(index.relative_path(), "");
        assert!(!index.has_path());

        let layout = Route::layout(2);
        assert!(!layout.index);
        assert!(layout.path.is_none());
    }

    #[test]
    fn test_children_builders() {
        let route = Route::new("/dashboard", "layout")
            .child(Route::new("overview", "overview"))
            .child(Route::new("settings", "settings"));
        assert_eq!(route.children.len(), 2);
        assert_eq!(route.children[1].payload, "settings");

        let route = route.children(vec![Route::index("home")]);
        assert_eq!(route.children.len(), 1);
    }

    #[test]
    fn test_case_sensitive_builder() {
        let route = Route::new("/About", ()).case_sensitive(true);
        assert!(route.case_sensitive);
    }
}
