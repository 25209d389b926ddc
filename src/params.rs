//! Route parameters
//!
//! Values captured from `:name` segments and the trailing `*` splat of a
//! matched route chain.

use std::collections::HashMap;

/// Route parameters extracted from path segments
///
/// # Example
///
/// ```
/// use route_matcher::RouteParams;
///
/// // Route pattern: /users/:id
/// // Matched path: /users/123
/// let mut params = RouteParams::new();
/// params.insert("id", "123");
///
/// assert_eq!(params.get("id"), Some("123"));
/// assert_eq!(params.get_as::<i32>("id"), Some(123));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Create new empty route params
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from hashmap
    pub fn from_map(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get the splat (`*`) value
    pub fn splat(&self) -> Option<&str> {
        self.get("*")
    }

    /// Get a parameter and parse it as a specific type
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert a parameter, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Add every parameter of `other` whose key is not present yet.
    ///
    /// Existing values are never overwritten: along one route chain a parent's
    /// params stay authoritative.
    pub fn merge_missing(&mut self, other: RouteParams) {
        for (key, value) in other.params {
            self.params.entry(key).or_insert(value);
        }
    }

    /// Check if parameter exists
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Get all parameters as a reference to the HashMap
    pub fn all(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Iterate over all parameters
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check if parameters are empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for RouteParams {
    fn from(params: HashMap<String, String>) -> Self {
        Self::from_map(params)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_params_basic() {
        let mut params = RouteParams::new();
        params.insert("id", "123");

        assert_eq!(params.get("id"), Some("123"));
        assert!(params.contains("id"));
        assert!(!params.contains("missing"));
    }

    #[test]
    fn test_route_params_get_as() {
        let params: RouteParams = [("id", "123"), ("active", "true")].into_iter().collect();

        assert_eq!(params.get_as::<i32>("id"), Some(123));
        assert_eq!(params.get_as::<u32>("id"), Some(123));
        assert_eq!(params.get_as::<bool>("active"), Some(true));
        assert_eq!(params.get_as::<i32>("missing"), None);
    }

    #[test]
    fn test_route_params_from_map() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), "John".to_string());

        let params = RouteParams::from_map(map);
        assert_eq!(params.get("name"), Some("John"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_merge_missing_keeps_parent_values() {
        let mut parent: RouteParams = [("id", "1")].into_iter().collect();
        let child: RouteParams = [("id", "2"), ("tab", "info")].into_iter().collect();

        parent.merge_missing(child);

        assert_eq!(parent.get("id"), Some("1"));
        assert_eq!(parent.get("tab"), Some("info"));
        assert_eq!(parent.len(), 2);
    }

    #[test]
    fn test_splat() {
        let params: RouteParams = [("*", "a/b")].into_iter().collect();
        assert_eq!(params.splat(), Some("a/b"));
        assert_eq!(RouteParams::new().splat(), None);
    }

    #[test]
    fn test_route_params_empty() {
        let params = RouteParams::new();
        assert!(params.is_empty());
        assert_eq!(params.iter().count(), 0);
    }
}
