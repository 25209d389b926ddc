//! Error handling for route matching
//!
//! Fatal configuration and programming errors. A pathname that matches no
//! route is not an error: matching functions return `None` for that.

use std::fmt;

/// Result type used throughout the crate
pub type Result<T, E = RouteError> = std::result::Result<T, E>;

/// Errors that abort route table construction or path generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// An absolute child path does not extend the combined path of its parents
    AbsoluteChildPath { path: String, parent_path: String },

    /// An index route declares child routes
    IndexWithChildren { path: String },

    /// `generate_path` was called without a required param
    MissingParam { name: String, path: String },

    /// The compiled pattern was rejected by the regex engine
    InvalidPattern { path: String, message: String },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::AbsoluteChildPath { path, parent_path } => {
                write!(
                    f,
                    "Absolute route path \"{}\" nested under path \"{}\" is not valid. \
                     An absolute child route path must start with the combined path of all its parent routes.",
                    path, parent_path
                )
            }
            RouteError::IndexWithChildren { path } => {
                write!(
                    f,
                    "Index routes must not have child routes. Please remove all child routes from route path \"{}\".",
                    path
                )
            }
            RouteError::MissingParam { name, path } => {
                write!(f, "Missing \":{}\" param for path \"{}\"", name, path)
            }
            RouteError::InvalidPattern { path, message } => {
                write!(f, "Invalid route pattern \"{}\": {}", path, message)
            }
        }
    }
}

impl std::error::Error for RouteError {}

impl RouteError {
    /// The route path the error refers to
    pub fn path(&self) -> &str {
        match self {
            RouteError::AbsoluteChildPath { path, .. }
            | RouteError::IndexWithChildren { path }
            | RouteError::MissingParam { path, .. }
            | RouteError::InvalidPattern { path, .. } => path,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_child_path_display() {
        let error = RouteError::AbsoluteChildPath {
            path: "/other".to_string(),
            parent_path: "/users".to_string(),
        };
        let message = error.to_string();
        assert!(message.starts_with("Absolute route path \"/other\" nested under path \"/users\""));
        assert_eq!(error.path(), "/other");
    }

    #[test]
    fn test_index_with_children_display() {
        let error = RouteError::IndexWithChildren {
            path: "/users".to_string(),
        };
        assert!(error.to_string().contains("route path \"/users\""));
    }

    #[test]
    fn test_missing_param_display() {
        let error = RouteError::MissingParam {
            name: "id".to_string(),
            path: "/users/:id".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Missing \":id\" param for path \"/users/:id\""
        );
    }
}
