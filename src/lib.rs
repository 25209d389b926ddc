//! # Route Matcher
//!
//! Nested route matching for hierarchical route trees, with support for:
//!
//! - **Ranked Matching** - The most specific route wins: static segments beat
//!   dynamic ones, dynamic beat splats, declaration order breaks ties
//! - **Nested Routes** - Parent/child hierarchies with index and pathless layout routes
//! - **Dynamic Params** - `:id` segments and trailing `*` splats, percent-decoded
//! - **Relative Resolution** - `..` climbs one matched route, not one URL segment
//! - **Path Generation** - Build pathnames back from route patterns and params
//! - **Pattern Cache** - Optional LRU cache of compiled patterns
//!
//! # Quick Start
//!
//! ```
//! use route_matcher::{match_routes, Route};
//!
//! let routes = vec![
//!     Route::new("/", "layout").children(vec![
//!         Route::index("home"),
//!         Route::new("users/:id", "user"),
//!         Route::new("*", "not-found"),
//!     ]),
//! ];
//!
//! let matches = match_routes(&routes, "/users/42", "/").unwrap().unwrap();
//! assert_eq!(matches.len(), 2);
//! assert_eq!(*matches[1].payload(), "user");
//! assert_eq!(matches[1].params.get("id"), Some("42"));
//! assert_eq!(matches[1].pathname, "/users/42");
//! ```
//!
//! # Prebuilt Router
//!
//! Flatten and rank the tree once, then match repeatedly:
//!
//! ```
//! use route_matcher::{route_pathnames, resolve_to, Route, Router};
//!
//! let router = Router::new(vec![
//!     Route::new("/users", "users").children(vec![
//!         Route::new(":id", "user").children(vec![Route::new("edit", "edit")]),
//!     ]),
//! ])
//! .unwrap();
//!
//! let matches = router.match_routes("/users/5/edit").unwrap();
//! let chain = route_pathnames(&matches);
//! assert_eq!(resolve_to("..", &chain, "/users/5/edit").pathname, "/users/5");
//! ```
//!
//! # Single Patterns
//!
//! ```
//! use route_matcher::{generate_path, match_path, RouteParams};
//!
//! let matched = match_path("/files/*", "/files/a/b.txt").unwrap();
//! assert_eq!(matched.params.splat(), Some("a/b.txt"));
//!
//! let params: RouteParams = [("id", "7")].into_iter().collect();
//! assert_eq!(generate_path("/users/:id", &params).unwrap(), "/users/7");
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `cache` (default) - LRU cache of compiled patterns ([`PatternCache`])

#![doc(html_root_url = "https://docs.rs/route-matcher/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Core matching modules
pub mod branch;
pub mod matcher;
pub mod pattern;
pub mod route;
pub mod router;

// Error handling
pub mod error;

// Other modules
pub mod params;
pub mod path;
pub mod resolve;

// Re-export main types for convenient access
pub use branch::{compute_score, flatten_routes, rank_route_branches, Branch, BranchSegment};
#[cfg(feature = "cache")]
pub use cache::{CacheStats, PatternCache};
pub use error::{Result, RouteError};
pub use logging::{LogReporter, OnceReporter, WarningReporter};
pub use matcher::{match_route_branch, match_routes, match_routes_with, route_pathnames, RouteMatch};
pub use params::RouteParams;
pub use path::{
    create_path, decode_path_segment, join_paths, normalize_hash, normalize_pathname,
    normalize_search, parse_path, strip_basename, DecodeError, PartialPath, Path, To,
};
pub use pattern::{
    compile_path, compile_path_with, generate_path, match_path, match_path_with,
    CompiledPattern, PathMatch, PathPattern, SPLAT,
};
pub use resolve::{resolve_path, resolve_to};
pub use route::Route;
pub use router::Router;
