//! Route branch flattening and ranking
//!
//! A branch is one full path from a top-level route down to a leaf, index
//! route or any other route with a path of its own. Branches are scored by
//! specificity so that the most specific route wins:
//!
//! - static segment: 10
//! - dynamic segment (`:id`): 3
//! - empty segment (root or `//`): 1
//! - index route bonus: 2
//! - splat penalty: -2
//!
//! plus one point per segment. Equal scores between true siblings fall back to
//! declaration order.

use crate::error::{Result, RouteError};
use crate::path::join_paths;
use crate::pattern::{is_param_char, SPLAT};
use crate::route::Route;
use crate::{debug_log, trace_log};
use std::cmp::Ordering;

const STATIC_SEGMENT_VALUE: i32 = 10;
const DYNAMIC_SEGMENT_VALUE: i32 = 3;
const EMPTY_SEGMENT_VALUE: i32 = 1;
const INDEX_ROUTE_VALUE: i32 = 2;
const SPLAT_PENALTY: i32 = -2;

/// Per-route metadata along a branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSegment {
    /// Route path relative to the parent's path (`""` when the route has none)
    pub relative_path: String,
    /// Whether this route matches case-sensitively
    pub case_sensitive: bool,
    /// Position of the route among its siblings; also locates it in the tree
    pub child_index: usize,
}

/// One root-to-leaf path through the route tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Full path joined from the root, e.g. `/users/:id`
    pub path: String,
    /// Specificity score, higher is more specific
    pub score: i32,
    /// Route metadata, root first
    pub segments: Vec<BranchSegment>,
}

impl Branch {
    /// Resolve the routes of this branch inside the tree it was flattened from.
    ///
    /// Returns `None` if the tree no longer has the shape of the branch.
    pub fn routes<'a, T>(&self, routes: &'a [Route<T>]) -> Option<Vec<&'a Route<T>>> {
        let mut level = routes;
        let mut chain = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            let route = level.get(segment.child_index)?;
            chain.push(route);
            level = &route.children;
        }

        Some(chain)
    }

    fn is_sibling_of(&self, other: &Branch) -> bool {
        match (self.segments.split_last(), other.segments.split_last()) {
            (Some((_, parents)), Some((_, other_parents))) => {
                parents.len() == other_parents.len()
                    && parents
                        .iter()
                        .zip(other_parents)
                        .all(|(a, b)| a.child_index == b.child_index)
            }
            _ => false,
        }
    }

    fn last_index(&self) -> usize {
        self.segments.last().map_or(0, |s| s.child_index)
    }
}

/// Flatten a route tree into branches, depth-first.
///
/// Children are emitted before their parent's own branch. Pathless layout
/// routes contribute no branch of their own.
///
/// # Errors
///
/// - [`RouteError::AbsoluteChildPath`] when an absolute child path does not
///   start with its parents' combined path
/// - [`RouteError::IndexWithChildren`] when an index route has children
pub fn flatten_routes<T>(routes: &[Route<T>]) -> Result<Vec<Branch>> {
    let mut branches = Vec::new();
    flatten_into(routes, &mut branches, &[], "")?;
    debug_log!("Flattened route tree into {} branches", branches.len());
    Ok(branches)
}

fn flatten_into<T>(
    routes: &[Route<T>],
    branches: &mut Vec<Branch>,
    parent_segments: &[BranchSegment],
    parent_path: &str,
) -> Result<()> {
    for (child_index, route) in routes.iter().enumerate() {
        let mut relative_path = route.relative_path();

        if relative_path.starts_with('/') {
            relative_path = relative_path.strip_prefix(parent_path).ok_or_else(|| {
                RouteError::AbsoluteChildPath {
                    path: relative_path.to_string(),
                    parent_path: parent_path.to_string(),
                }
            })?;
        }

        let path = join_paths(&[parent_path, relative_path]);

        let mut segments = Vec::with_capacity(parent_segments.len() + 1);
        segments.extend_from_slice(parent_segments);
        segments.push(BranchSegment {
            relative_path: relative_path.to_string(),
            case_sensitive: route.case_sensitive,
            child_index,
        });

        if !route.children.is_empty() {
            if route.index {
                return Err(RouteError::IndexWithChildren { path });
            }
            flatten_into(&route.children, branches, &segments, &path)?;
        }

        if route.path.is_none() && !route.index {
            trace_log!("Skipping pathless layout route under '{}'", parent_path);
            continue;
        }

        branches.push(Branch {
            score: compute_score(&path, route.index),
            path,
            segments,
        });
    }

    Ok(())
}

fn is_dynamic_segment(segment: &str) -> bool {
    segment
        .strip_prefix(':')
        .is_some_and(|name| !name.is_empty() && name.chars().all(is_param_char))
}

/// Score a full route path by specificity.
///
/// # Example
///
/// ```
/// use route_matcher::compute_score;
///
/// assert!(compute_score("/a", false) > compute_score("/:id", false));
/// assert!(compute_score("/a/b", false) > compute_score("/a/*", false));
/// assert!(compute_score("/a", true) > compute_score("/a", false));
/// ```
pub fn compute_score(path: &str, index: bool) -> i32 {
    let segments: Vec<&str> = path.split('/').collect();
    let mut score = segments.len() as i32;

    if segments.iter().any(|s| *s == SPLAT) {
        score += SPLAT_PENALTY;
    }

    if index {
        score += INDEX_ROUTE_VALUE;
    }

    score
        + segments
            .iter()
            .filter(|s| **s != SPLAT)
            .map(|s| {
                if is_dynamic_segment(s) {
                    DYNAMIC_SEGMENT_VALUE
                } else if s.is_empty() {
                    EMPTY_SEGMENT_VALUE
                } else {
                    STATIC_SEGMENT_VALUE
                }
            })
            .sum::<i32>()
}

/// Order two branches: higher score first, then declaration order among
/// true siblings. Unrelated branches with equal scores compare equal.
fn compare_branches(a: &Branch, b: &Branch) -> Ordering {
    b.score.cmp(&a.score).then_with(|| {
        if a.is_sibling_of(b) {
            a.last_index().cmp(&b.last_index())
        } else {
            Ordering::Equal
        }
    })
}

/// Sort branches best-first.
///
/// The tie-break is not a total order, so this is a stable insertion sort
/// rather than `sort_by`, which may panic on inconsistent comparators.
pub fn rank_route_branches(branches: &mut [Branch]) {
    for i in 1..branches.len() {
        let mut j = i;
        while j > 0 && compare_branches(&branches[j - 1], &branches[j]) == Ordering::Greater {
            branches.swap(j - 1, j);
            j -= 1;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(branches: &[Branch]) -> Vec<&str> {
        branches.iter().map(|b| b.path.as_str()).collect()
    }

    #[test]
    fn test_score_values() {
        // "", "a" -> 2 segments + 1 (empty) + 10 (static)
        assert_eq!(compute_score("/a", false), 13);
        // "", ":id" -> 2 + 1 + 3
        assert_eq!(compute_score("/:id", false), 6);
        // "", "a", "*" -> 3 - 2 + 1 + 10
        assert_eq!(compute_score("/a/*", false), 12);
        // "", "" -> 2 + 2 (index) + 1 + 1
        assert_eq!(compute_score("/", true), 6);
    }

    #[test]
    fn test_static_outranks_dynamic_outranks_splat() {
        let static_score = compute_score("/users/new", false);
        let dynamic_score = compute_score("/users/:id", false);
        let splat_score = compute_score("/users/*", false);

        assert!(static_score > dynamic_score);
        assert!(dynamic_score > splat_score);
    }

    #[test]
    fn test_flatten_nested_children_first() {
        let routes = vec![Route::new("/", ()).children(vec![
            Route::new("users", ()).children(vec![Route::index(()), Route::new(":id", ())]),
            Route::new("about", ()),
        ])];

        let branches = flatten_routes(&routes).unwrap();
        assert_eq!(
            paths(&branches),
            vec!["/users/", "/users/:id", "/users", "/about", "/"]
        );

        let detail = &branches[1];
        assert_eq!(detail.segments.len(), 3);
        assert_eq!(detail.segments[2].relative_path, ":id");
        assert_eq!(detail.segments[2].child_index, 1);
    }

    #[test]
    fn test_pathless_layout_has_no_branch() {
        let routes = vec![Route::layout(()).children(vec![Route::new("/a", ())])];

        let branches = flatten_routes(&routes).unwrap();
        assert_eq!(paths(&branches), vec!["/a"]);
        assert_eq!(branches[0].segments[0].relative_path, "");
    }

    #[test]
    fn test_absolute_child_path_is_stripped() {
        let routes = vec![Route::new("/users", ()).children(vec![Route::new("/users/:id", ())])];

        let branches = flatten_routes(&routes).unwrap();
        assert_eq!(branches[0].path, "/users/:id");
        assert_eq!(branches[0].segments[1].relative_path, "/:id");
    }

    #[test]
    fn test_absolute_child_path_must_extend_parent() {
        let routes = vec![Route::new("/users", ()).children(vec![Route::new("/posts", ())])];

        let err = flatten_routes(&routes).unwrap_err();
        assert_eq!(
            err,
            RouteError::AbsoluteChildPath {
                path: "/posts".to_string(),
                parent_path: "/users".to_string(),
            }
        );
    }

    #[test]
    fn test_index_route_with_children_is_rejected() {
        let mut index = Route::index(());
        index.children.push(Route::new("x", ()));
        let routes = vec![Route::new("/users", ()).children(vec![index])];

        let err = flatten_routes(&routes).unwrap_err();
        assert_eq!(
            err,
            RouteError::IndexWithChildren {
                path: "/users/".to_string()
            }
        );
    }

    #[test]
    fn test_rank_by_score() {
        let routes = vec![
            Route::new("/a/*", ()),
            Route::new("/:id", ()),
            Route::new("/a/b", ()),
        ];

        let mut branches = flatten_routes(&routes).unwrap();
        rank_route_branches(&mut branches);
        assert_eq!(paths(&branches), vec!["/a/b", "/a/*", "/:id"]);
    }

    #[test]
    fn test_rank_siblings_by_declaration_order() {
        let routes = vec![Route::new("/:b", ()), Route::new("/:a", ())];

        let mut branches = flatten_routes(&routes).unwrap();
        rank_route_branches(&mut branches);
        assert_eq!(paths(&branches), vec!["/:b", "/:a"]);
    }

    #[test]
    fn test_rank_keeps_non_sibling_ties_in_place() {
        // Same score, different parents: flattening order is preserved.
        let routes = vec![
            Route::new("/x", ()).children(vec![Route::new(":a", ())]),
            Route::new("/y", ()).children(vec![Route::new(":b", ())]),
        ];

        let mut branches = flatten_routes(&routes).unwrap();
        rank_route_branches(&mut branches);
        assert_eq!(paths(&branches), vec!["/x/:a", "/y/:b", "/x", "/y"]);
    }

    #[test]
    fn test_branch_routes_resolve_payloads() {
        let routes = vec![Route::new("/", "root").children(vec![
            Route::new("a", "a"),
            Route::new("b", "b").children(vec![Route::new("c", "c")]),
        ])];

        let branches = flatten_routes(&routes).unwrap();
        let chain = branches[1].routes(&routes).unwrap();
        let payloads: Vec<&str> = chain.iter().map(|r| r.payload).collect();
        assert_eq!(payloads, vec!["root", "b", "c"]);

        assert!(branches[1].routes::<&str>(&[]).is_none());
    }
}
