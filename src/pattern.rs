//! Path pattern compilation and matching
//!
//! A route path such as `/users/:id/files/*` is compiled into an anchored
//! regular expression plus the ordered list of param names it captures.
//!
//! Pattern grammar:
//! - `/literal` - matched literally, case-insensitive unless the pattern is
//!   case sensitive
//! - `/:name` - captures one or more non-`/` characters
//! - trailing `/*` - captures the remainder of the pathname as the `*` param
//!
//! A pattern compiled with `end = false` only has to match a prefix of the
//! pathname, which is how parent routes consume their part of a nested URL.
//! The prefix must stop at a `/`, the end of the pathname, a `.`, `-`, `~`, or
//! a percent-encoded byte, so `/home` never matches `/home2`.
//!
//! Case-insensitive matching uses full Unicode simple case folding: `/äpp`
//! matches `/ÄPP`, and so do folding equivalents such as `ſ` for `s` or the
//! Kelvin sign for `k`. Basename stripping folds case the same way.

use crate::error::{Result, RouteError};
use crate::logging::{LogReporter, WarningReporter};
use crate::params::RouteParams;
use crate::path::{decode_path_segment, trim_trailing_slashes};
use crate::{error_log, trace_log};
use regex::{Regex, RegexBuilder};

/// Param name used for the trailing splat
pub const SPLAT: &str = "*";

/// Characters allowed after `:` in a dynamic segment.
pub(crate) fn is_param_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// A route path together with its matching options
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    /// Route path, e.g. `/users/:id`
    pub path: String,
    /// Match letters case-sensitively (default: `false`)
    pub case_sensitive: bool,
    /// Require the pattern to match the whole pathname (default: `true`)
    pub end: bool,
}

impl PathPattern {
    /// Create a case-insensitive pattern that must match to the end
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            case_sensitive: false,
            end: true,
        }
    }

    /// Set case sensitivity
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set whether the pattern must match to the end of the pathname
    pub fn end(mut self, end: bool) -> Self {
        self.end = end;
        self
    }
}

impl From<&str> for PathPattern {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PathPattern {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&PathPattern> for PathPattern {
    fn from(pattern: &PathPattern) -> Self {
        pattern.clone()
    }
}

/// Result of matching a single pattern against a pathname
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Decoded values of the captured params
    pub params: RouteParams,
    /// The portion of the pathname matched by the pattern
    pub pathname: String,
    /// The matched portion without trailing slashes; nested routes match
    /// against what follows it
    pub pathname_base: String,
    /// The pattern that produced this match
    pub pattern: PathPattern,
}

/// A compiled path pattern.
///
/// Immutable once built and safe to share between threads.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: PathPattern,
    matcher: Regex,
    param_names: Vec<String>,
}

impl CompiledPattern {
    /// Compile a pattern, reporting cosmetic problems to `reporter`
    pub fn new(pattern: PathPattern, reporter: &dyn WarningReporter) -> Result<Self> {
        let path = pattern.path.as_str();

        if path != "*" && path.ends_with('*') && !path.ends_with("/*") {
            let suggested = format!("{}/*", &path[..path.len() - 1]);
            reporter.warn(
                path,
                &format!(
                    "Route path \"{}\" will be treated as if it were \"{}\" because the `*` \
                     character must always follow a `/` in the pattern. To get rid of this \
                     warning, please change the route path to \"{}\".",
                    path, suggested, suggested
                ),
            );
        }

        let (source, param_names) = build_source(path, pattern.end);
        trace_log!("Compiled route path '{}' to '{}'", path, source);

        let matcher = RegexBuilder::new(&source)
            .case_insensitive(!pattern.case_sensitive)
            .build()
            .map_err(|e| RouteError::InvalidPattern {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            pattern,
            matcher,
            param_names,
        })
    }

    /// The pattern this matcher was compiled from
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Param names in capture order; `*` comes last when present
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Match a pathname, returning `None` when it does not match
    pub fn match_pathname(
        &self,
        pathname: &str,
        reporter: &dyn WarningReporter,
    ) -> Option<PathMatch> {
        let captures = self.matcher.captures(pathname)?;
        // Group 1 wraps the matched span; the prefix boundary sits outside it.
        let matched = captures.get(1)?.as_str();
        let mut pathname_base = trim_trailing_slashes(matched).to_string();
        let mut params = RouteParams::new();

        for (index, name) in self.param_names.iter().enumerate() {
            let raw = captures.get(index + 2).map_or("", |m| m.as_str());

            if name == SPLAT {
                // The base comes from the raw remainder so it stays a valid pathname.
                let consumed = &matched[..matched.len() - raw.len()];
                pathname_base = trim_trailing_slashes(consumed).to_string();
            }

            params.insert(name.clone(), decode_param(name, raw, reporter));
        }

        Some(PathMatch {
            params,
            pathname: matched.to_string(),
            pathname_base,
            pattern: self.pattern.clone(),
        })
    }
}

/// Translate a route path into regex source and its param names.
fn build_source(path: &str, end: bool) -> (String, Vec<String>) {
    let is_splat = path.ends_with('*');

    // Drop a trailing `*` and any slashes before it; the splat is added back below.
    let trimmed = path
        .strip_suffix('*')
        .unwrap_or(path)
        .trim_end_matches('/')
        .trim_start_matches('/');
    let normalized = format!("/{}", trimmed);

    let mut body = String::with_capacity(normalized.len() * 2);
    let mut param_names = Vec::new();
    let mut rest = normalized.as_str();

    while let Some(index) = rest.find("/:") {
        let after = &rest[index + 2..];
        let name_len = after
            .find(|c: char| !is_param_char(c))
            .unwrap_or(after.len());

        if name_len == 0 {
            body.push_str(&regex::escape(&rest[..index + 2]));
            rest = after;
            continue;
        }

        body.push_str(&regex::escape(&rest[..index]));
        body.push_str("/([^/]+)");
        param_names.push(after[..name_len].to_string());
        rest = &after[name_len..];
    }
    body.push_str(&regex::escape(rest));

    let source = if is_splat {
        param_names.push(SPLAT.to_string());
        if path == "*" || path == "/*" {
            // The leading `/` is already matched; the splat is everything after it.
            format!("^({}(.*)$)", body)
        } else {
            // The separating `/` is not part of the splat value.
            format!("^({}(?:/(.+)|/*)$)", body)
        }
    } else if end {
        format!("^({}/*$)", body)
    } else if normalized == "/" {
        format!("^({})", body)
    } else {
        format!("^({})(?:$|[/.~-]|%[0-9A-Fa-f]{{2}})", body)
    };

    (source, param_names)
}

fn decode_param(name: &str, raw: &str, reporter: &dyn WarningReporter) -> String {
    match decode_path_segment(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            reporter.warn(
                raw,
                &format!(
                    "The value for the URL param \"{}\" will not be decoded because the string \
                     \"{}\" is a malformed URL segment. This is probably due to a bad percent \
                     encoding ({}).",
                    name, raw, e
                ),
            );
            raw.to_string()
        }
    }
}

/// Compile a route path with the default (logging) reporter.
///
/// # Example
///
/// ```
/// use route_matcher::compile_path;
///
/// let compiled = compile_path("/users/:id/*", false, true).unwrap();
/// assert_eq!(compiled.param_names(), ["id", "*"]);
/// ```
pub fn compile_path(path: &str, case_sensitive: bool, end: bool) -> Result<CompiledPattern> {
    compile_path_with(
        PathPattern::new(path).case_sensitive(case_sensitive).end(end),
        &LogReporter,
    )
}

/// Compile a pattern, sending warnings to `reporter`.
pub fn compile_path_with(
    pattern: impl Into<PathPattern>,
    reporter: &dyn WarningReporter,
) -> Result<CompiledPattern> {
    CompiledPattern::new(pattern.into(), reporter)
}

/// Match a single pattern against a pathname.
///
/// # Example
///
/// ```
/// use route_matcher::{match_path, PathPattern};
///
/// let matched = match_path("/users/:id", "/users/123").unwrap();
/// assert_eq!(matched.params.get("id"), Some("123"));
///
/// let prefix = match_path(PathPattern::new("/users").end(false), "/users/123/edit").unwrap();
/// assert_eq!(prefix.pathname_base, "/users");
/// ```
pub fn match_path(pattern: impl Into<PathPattern>, pathname: &str) -> Option<PathMatch> {
    match_path_with(pattern, pathname, &LogReporter)
}

/// Match a single pattern, sending warnings to `reporter`.
pub fn match_path_with(
    pattern: impl Into<PathPattern>,
    pathname: &str,
    reporter: &dyn WarningReporter,
) -> Option<PathMatch> {
    match CompiledPattern::new(pattern.into(), reporter) {
        Ok(compiled) => compiled.match_pathname(pathname, reporter),
        Err(e) => {
            error_log!("{}", e);
            None
        }
    }
}

/// Build a pathname from a route path by substituting params.
///
/// `:name` segments are replaced with `params[name]` and a trailing `*` with
/// the splat value (or nothing when no splat is given).
///
/// # Example
///
/// ```
/// use route_matcher::{generate_path, RouteParams};
///
/// let params: RouteParams = [("id", "42")].into_iter().collect();
/// assert_eq!(generate_path("/users/:id", &params).unwrap(), "/users/42");
///
/// let params: RouteParams = [("*", "a/b.txt")].into_iter().collect();
/// assert_eq!(generate_path("files/*", &params).unwrap(), "files/a/b.txt");
/// ```
pub fn generate_path(path: &str, params: &RouteParams) -> Result<String> {
    let (template, has_splat) = match path.strip_suffix('*') {
        Some(prefix) => (prefix.trim_end_matches('/'), true),
        None => (path, false),
    };

    let mut generated = String::with_capacity(path.len());
    let mut rest = template;

    while let Some(index) = rest.find(':') {
        generated.push_str(&rest[..index]);
        let after = &rest[index + 1..];
        let name_len = after
            .find(|c: char| !is_param_char(c))
            .unwrap_or(after.len());

        if name_len == 0 {
            generated.push(':');
            rest = after;
            continue;
        }

        let name = &after[..name_len];
        let value = params.get(name).ok_or_else(|| RouteError::MissingParam {
            name: name.to_string(),
            path: path.to_string(),
        })?;
        generated.push_str(value);
        rest = &after[name_len..];
    }
    generated.push_str(rest);

    if has_splat {
        if let Some(splat) = params.splat() {
            generated.push('/');
            generated.push_str(splat.trim_start_matches('/'));
        }
    }

    Ok(generated)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn prefix(path: &str) -> PathPattern {
        PathPattern::new(path).end(false)
    }

    #[test]
    fn test_param_names_in_order() {
        let compiled = compile_path("/users/:userId/posts/:post-id", false, true).unwrap();
        assert_eq!(compiled.param_names(), ["userId", "post-id"]);

        let compiled = compile_path("/files/*", false, true).unwrap();
        assert_eq!(compiled.param_names(), ["*"]);
    }

    #[test]
    fn test_static_match() {
        let matched = match_path("/users", "/users").unwrap();
        assert_eq!(matched.pathname, "/users");
        assert_eq!(matched.pathname_base, "/users");
        assert!(matched.params.is_empty());

        assert!(match_path("/users", "/posts").is_none());
        assert!(match_path("/users", "/users/123").is_none());
    }

    #[test]
    fn test_trailing_slash_ignored_when_matching_to_end() {
        let matched = match_path("/users", "/users/").unwrap();
        assert_eq!(matched.pathname, "/users/");
        assert_eq!(matched.pathname_base, "/users");

        let matched = match_path("/users/", "/users").unwrap();
        assert_eq!(matched.pathname, "/users");
    }

    #[test]
    fn test_dynamic_match() {
        let matched = match_path("/users/:id", "/users/123").unwrap();
        assert_eq!(matched.params.get("id"), Some("123"));

        assert!(match_path("/users/:id", "/users").is_none());
        assert!(match_path("/users/:id", "/users/").is_none());
        assert!(match_path("/users/:id", "/users/123/posts").is_none());
    }

    #[test]
    fn test_case_sensitivity() {
        assert!(match_path("/About", "/about").is_some());
        assert!(match_path(PathPattern::new("/About").case_sensitive(true), "/about").is_none());
        assert!(match_path(PathPattern::new("/About").case_sensitive(true), "/About").is_some());
    }

    #[test]
    fn test_case_folding_is_unicode_aware() {
        assert!(match_path("/ÄPP", "/äpp").is_some());
        assert!(match_path("/s", "/\u{17F}").is_some());
        assert!(match_path("/k", "/\u{212A}").is_some());
        assert!(match_path(PathPattern::new("/k").case_sensitive(true), "/\u{212A}").is_none());
    }

    #[test]
    fn test_literal_regex_characters_are_escaped() {
        assert!(match_path("/a.b", "/a.b").is_some());
        assert!(match_path("/a.b", "/axb").is_none());
        assert!(match_path("/(group)", "/(group)").is_some());
        assert!(match_path("/price$", "/price$").is_some());
    }

    #[test]
    fn test_colon_without_name_is_literal() {
        assert!(match_path("/a/:", "/a/:").is_some());
        assert!(match_path("/a:b", "/a:b").is_some());
        assert!(match_path("/a:b", "/ax").is_none());
    }

    #[test]
    fn test_prefix_boundary() {
        assert!(match_path(prefix("/home"), "/home2").is_none());

        let matched = match_path(prefix("/home"), "/home/about").unwrap();
        assert_eq!(matched.pathname, "/home");
        assert_eq!(matched.pathname_base, "/home");

        assert!(match_path(prefix("/home"), "/home").is_some());
        assert!(match_path(prefix("/home"), "/home.json").is_some());
        assert!(match_path(prefix("/home"), "/home-page").is_some());
        assert!(match_path(prefix("/home"), "/home~x").is_some());
        assert!(match_path(prefix("/home"), "/home%20x").is_some());
        assert!(match_path(prefix("/home"), "/home%2").is_none());
    }

    #[test]
    fn test_root_prefix_matches_anything() {
        let matched = match_path(prefix(""), "/users/1").unwrap();
        assert_eq!(matched.pathname, "/");
        assert_eq!(matched.pathname_base, "/");

        assert!(match_path(prefix("/"), "/@scope").is_some());
    }

    #[test]
    fn test_splat_match() {
        let matched = match_path("/files/*", "/files/docs/report.pdf").unwrap();
        assert_eq!(matched.params.splat(), Some("docs/report.pdf"));
        assert_eq!(matched.pathname, "/files/docs/report.pdf");
        assert_eq!(matched.pathname_base, "/files");

        let matched = match_path("/files/*", "/files").unwrap();
        assert_eq!(matched.params.splat(), Some(""));
        assert_eq!(matched.pathname_base, "/files");

        let matched = match_path("/files/*", "/files/").unwrap();
        assert_eq!(matched.params.splat(), Some(""));

        assert!(match_path("/files/*", "/filesystem").is_none());
    }

    #[test]
    fn test_root_splat_keeps_everything_after_root() {
        let matched = match_path("*", "/a/b").unwrap();
        assert_eq!(matched.params.splat(), Some("a/b"));
        assert_eq!(matched.pathname_base, "/");

        let matched = match_path("/*", "/").unwrap();
        assert_eq!(matched.params.splat(), Some(""));
        assert_eq!(matched.pathname_base, "/");
    }

    #[test]
    fn test_splat_base_uses_raw_value() {
        let matched = match_path("/files/*", "/files/a%20b/c").unwrap();
        assert_eq!(matched.params.splat(), Some("a b/c"));
        assert_eq!(matched.pathname_base, "/files");
    }

    #[test]
    fn test_params_are_decoded() {
        let matched = match_path("/users/:name", "/users/j%C3%B6rg").unwrap();
        assert_eq!(matched.params.get("name"), Some("jörg"));
        assert_eq!(matched.pathname, "/users/j%C3%B6rg");
    }

    #[test]
    fn test_malformed_param_falls_back_to_raw() {
        let warnings = RefCell::new(Vec::new());
        let reporter = |key: &str, _: &str| warnings.borrow_mut().push(key.to_string());

        let matched = match_path_with("/users/:name", "/users/100%", &reporter).unwrap();
        assert_eq!(matched.params.get("name"), Some("100%"));
        assert_eq!(*warnings.borrow(), vec!["100%".to_string()]);
    }

    #[test]
    fn test_star_without_slash_warns_and_normalizes() {
        let warnings = RefCell::new(Vec::new());
        let reporter = |key: &str, message: &str| {
            warnings
                .borrow_mut()
                .push((key.to_string(), message.to_string()))
        };

        let matched = match_path_with("/files*", "/files/a", &reporter).unwrap();
        assert_eq!(matched.params.splat(), Some("a"));

        let warnings = warnings.borrow();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].0, "/files*");
        assert!(warnings[0].1.contains("\"/files/*\""));
    }

    #[test]
    fn test_bare_star_does_not_warn() {
        let count = RefCell::new(0);
        let reporter = |_: &str, _: &str| *count.borrow_mut() += 1;

        assert!(match_path_with("*", "/x", &reporter).is_some());
        assert!(match_path_with("/a/*", "/a/x", &reporter).is_some());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_round_trip_static_paths() {
        for path in ["/", "/about", "/a/b/c", "/docs/v1.2"] {
            let matched = match_path(path, path).unwrap();
            assert_eq!(matched.pathname, path);
        }
    }

    #[test]
    fn test_match_echoes_pattern() {
        let pattern = PathPattern::new("/a").case_sensitive(true);
        let matched = match_path(&pattern, "/a").unwrap();
        assert_eq!(matched.pattern, pattern);
    }

    #[test]
    fn test_generate_path() {
        let params: RouteParams = [("id", "42")].into_iter().collect();
        assert_eq!(generate_path(":id/detail", &params).unwrap(), "42/detail");

        let params: RouteParams = [("*", "a/b.txt")].into_iter().collect();
        assert_eq!(generate_path("files/*", &params).unwrap(), "files/a/b.txt");
    }

    #[test]
    fn test_generate_path_splat_variants() {
        let params = RouteParams::new();
        assert_eq!(generate_path("/files/*", &params).unwrap(), "/files");

        let params: RouteParams = [("*", "/nested/x")].into_iter().collect();
        assert_eq!(generate_path("/files/*", &params).unwrap(), "/files/nested/x");
        assert_eq!(generate_path("*", &params).unwrap(), "/nested/x");
    }

    #[test]
    fn test_generate_path_multiple_params() {
        let params: RouteParams = [("userId", "7"), ("postId", "99")].into_iter().collect();
        assert_eq!(
            generate_path("/users/:userId/posts/:postId", &params).unwrap(),
            "/users/7/posts/99"
        );
    }

    #[test]
    fn test_generate_path_missing_param() {
        let err = generate_path("/users/:id", &RouteParams::new()).unwrap_err();
        assert_eq!(
            err,
            RouteError::MissingParam {
                name: "id".to_string(),
                path: "/users/:id".to_string(),
            }
        );
    }
}
