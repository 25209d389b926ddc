//! Compiled pattern caching
//!
//! Matching a route tree compiles one regex per branch segment. When the same
//! tree is matched over and over (every navigation), this cache keeps the
//! compiled patterns around with an LRU eviction policy.

use crate::error::Result;
use crate::logging::WarningReporter;
use crate::pattern::{CompiledPattern, PathMatch, PathPattern};
use crate::{error_log, trace_log};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Cache performance statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub invalidations: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Compiled pattern cache with LRU eviction
///
/// Default capacity: 1000 patterns.
///
/// # Example
///
/// ```
/// use route_matcher::{LogReporter, PathPattern, PatternCache};
///
/// let mut cache = PatternCache::new();
/// let pattern = PathPattern::new("/users/:id");
///
/// let first = cache.match_path(&pattern, "/users/1", &LogReporter).unwrap();
/// let second = cache.match_path(&pattern, "/users/2", &LogReporter).unwrap();
/// assert_eq!(first.params.get("id"), Some("1"));
/// assert_eq!(second.params.get("id"), Some("2"));
/// assert_eq!(cache.stats().hits, 1);
/// ```
#[derive(Debug)]
pub struct PatternCache {
    patterns: LruCache<PathPattern, Arc<CompiledPattern>>,
    stats: CacheStats,
}

impl PatternCache {
    const DEFAULT_CAPACITY: usize = 1000;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache holding up to `capacity` patterns (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            patterns: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Return the compiled form of `pattern`, compiling it on a miss.
    ///
    /// Patterns that fail to compile are not cached.
    pub fn get_or_compile(
        &mut self,
        pattern: &PathPattern,
        reporter: &dyn WarningReporter,
    ) -> Result<Arc<CompiledPattern>> {
        if let Some(compiled) = self.patterns.get(pattern) {
            self.stats.hits += 1;
            trace_log!("Pattern cache hit for '{}'", pattern.path);
            return Ok(Arc::clone(compiled));
        }

        self.stats.misses += 1;
        trace_log!("Pattern cache miss for '{}'", pattern.path);

        let compiled = Arc::new(CompiledPattern::new(pattern.clone(), reporter)?);
        self.patterns.push(pattern.clone(), Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Cached equivalent of [`match_path_with`](crate::match_path_with)
    pub fn match_path(
        &mut self,
        pattern: &PathPattern,
        pathname: &str,
        reporter: &dyn WarningReporter,
    ) -> Option<PathMatch> {
        match self.get_or_compile(pattern, reporter) {
            Ok(compiled) => compiled.match_pathname(pathname, reporter),
            Err(e) => {
                error_log!("{}", e);
                None
            }
        }
    }

    pub fn clear(&mut self) {
        trace_log!("Clearing pattern cache");
        self.patterns.clear();
        self.stats.invalidations += 1;
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.patterns.cap().get()
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PatternCache {
    fn clone(&self) -> Self {
        let mut patterns = LruCache::new(self.patterns.cap());
        // Oldest first so the clone keeps the same recency order.
        for (pattern, compiled) in self.patterns.iter().rev() {
            patterns.push(pattern.clone(), Arc::clone(compiled));
        }
        Self {
            patterns,
            stats: self.stats.clone(),
        }
    }
}
