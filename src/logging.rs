//! Logging abstraction layer and warning reporting
//!
//! This module provides logging macros that work with both `log` and `tracing` crates,
//! and the [`WarningReporter`] side-channel the matcher uses for non-fatal problems.
//!
//! # Features
//!
//! - `log` (default) - Uses the standard `log` crate
//! - `tracing` - Uses the `tracing` crate for structured logging
//!
//! Choose one feature at compile time. They are mutually exclusive.
//!
//! # Warnings
//!
//! The matcher never keeps global state. Warnings such as a malformed
//! percent-encoded param are handed to a [`WarningReporter`] together with a
//! stable key, and the caller decides what to do with them:
//!
//! ```
//! use route_matcher::{match_path_with, OnceReporter, LogReporter};
//!
//! let reporter = OnceReporter::new(LogReporter);
//! let matched = match_path_with("/files/:name", "/files/%E0%A4%A", &reporter).unwrap();
//! assert_eq!(matched.params.get("name"), Some("%E0%A4%A"));
//! ```

use std::collections::HashSet;
use std::sync::Mutex;

/// Trace-level logging
///
/// Logs detailed information for debugging purposes.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// Debug-level logging
///
/// Logs information useful for debugging.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

/// Info-level logging
///
/// Logs general informational messages.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)*);
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

/// Error-level logging
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)*);
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
    };
}

// ============================================================================
// Warning reporting
// ============================================================================

/// Receiver for non-fatal matching warnings.
///
/// `key` identifies the warning (the offending route path or param value) so
/// that reporters can de-duplicate; `message` is human readable.
pub trait WarningReporter {
    /// Report a warning
    fn warn(&self, key: &str, message: &str);
}

impl<F> WarningReporter for F
where
    F: Fn(&str, &str),
{
    fn warn(&self, key: &str, message: &str) {
        self(key, message);
    }
}

/// Forwards every warning to the configured logging backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl WarningReporter for LogReporter {
    fn warn(&self, key: &str, message: &str) {
        warn_log!("[{}] {}", key, message);
    }
}

/// Forwards each distinct warning key to the inner reporter at most once.
#[derive(Debug, Default)]
pub struct OnceReporter<R> {
    inner: R,
    seen: Mutex<HashSet<String>>,
}

impl<R: WarningReporter> OnceReporter<R> {
    /// Wrap a reporter
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            seen: Mutex::new(HashSet::new()),
        }
    }

    /// Number of distinct keys reported so far
    pub fn reported(&self) -> usize {
        self.seen.lock().map(|seen| seen.len()).unwrap_or(0)
    }
}

impl<R: WarningReporter> WarningReporter for OnceReporter<R> {
    fn warn(&self, key: &str, message: &str) {
        let first = match self.seen.lock() {
            Ok(mut seen) => seen.insert(key.to_string()),
            // A poisoned set only loses de-duplication.
            Err(poisoned) => poisoned.into_inner().insert(key.to_string()),
        };

        if first {
            self.inner.warn(key, message);
        } else {
            trace_log!("Suppressed repeated warning for '{}'", key);
        }
    }
}
