//! Error types for the boundcache library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: returned by construction and by `put_with_ttl_secs` when
//!   an argument is out of range. A failed call leaves no partially built
//!   cache and no changed state behind.
//! - [`InvariantError`]: returned by
//!   [`CacheCore::check_invariants`](crate::cache::CacheCore::check_invariants)
//!   when the store, order index and counters disagree. Never produced by the
//!   normal call surface.
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::error::CacheError;
//! use boundcache::{Cache, EvictionKind};
//!
//! let err = Cache::<String, i32>::new(0, EvictionKind::Lru).unwrap_err();
//! assert!(matches!(err, CacheError::InvalidArgument(_)));
//! assert!(err.to_string().contains("max_size"));
//! ```

use thiserror::Error;

/// Errors surfaced to callers of the cache API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// An argument is outside its documented domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CacheError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}
