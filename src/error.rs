//! Error types for cache construction.
//!
//! Only construction can fail. Every operation on a live cache is total: a
//! missing key is reported through `Option`/`bool`, never through an error.
//!
//! # Examples
//!
//! ```
//! use recency_cache::{CacheError, LruCache};
//!
//! let err = LruCache::<u32, &str>::try_new(0).unwrap_err();
//! assert_eq!(err, CacheError::InvalidCapacity(0));
//! assert!(err.to_string().contains("positive"));
//! ```

use thiserror::Error;

/// Errors returned by fallible cache constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The requested capacity was zero or negative.
    #[error("cache capacity must be a positive integer, got {0}")]
    InvalidCapacity(i64),
}
