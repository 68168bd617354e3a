use thiserror::Error;

/// Errors surfaced by the cache facade.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
	/// Subscript-style read or delete named a key that is not present.
	#[error("key not found in cache")]
	NotFound,

	/// Capacity must be a positive number, at construction and on resize.
	#[error("capacity should be a positive number")]
	ZeroCapacity,
}

/// A specialized `Result` type for cache operations.
pub type Result<T, E = CacheError> = std::result::Result<T, E>;
