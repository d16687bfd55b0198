//! Construction-time error types

use thiserror::Error;

/// Errors returned while building a cache.
///
/// Once a cache exists none of its operations can fail: a lookup that finds nothing
/// is a miss (`None`), not an error.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("unknown cache strategy: {0}")]
    UnknownStrategy(String),

    #[error("expiration duration must be positive for the time-based strategy")]
    InvalidExpiration,

    #[error("cache capacity must be at least 1")]
    InvalidCapacity,

    #[error("failed to spawn the expiry sweeper thread: {0}")]
    SweeperSpawn(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_strategy_message_names_value() {
        let err = CacheError::UnknownStrategy("mru".to_string());
        assert_eq!(err.to_string(), "unknown cache strategy: mru");
    }

    #[test]
    fn test_io_error_converts_to_sweeper_spawn() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "no threads left");
        let err: CacheError = io.into();
        assert!(matches!(err, CacheError::SweeperSpawn(_)));
        assert!(err.to_string().contains("no threads left"));
    }
}
