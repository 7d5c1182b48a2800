//! Queue error types

use thiserror::Error;

/// Errors that can occur when constructing a queue
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("Queue capacity must be non-negative (got {0})")]
    InvalidCapacity(i64),
}

/// Rejection returned by a push against a full queue.
///
/// Carries the rejected value back so the caller can retry once the
/// backpressure relieves. Distinct from the empty case on pop, which is an
/// expected steady state and reported as an absence, not an error.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Queue is full")]
pub struct QueueFull<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_capacity_message() {
        let err = QueueError::InvalidCapacity(-3);

        let msg = err.to_string();
        assert!(msg.contains("-3"));
        assert!(msg.contains("non-negative"));
    }

    #[test]
    fn test_queue_full_returns_value() {
        let QueueFull(value) = QueueFull(42);
        assert_eq!(value, 42);
    }
}
