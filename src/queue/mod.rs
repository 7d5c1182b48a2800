//! Bounded FIFO queue with monitor-based blocking

mod bounded;
mod error;

pub use bounded::BoundedQueue;
pub use error::{QueueError, QueueFull};
