//! Conveyor - bounded blocking queue with coordinated worker loops
//!
//! A fixed-capacity FIFO queue plus the two control loops that drive it
//! through external command streams. The producer loop turns push commands
//! into queue insertions and waits for room when the queue is full; the
//! consumer loop turns pop requests into removals and waits for data when
//! the queue is empty. A driver feeds both streams and joins the loops after
//! sending the terminate sentinels.
//!
//! # Core Concepts
//!
//! - **Backpressure by blocking**: a rejected push is retried in the queue
//!   monitor, never dropped
//! - **Monitor, not flags**: wait conditions derive from the guarded length,
//!   so they cannot drift out of sync with queue state
//! - **Sentinel termination**: each stream ends with a terminate command;
//!   closing the stream is equivalent
//!
//! # Modules
//!
//! - [`queue`] - the bounded FIFO monitor
//! - [`coordinator`] - worker loops, command types, spawn/join handle
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod queue;

// Re-export commonly used types
pub use config::{Config, DemoConfig, QueueConfig};
pub use coordinator::{
    Consumer, ConsumerCommand, ConsumerMetrics, Coordinator, CoordinatorConfig, CoordinatorHandle, Producer,
    ProducerCommand, ProducerMetrics, RunReport, TerminatePolicy,
};
pub use queue::{BoundedQueue, QueueError, QueueFull};
