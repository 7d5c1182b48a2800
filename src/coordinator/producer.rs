//! Producer loop: turns push commands into queue insertions

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::Receiver;
use eyre::{Context, Result};
use tracing::{debug, info};

use crate::queue::{BoundedQueue, QueueFull};

use super::config::TerminatePolicy;
use super::messages::{ProducerCommand, ProducerMetrics};

/// Worker that consumes the producer command stream.
///
/// Holds at most one in-flight command. A push rejected by a full queue is
/// retried through the queue monitor and is not abandoned until it lands, so
/// every accepted push command is delivered at least once.
pub struct Producer<T> {
    queue: Arc<BoundedQueue<T>>,
    commands: Receiver<ProducerCommand<T>>,
    policy: TerminatePolicy,
    metrics: ProducerMetrics,
}

impl<T> Producer<T>
where
    T: fmt::Debug + Send + 'static,
{
    /// Create a producer reading `commands` and pushing into `queue`
    pub fn new(queue: Arc<BoundedQueue<T>>, commands: Receiver<ProducerCommand<T>>, policy: TerminatePolicy) -> Self {
        Self {
            queue,
            commands,
            policy,
            metrics: ProducerMetrics::default(),
        }
    }

    /// Spawn the loop on a named OS thread
    pub fn spawn(self) -> Result<JoinHandle<ProducerMetrics>> {
        thread::Builder::new()
            .name("producer".into())
            .spawn(move || self.run())
            .context("Failed to spawn producer thread")
    }

    /// Run the loop on the current thread until the terminate sentinel is
    /// observed (or the stream disconnects), returning the accumulated
    /// metrics
    pub fn run(mut self) -> ProducerMetrics {
        info!("producer started");

        while let Ok(command) = self.commands.recv() {
            match command {
                ProducerCommand::Push(value) => self.push(value),
                ProducerCommand::Terminate => {
                    debug!(policy = %self.policy, "producer observed terminate");
                    if self.policy == TerminatePolicy::DrainPending {
                        self.drain();
                    }
                    break;
                }
            }
        }

        info!(
            pushed = self.metrics.pushed,
            blocked_on_full = self.metrics.blocked_on_full,
            "producer stopped"
        );
        self.metrics
    }

    fn push(&mut self, value: T) {
        debug!(?value, "pushing");
        match self.queue.push(value) {
            Ok(()) => self.metrics.pushed += 1,
            Err(QueueFull(value)) => {
                debug!("queue full, producer waiting for room");
                self.metrics.blocked_on_full += 1;
                self.queue.push_blocking(value);
                debug!("producer woke, push completed");
                self.metrics.pushed += 1;
            }
        }
    }

    /// Execute the push commands already buffered behind the sentinel
    fn drain(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            if let ProducerCommand::Push(value) = command {
                self.push(value);
            }
        }
    }
}
