//! Consumer loop: turns pop requests into queue removals

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::Receiver;
use eyre::{Context, Result};
use tracing::{debug, info};

use crate::queue::BoundedQueue;

use super::config::TerminatePolicy;
use super::messages::{ConsumerCommand, ConsumerMetrics};

/// Worker that consumes the consumer command stream.
///
/// Holds at most one in-flight command. A pop request against an empty queue
/// waits in the queue monitor until data arrives; the popped value is logged
/// and discarded, the core does not forward it anywhere.
pub struct Consumer<T> {
    queue: Arc<BoundedQueue<T>>,
    commands: Receiver<ConsumerCommand>,
    policy: TerminatePolicy,
    metrics: ConsumerMetrics,
}

impl<T> Consumer<T>
where
    T: fmt::Debug + Send + 'static,
{
    /// Create a consumer reading `commands` and popping from `queue`
    pub fn new(queue: Arc<BoundedQueue<T>>, commands: Receiver<ConsumerCommand>, policy: TerminatePolicy) -> Self {
        Self {
            queue,
            commands,
            policy,
            metrics: ConsumerMetrics::default(),
        }
    }

    /// Spawn the loop on a named OS thread
    pub fn spawn(self) -> Result<JoinHandle<ConsumerMetrics>> {
        thread::Builder::new()
            .name("consumer".into())
            .spawn(move || self.run())
            .context("Failed to spawn consumer thread")
    }

    /// Run the loop on the current thread until the terminate sentinel is
    /// observed (or the stream disconnects), returning the accumulated
    /// metrics
    pub fn run(mut self) -> ConsumerMetrics {
        info!("consumer started");

        while let Ok(command) = self.commands.recv() {
            match command {
                ConsumerCommand::Pop => self.pop(),
                ConsumerCommand::Terminate => {
                    debug!(policy = %self.policy, "consumer observed terminate");
                    if self.policy == TerminatePolicy::DrainPending {
                        self.drain();
                    }
                    break;
                }
            }
        }

        info!(
            popped = self.metrics.popped,
            blocked_on_empty = self.metrics.blocked_on_empty,
            "consumer stopped"
        );
        self.metrics
    }

    fn pop(&mut self) {
        match self.queue.pop() {
            Some(value) => {
                debug!(?value, "popped");
                self.metrics.popped += 1;
            }
            None => {
                debug!("queue empty, consumer waiting for data");
                self.metrics.blocked_on_empty += 1;
                let value = self.queue.pop_blocking();
                debug!(?value, "popped after wait");
                self.metrics.popped += 1;
            }
        }
    }

    /// Execute the pop requests already buffered behind the sentinel
    fn drain(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            if command == ConsumerCommand::Pop {
                self.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;
    use std::time::Duration;

    fn queue(capacity: i64) -> Arc<BoundedQueue<u32>> {
        Arc::new(BoundedQueue::new(capacity).unwrap())
    }

    #[test]
    fn test_consumer_pops_until_sentinel() {
        let queue = queue(4);
        queue.push(1).unwrap();
        queue.push(2).unwrap();

        let (tx, rx) = channel::unbounded();
        tx.send(ConsumerCommand::Pop).unwrap();
        tx.send(ConsumerCommand::Pop).unwrap();
        tx.send(ConsumerCommand::Terminate).unwrap();

        let metrics = Consumer::new(Arc::clone(&queue), rx, TerminatePolicy::StopImmediately).run();

        assert_eq!(metrics.popped, 2);
        assert_eq!(metrics.blocked_on_empty, 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_consumer_exits_on_stream_disconnect() {
        let queue = queue(4);
        queue.push(5).unwrap();

        let (tx, rx) = channel::unbounded();
        tx.send(ConsumerCommand::Pop).unwrap();
        drop(tx);

        let metrics = Consumer::new(Arc::clone(&queue), rx, TerminatePolicy::StopImmediately).run();

        assert_eq!(metrics.popped, 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_stop_immediately_drops_buffered_requests() {
        let queue = queue(4);
        queue.push(1).unwrap();
        queue.push(2).unwrap();

        let (tx, rx) = channel::unbounded();
        tx.send(ConsumerCommand::Pop).unwrap();
        tx.send(ConsumerCommand::Terminate).unwrap();
        tx.send(ConsumerCommand::Pop).unwrap();

        let metrics = Consumer::new(Arc::clone(&queue), rx, TerminatePolicy::StopImmediately).run();

        assert_eq!(metrics.popped, 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_drain_pending_executes_buffered_requests() {
        let queue = queue(4);
        queue.push(1).unwrap();
        queue.push(2).unwrap();

        let (tx, rx) = channel::unbounded();
        tx.send(ConsumerCommand::Pop).unwrap();
        tx.send(ConsumerCommand::Terminate).unwrap();
        tx.send(ConsumerCommand::Pop).unwrap();

        let metrics = Consumer::new(Arc::clone(&queue), rx, TerminatePolicy::DrainPending).run();

        assert_eq!(metrics.popped, 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_consumer_blocks_on_empty_then_resumes() {
        let queue = queue(4);
        let (tx, rx) = channel::unbounded();
        tx.send(ConsumerCommand::Pop).unwrap();
        tx.send(ConsumerCommand::Terminate).unwrap();

        let worker = Consumer::new(Arc::clone(&queue), rx, TerminatePolicy::StopImmediately)
            .spawn()
            .unwrap();

        // The pop request must park until a value arrives
        std::thread::sleep(Duration::from_millis(50));
        queue.push(7).unwrap();

        let metrics = worker.join().unwrap();
        assert_eq!(metrics.popped, 1);
        assert_eq!(metrics.blocked_on_empty, 1);
        assert!(queue.is_empty());
    }
}
