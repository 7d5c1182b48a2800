//! Driver-facing spawn and join interface for the worker loops

use std::fmt;
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam::channel::{self, Sender};
use eyre::{Result, eyre};
use tracing::debug;

use crate::queue::BoundedQueue;

use super::config::CoordinatorConfig;
use super::consumer::Consumer;
use super::messages::{ConsumerCommand, ConsumerMetrics, ProducerCommand, ProducerMetrics, RunReport};
use super::producer::Producer;

/// Spawns the producer and consumer loops around a shared queue
pub struct Coordinator;

impl Coordinator {
    /// Spawn both loops on their own OS threads and return the driver handle
    pub fn spawn<T>(queue: Arc<BoundedQueue<T>>, config: &CoordinatorConfig) -> Result<CoordinatorHandle<T>>
    where
        T: fmt::Debug + Send + 'static,
    {
        let (producer_tx, producer_rx) = channel::bounded(config.command_buffer);
        let (consumer_tx, consumer_rx) = channel::bounded(config.command_buffer);

        let producer = Producer::new(Arc::clone(&queue), producer_rx, config.terminate_policy).spawn()?;
        let consumer = Consumer::new(queue, consumer_rx, config.terminate_policy).spawn()?;

        Ok(CoordinatorHandle {
            producer_tx,
            consumer_tx,
            producer,
            consumer,
        })
    }
}

/// Handle the driver uses to feed the command streams and join the loops.
///
/// Each stream is consumed in FIFO order by its loop; there is no ordering
/// guarantee across the two streams beyond the queue's own linearizability.
/// Dropping the handle without terminating closes both streams, which the
/// loops treat the same as the sentinel.
///
/// A loop blocked in the queue monitor wakes only on the complementary queue
/// operation, so a terminate sentinel queued behind a permanently blocked
/// command never executes and [`join`](Self::join) hangs with it. Sentinels
/// belong after the work commands of both streams.
pub struct CoordinatorHandle<T> {
    producer_tx: Sender<ProducerCommand<T>>,
    consumer_tx: Sender<ConsumerCommand>,
    producer: JoinHandle<ProducerMetrics>,
    consumer: JoinHandle<ConsumerMetrics>,
}

impl<T> CoordinatorHandle<T> {
    /// Enqueue a push command on the producer stream
    pub fn push(&self, value: T) -> Result<()> {
        self.producer_tx
            .send(ProducerCommand::Push(value))
            .map_err(|_| eyre!("Producer stream closed"))
    }

    /// Enqueue a pop request on the consumer stream
    pub fn pop(&self) -> Result<()> {
        self.consumer_tx
            .send(ConsumerCommand::Pop)
            .map_err(|_| eyre!("Consumer stream closed"))
    }

    /// Enqueue the terminate sentinel on both streams
    pub fn terminate(&self) -> Result<()> {
        debug!("terminating both loops");
        self.producer_tx
            .send(ProducerCommand::Terminate)
            .map_err(|_| eyre!("Producer stream closed"))?;
        self.consumer_tx
            .send(ConsumerCommand::Terminate)
            .map_err(|_| eyre!("Consumer stream closed"))?;
        Ok(())
    }

    /// Join both loops and aggregate their metrics
    pub fn join(self) -> Result<RunReport> {
        // Close the streams first so a loop that never saw its sentinel
        // still observes the disconnect.
        drop(self.producer_tx);
        drop(self.consumer_tx);

        let producer = self.producer.join().map_err(|_| eyre!("Producer thread panicked"))?;
        let consumer = self.consumer.join().map_err(|_| eyre!("Consumer thread panicked"))?;

        Ok(RunReport { producer, consumer })
    }
}
