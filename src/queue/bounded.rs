//! Bounded FIFO queue implemented as a monitor
//!
//! One mutex guards the storage; two condition variables (`not_full`,
//! `not_empty`) are derived directly from the guarded length, so the wait
//! conditions cannot drift out of sync with the queue state. Waiters release
//! the lock while suspended and re-check their condition on wake.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use super::error::{QueueError, QueueFull};

/// Fixed-capacity, thread-safe FIFO queue.
///
/// Non-blocking [`push`](Self::push)/[`pop`](Self::pop) report full/empty
/// back to the caller; [`push_blocking`](Self::push_blocking)/
/// [`pop_blocking`](Self::pop_blocking) suspend in the monitor until the
/// operation can complete. The queue places no formatting bound on `T`;
/// callers that log values carry that requirement themselves.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    items: Mutex<VecDeque<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Create an empty queue holding at most `capacity` elements.
    ///
    /// The capacity arrives from external configuration, so the raw integer
    /// is validated here: negative values are rejected. Zero is legal; such
    /// a queue reports full to every push and empty to every pop.
    pub fn new(capacity: i64) -> Result<Self, QueueError> {
        if capacity < 0 {
            return Err(QueueError::InvalidCapacity(capacity));
        }
        Ok(Self {
            items: Mutex::new(VecDeque::with_capacity(capacity as usize)),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity: capacity as usize,
        })
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        // Push/pop never leave the deque torn, so a poisoned lock only
        // records that some holder panicked; the state is still usable.
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `value` at the tail without blocking.
    ///
    /// On a full queue nothing is mutated and the rejected value is handed
    /// back inside [`QueueFull`].
    pub fn push(&self, value: T) -> Result<(), QueueFull<T>> {
        let mut items = self.lock();
        if items.len() == self.capacity {
            return Err(QueueFull(value));
        }
        items.push_back(value);
        drop(items);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove and return the head element without blocking.
    ///
    /// Returns `None` on an empty queue.
    pub fn pop(&self) -> Option<T> {
        let mut items = self.lock();
        let value = items.pop_front()?;
        drop(items);
        self.not_full.notify_one();
        Some(value)
    }

    /// Append `value`, waiting in the monitor while the queue is full.
    ///
    /// A zero-capacity queue never has room, so this waits forever on one.
    pub fn push_blocking(&self, value: T) {
        let mut items = self.lock();
        while items.len() == self.capacity {
            items = self.not_full.wait(items).unwrap_or_else(PoisonError::into_inner);
        }
        items.push_back(value);
        drop(items);
        self.not_empty.notify_one();
    }

    /// Remove the head element, waiting in the monitor while the queue is
    /// empty.
    pub fn pop_blocking(&self) -> T {
        let mut items = self.lock();
        loop {
            if let Some(value) = items.pop_front() {
                drop(items);
                self.not_full.notify_one();
                return value;
            }
            items = self.not_empty.wait(items).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Number of elements currently queued.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if no elements are queued.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// True if the queue is at capacity.
    pub fn is_full(&self) -> bool {
        self.lock().len() == self.capacity
    }

    /// Maximum number of elements the queue can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
