//! Broker engine
//!
//! This module contains the in-memory broker responsible for:
//! - keeping the registry of named queues and their subscription prefixes
//! - fanning a published message out to every queue whose prefix matches
//! - handing a queue's buffered messages to exactly one drain call
//!
//! Concurrency and usage notes:
//! - The registry sits behind a single `Mutex` owned by the broker. Each
//!   public operation takes the lock once, so attach, publish and drain are
//!   atomic with respect to each other and a drain can never interleave with
//!   an append to the same buffer.
//! - The broker is shared as an `Arc<Broker>`; transports never see the lock.
//! - No operation fails. Unknown queues drain empty, unmatched publishes are
//!   dropped.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::broker::message::Message;
use crate::broker::queue::{Queue, QueueId};
use crate::broker::topic::Topic;

#[derive(Debug, Default)]
pub struct Broker {
    queues: Mutex<HashMap<QueueId, Queue>>,
}

impl Broker {
    pub fn new() -> Self {
        Self {
            queues: Mutex::new(HashMap::new()),
        }
    }

    // A panic while holding the lock cannot leave a queue half-updated, so a
    // poisoned registry is still consistent.
    fn registry(&self) -> MutexGuard<'_, HashMap<QueueId, Queue>> {
        self.queues.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach queue `id` to the topic prefix `topic`.
    ///
    /// Re-attaching an existing id replaces its subscription and drops any
    /// messages it had not yet handed out.
    pub fn attach_queue(&self, id: impl Into<QueueId>, topic: &str) {
        let id = id.into();
        let subscription = Topic::parse(topic);
        let mut queues = self.registry();

        match queues.insert(id.clone(), Queue::new(subscription)) {
            Some(previous) if !previous.is_empty() => {
                warn!(
                    queue = %id,
                    topic,
                    dropped = previous.len(),
                    "Queue re-attached, undrained messages discarded"
                );
            }
            Some(_) => info!(queue = %id, topic, "Queue re-attached"),
            None => info!(queue = %id, topic, queues = queues.len(), "Queue attached"),
        }
    }

    /// Publish `data` under `topic` to every queue whose subscription is a
    /// prefix of it. Returns how many queues received the message.
    pub fn publish(&self, topic: &str, data: Value) -> usize {
        let published = Topic::parse(topic);
        let mut queues = self.registry();
        let mut delivered = 0;

        for queue in queues.values_mut().filter(|q| q.accepts(&published)) {
            queue.push(Message::new(topic, data.clone()));
            delivered += 1;
        }

        if delivered == 0 {
            debug!(topic, "No queue matched, message dropped");
        } else {
            debug!(topic, delivered, "Message fanned out");
        }
        delivered
    }

    /// Take every message buffered for `id`, oldest first.
    ///
    /// Returns an empty list for an unknown queue.
    pub fn drain_queue(&self, id: &str) -> Vec<Message> {
        let mut queues = self.registry();
        match queues.get_mut(id) {
            Some(queue) => {
                let messages = queue.drain();
                debug!(queue = id, count = messages.len(), "Queue drained");
                messages
            }
            None => {
                debug!(queue = id, "Drain of unknown queue");
                Vec::new()
            }
        }
    }

    pub fn queue_count(&self) -> usize {
        self.registry().len()
    }

    /// Number of messages waiting in queue `id`, or `None` if it was never
    /// attached.
    pub fn buffered(&self, id: &str) -> Option<usize> {
        self.registry().get(id).map(Queue::len)
    }
}
