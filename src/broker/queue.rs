//! Queue state
//!
//! A `Queue` pairs a subscription prefix with the messages buffered for it.
//! It carries no locking of its own: the broker owns every queue behind a
//! single lock and only touches them while holding it.

use crate::broker::message::Message;
use crate::broker::topic::Topic;

pub type QueueId = String;

#[derive(Debug, Default)]
pub struct Queue {
    subscription: Topic,
    buffer: Vec<Message>,
}

impl Queue {
    /// Create an empty queue subscribed to `subscription`.
    pub fn new(subscription: Topic) -> Self {
        Self {
            subscription,
            buffer: Vec::new(),
        }
    }

    /// Returns true if a message published to `topic` belongs in this queue.
    pub fn accepts(&self, topic: &Topic) -> bool {
        self.subscription.is_prefix_of(topic)
    }

    pub fn push(&mut self, msg: Message) {
        self.buffer.push(msg);
    }

    /// Take every buffered message in arrival order, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.buffer)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
