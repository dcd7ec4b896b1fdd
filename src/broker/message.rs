use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message buffered for a queue.
///
/// `topic` is the raw topic string exactly as the publisher sent it, not the
/// normalized segment form, so consumers see what was published. `data` is
/// an opaque JSON document the broker never inspects.
///
/// # Example
///
/// ```rust
/// use thinbroker::broker::message::Message;
/// use serde_json::json;
///
/// let msg = Message::new("sensors/temp/room1", json!({ "v": 21 }));
/// assert_eq!(
///     serde_json::to_value(&msg).unwrap(),
///     json!({ "topic": "sensors/temp/room1", "data": { "v": 21 } })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub topic: String,
    pub data: Value,
}

impl Message {
    pub fn new(topic: impl Into<String>, data: Value) -> Self {
        Self {
            topic: topic.into(),
            data,
        }
    }
}
