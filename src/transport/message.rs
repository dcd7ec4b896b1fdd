//! Wire types shared by the HTTP and WebSocket front ends.
//!
//! Field names follow the public JSON contract (`queueId`, `topic`, `data`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::broker::message::Message;

/// Body of `POST /attachQueue`.
#[derive(Debug, Deserialize, Serialize)]
pub struct AttachRequest {
    #[serde(rename = "queueId")]
    pub queue_id: String,
    pub topic: String,
}

/// Body of `POST /publish`. A missing `data` field publishes `null`.
#[derive(Debug, Deserialize, Serialize)]
pub struct PublishRequest {
    pub topic: String,
    #[serde(default)]
    pub data: Value,
}

/// Query string of `GET /get`.
#[derive(Debug, Deserialize)]
pub struct GetQuery {
    #[serde(rename = "queueId")]
    pub queue_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Commands accepted on a WebSocket connection, one JSON object per text
/// frame.
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    AttachQueue {
        #[serde(rename = "queueId")]
        queue_id: String,
        topic: String,
    },
    Publish {
        topic: String,
        #[serde(default)]
        data: Value,
    },
    Get {
        #[serde(rename = "queueId")]
        queue_id: String,
    },
}

/// Replies sent back on a WebSocket connection.
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Ok {},
    Messages { messages: Vec<Message> },
    Error { message: String },
}

pub const MISSING_QUEUE_ID: &str = "Missing queueId";
