//! Client representation
//!
//! `Client` models one WebSocket connection and holds the sending side of a
//! per-connection channel. The transport's send loop owns the receiving side
//! and writes every queued frame to the socket, so replies never block the
//! read loop.

use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use crate::transport::message::ServerMessage;
use crate::utils::error::TransportError;

#[derive(Debug)]
pub struct Client {
    pub id: String,
    pub sender: UnboundedSender<WsMessage>,
}

impl Client {
    /// Create a new client with a sender channel. The `id` is a UUID used
    /// to tell connections apart in logs.
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: format!("client-{}", Uuid::new_v4()),
            sender,
        }
    }

    /// Serialize `msg` and queue it for the send loop.
    pub fn send(&self, msg: &ServerMessage) -> Result<(), TransportError> {
        let text = serde_json::to_string(msg)?;
        self.sender
            .send(WsMessage::text(text))
            .map_err(|_| TransportError::Disconnected(self.id.clone()))
    }
}
