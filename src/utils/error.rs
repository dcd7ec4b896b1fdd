//! The `error` module defines the error types used at the edges of the
//! `thinbroker` application.
//!
//! The broker itself never fails. Errors only come from the network and
//! serialization layers around it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("client {0} disconnected")]
    Disconnected(String),
}

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("load generator task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
