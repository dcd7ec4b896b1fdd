//! The `client` module defines the representation of a WebSocket client
//! connected to the broker.
//!
//! It provides the `Client` struct, which encapsulates the state of a single
//! connection: its unique identifier and the channel feeding the
//! connection's send loop.

pub mod pubsub_client;
pub use pubsub_client::Client;
