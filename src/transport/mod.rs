//! The `transport` module is responsible for exposing the broker to the
//! network.
//!
//! Two front ends share one `Arc<Broker>`:
//! - `http`: the JSON-over-HTTP API (`/attachQueue`, `/publish`, `/get`)
//! - `websocket`: the same three operations as tagged JSON frames
//!
//! Both validate request shape only. Everything that reaches the broker is
//! accepted by it.

pub mod http;
pub mod message;
pub mod websocket;

pub use http::start_http_server;
pub use websocket::start_websocket_server;

#[cfg(test)]
mod websocket_tests;
