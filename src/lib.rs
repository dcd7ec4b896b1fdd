//! # thinbroker
//!
//! `thinbroker` is a minimal, in-memory publish/subscribe broker.
//! Publishers send messages tagged with a hierarchical topic such as
//! `sensors/temp/room1`; consumers attach named queues bound to a topic
//! prefix and later drain whatever was buffered for them.
//!
//! ## Core Modules
//!
//! - `broker`: topic parsing and prefix matching, the queue registry, and the
//!   attach / publish / drain operations.
//! - `transport`: HTTP and WebSocket front ends over a shared broker.
//! - `client`: a connected WebSocket client.
//! - `config`: loading server configuration from file and environment.
//! - `bench`: a load generator for a running broker.
//! - `utils`: error types and logging setup.
//!
//! Delivery is best effort and at most once. Nothing survives a restart.

pub mod bench;
pub mod broker;
pub mod client;
pub mod config;
pub mod transport;
pub mod utils;
