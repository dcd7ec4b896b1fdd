//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `thinbroker` application.
//!
//! It centralizes the error types shared by the transports and the load
//! tester, and the logging setup used by the binary.

pub mod error;
pub mod logging;
