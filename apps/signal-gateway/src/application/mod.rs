//! Application Layer - Use cases and port definitions.
//!
//! This layer contains the gateway service and the port interfaces it
//! drives: the chat API and the signal sink.

/// Port interfaces for the chat API and signal delivery.
pub mod ports;

/// The gateway relay loop.
pub mod services;
