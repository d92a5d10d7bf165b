//! Websocket Infrastructure
//!
//! Inbound websocket endpoint for raw signal text from the chat gateway.
//!
//! - [`SignalServer`]: accepts gateway connections and queues their frames
//!   for a single execution worker

mod server;

pub use server::{ServerError, SignalServer};
