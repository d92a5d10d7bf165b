//! Domain Layer - Routing and chat input types.
//!
//! Pure types with no I/O: which executor a chat talks to, and how a chat
//! message is classified.

/// Chat messages and command parsing.
pub mod chat;

/// Routes, route targets and the per-chat route table.
pub mod routing;
