//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer. Following
//! hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**
//!   - `exchange/`: Bybit V5 REST adapter
//!
//! - **Driver Adapters (Inbound)**
//!   - `websocket/`: signal server fed by the chat gateway
//!
//! - **Configuration**
//!   - `config/`: environment-driven settings

pub mod config;
pub mod exchange;
pub mod websocket;
