//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: envelopes exchanged over the WebSocket connection
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
