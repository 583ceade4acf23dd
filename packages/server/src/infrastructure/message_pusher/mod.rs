//! `MessagePusher` implementations.
//!
//! - `websocket`: pushes encoded envelopes into each connection's outbound queue

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
