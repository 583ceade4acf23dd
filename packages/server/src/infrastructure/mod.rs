//! Infrastructure layer: wire format, in-memory storage and WebSocket delivery.

pub mod dto;
pub mod message_pusher;
pub mod repository;
