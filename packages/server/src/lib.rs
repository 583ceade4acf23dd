//! Real-time message relay server.
//!
//! Accepts WebSocket connections, binds each one to a unique display name and
//! relays text messages either to every other session (broadcast) or to one
//! named recipient (private message).

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub use ui::Server;
