//! Interactive terminal client for the chatrelay server.
//!
//! Prompts for a username, then relays typed lines as broadcast or private
//! messages and renders whatever the server pushes back.

mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use error::ClientError;
pub use runner::run_client;
