//! Utilities shared by the chatrelay server, client and command-line entry point.

pub mod logger;
pub mod time;
