//! UseCase layer: one use case per relay operation, plus the router that
//! dispatches inbound commands to them.

mod authenticate;
mod connect_session;
mod disconnect_session;
mod error;
mod get_relay_stats;
mod route_message;
mod send_message;
mod send_private_message;

pub use authenticate::AuthenticateUseCase;
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{AuthenticateError, SendMessageError};
pub use get_relay_stats::GetRelayStatsUseCase;
pub use route_message::{MessageRouter, RouteOutcome};
pub use send_message::SendMessageUseCase;
pub use send_private_message::SendPrivateMessageUseCase;
