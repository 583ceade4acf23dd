//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, GetRelayStatsUseCase, MessageRouter,
};

pub struct AppState {
    /// Admits a connection and sends `auth_request`
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// Removes a closed connection
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// Dispatches inbound frames
    pub message_router: Arc<MessageRouter>,
    /// Counters for `/api/stats`
    pub get_relay_stats_usecase: Arc<GetRelayStatsUseCase>,
}
