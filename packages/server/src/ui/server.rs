//! Server wiring and execution.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use chatrelay_shared::time::{Clock, SystemClock};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    domain::{MessagePusher, SessionRepository},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
    },
    usecase::{
        AuthenticateUseCase, ConnectSessionUseCase, DisconnectSessionUseCase,
        GetRelayStatsUseCase, MessageRouter, SendMessageUseCase, SendPrivateMessageUseCase,
    },
};

use super::{
    handler::{get_stats, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket relay server
///
/// # Example
///
/// ```no_run
/// # async fn start() -> Result<(), Box<dyn std::error::Error>> {
/// let server = chatrelay_server::Server::in_memory();
/// server.run("localhost", 8765).await?;
/// # Ok(())
/// # }
/// ```
pub struct Server {
    connect_session_usecase: Arc<ConnectSessionUseCase>,
    disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    message_router: Arc<MessageRouter>,
    get_relay_stats_usecase: Arc<GetRelayStatsUseCase>,
}

impl Server {
    pub fn new(
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
        message_router: Arc<MessageRouter>,
        get_relay_stats_usecase: Arc<GetRelayStatsUseCase>,
    ) -> Self {
        Self {
            connect_session_usecase,
            disconnect_session_usecase,
            message_router,
            get_relay_stats_usecase,
        }
    }

    /// A server backed by the in-memory repository and the system clock.
    pub fn in_memory() -> Self {
        Self::in_memory_with_clock(Arc::new(SystemClock))
    }

    /// A server backed by the in-memory repository, stamping messages with `clock`.
    pub fn in_memory_with_clock(clock: Arc<dyn Clock>) -> Self {
        // 1. Repository
        let repository: Arc<dyn SessionRepository> = Arc::new(InMemorySessionRepository::new());

        // 2. MessagePusher
        let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::default());

        // 3. UseCases
        let connect_session_usecase = Arc::new(ConnectSessionUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        ));
        let disconnect_session_usecase = Arc::new(DisconnectSessionUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        let authenticate_usecase = Arc::new(AuthenticateUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        let send_message_usecase = Arc::new(SendMessageUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        ));
        let send_private_message_usecase = Arc::new(SendPrivateMessageUseCase::new(
            repository.clone(),
            message_pusher,
            clock,
        ));
        let get_relay_stats_usecase = Arc::new(GetRelayStatsUseCase::new(repository));

        // 4. Router
        let message_router = Arc::new(MessageRouter::new(
            authenticate_usecase,
            send_message_usecase,
            send_private_message_usecase,
        ));

        Self::new(
            connect_session_usecase,
            disconnect_session_usecase,
            message_router,
            get_relay_stats_usecase,
        )
    }

    /// The axum application: WebSocket upgrade on `/` and `/ws`, plus HTTP probes.
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_session_usecase: self.connect_session_usecase,
            disconnect_session_usecase: self.disconnect_session_usecase,
            message_router: self.message_router,
            get_relay_stats_usecase: self.get_relay_stats_usecase,
        });

        Router::new()
            // WebSocket endpoints
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/stats", get(get_stats))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to `host:port` and serve until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g. the port is in
    /// use) or if serving fails.
    pub async fn run(self, host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| format!("failed to bind {}: {}", bind_addr, e))?;

        tracing::info!("Relay server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
