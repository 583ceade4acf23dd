//! WebSocket connection handler.
//!
//! Each connection runs two tasks: a receive loop that hands every text frame
//! to the router, and a pusher loop that drains the session's outbound queue
//! into the socket. When the receive loop ends the pusher is aborted. When the
//! pusher ends the receive loop is told to stop and allowed to finish the frame
//! it is routing. Then the session is removed.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::SessionId, infrastructure::dto::websocket::parse_command, ui::state::AppState,
    usecase::MessageRouter,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Forward queued frames to the socket until the queue or the socket closes.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(frame.into())).await {
                tracing::debug!("Socket write failed: {}", e);
                break;
            }
        }
    })
}

/// Route inbound frames until the peer closes or `stop` fires.
///
/// `stop` is only observed between frames, so a frame being routed is always
/// delivered in full.
async fn receive_loop<S>(
    mut receiver: S,
    mut stop: oneshot::Receiver<()>,
    router: Arc<MessageRouter>,
    session_id: SessionId,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let msg = tokio::select! {
            _ = &mut stop => break,
            msg = receiver.next() => msg,
        };
        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error on session '{}': {}", session_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received from '{}': {}", session_id, text.as_str());
                router.route(session_id, parse_command(text.as_str())).await;
            }
            Message::Binary(data) => {
                tracing::debug!(
                    "Ignoring {} bytes of binary data from '{}'",
                    data.len(),
                    session_id
                );
            }
            Message::Close(_) => {
                tracing::debug!("Session '{}' requested close", session_id);
                break;
            }
            // Ping/pong is answered by the WebSocket layer
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let session_id = state.connect_session_usecase.execute(tx).await;

    let mut send_task = pusher_loop(rx, sender);

    // Closing this stops the receive loop between frames, never inside `route`
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        stop_rx,
        state.message_router.clone(),
        session_id,
    ));

    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => {
            drop(stop_tx);
            if let Err(e) = recv_task.await {
                tracing::warn!("Receive loop of session '{}' failed: {}", session_id, e);
            }
        }
    };

    state.disconnect_session_usecase.execute(session_id).await;
}
