//! One WebSocket session against the relay server.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, protocol::Message},
};

use chatrelay_server::infrastructure::dto::websocket::{ClientEnvelope, ServerEnvelope};

use crate::{
    domain::{ClientCommand, parse_input, username_from_input},
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::Prompt};

type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Where the session stands in the authentication handshake.
enum AuthState {
    /// Waiting for the user to type a name
    Anonymous,
    /// A claim for this name is in flight
    Pending(String),
    Authenticated(String),
}

/// Run one connection until the user quits or the connection drops.
///
/// `username` carries the last accepted name across reconnects: when set, it
/// is claimed automatically as soon as the server asks.
///
/// # Returns
///
/// * `Ok(())` - The user quit (`/quit`, Ctrl+C, Ctrl+D)
/// * `Err(ClientError)` - The connection failed or was lost
pub async fn run_client_session(
    url: &str,
    input: &mut mpsc::UnboundedReceiver<String>,
    prompt: &Prompt,
    username: &mut Option<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        tungstenite::Error::Url(e) => ClientError::InvalidAddress(e.to_string()),
        e => ClientError::ConnectionError(e.to_string()),
    })?;

    tracing::info!("Connected to relay server at {}", url);
    println!("{}", MessageFormatter::format_connected(url));

    let (mut write, mut read) = ws_stream.split();
    let mut state = AuthState::Anonymous;

    loop {
        tokio::select! {
            frame = read.next() => {
                let text = match frame {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Binary(data))) => {
                        prompt.print(&MessageFormatter::format_binary_message(data.len()));
                        continue;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Server closed the connection");
                        return Err(ClientError::ConnectionLost);
                    }
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        return Err(ClientError::ConnectionLost);
                    }
                    Some(Ok(_)) => continue,
                };

                let Ok(envelope) = serde_json::from_str::<ServerEnvelope>(text.as_str()) else {
                    prompt.print(&MessageFormatter::format_raw_message(text.as_str()));
                    continue;
                };

                match envelope {
                    ServerEnvelope::AuthRequest => match username.clone() {
                        Some(name) => {
                            tracing::info!("Re-authenticating as '{}'", name);
                            send(&mut write, &ClientEnvelope::Auth { username: name.clone() }).await?;
                            state = AuthState::Pending(name);
                        }
                        None => prompt.print(&MessageFormatter::format_auth_request()),
                    },
                    ServerEnvelope::AuthSuccess { content, history } => {
                        if let AuthState::Pending(name) = &state {
                            prompt.set_name(name);
                            *username = Some(name.clone());
                            state = AuthState::Authenticated(name.clone());
                        }
                        prompt.print(&MessageFormatter::format_auth_success(&content, &history));
                    }
                    ServerEnvelope::AuthError { content } => {
                        *username = None;
                        prompt.reset();
                        state = AuthState::Anonymous;
                        prompt.print(&MessageFormatter::format_auth_error(&content));
                    }
                    ServerEnvelope::Broadcast { sender, content, timestamp } => {
                        prompt.print(&MessageFormatter::format_broadcast(&sender, &content, &timestamp));
                    }
                    ServerEnvelope::Private { sender, recipient, content, timestamp } => {
                        let me = match &state {
                            AuthState::Authenticated(name) => Some(name.as_str()),
                            _ => None,
                        };
                        prompt.print(&MessageFormatter::format_private(
                            &sender, &recipient, &content, &timestamp, me,
                        ));
                    }
                }
            }
            line = input.recv() => {
                // Input closed: Ctrl+C or Ctrl+D in the readline thread
                let Some(line) = line else {
                    close(&mut write).await;
                    return Ok(());
                };

                match parse_input(&line) {
                    ClientCommand::Quit => {
                        close(&mut write).await;
                        return Ok(());
                    }
                    ClientCommand::Help => prompt.print(&MessageFormatter::format_help()),
                    ClientCommand::Empty => prompt.redisplay(),
                    _ if matches!(state, AuthState::Pending(_)) => {
                        prompt.print("\nStill waiting for the server to accept your name...\n");
                    }
                    command if matches!(state, AuthState::Anonymous) => {
                        match username_from_input(&command) {
                            Some(name) => {
                                let name = name.to_string();
                                send(&mut write, &ClientEnvelope::Auth { username: name.clone() })
                                    .await?;
                                state = AuthState::Pending(name);
                            }
                            None => prompt.print(&MessageFormatter::format_name_required()),
                        }
                    }
                    ClientCommand::Broadcast(content) => {
                        send(&mut write, &ClientEnvelope::Broadcast { content }).await?;
                        prompt.redisplay();
                    }
                    ClientCommand::Private { recipient, content } => {
                        send(&mut write, &ClientEnvelope::Private { recipient, content }).await?;
                    }
                    ClientCommand::Invalid(reason) => {
                        prompt.print(&MessageFormatter::format_invalid_command(&reason));
                    }
                }
            }
        }
    }
}

async fn send(write: &mut WsWriter, envelope: &ClientEnvelope) -> Result<(), ClientError> {
    let json = serde_json::to_string(envelope)
        .map_err(|e| ClientError::ConnectionError(format!("failed to encode message: {}", e)))?;

    write.send(Message::Text(json.into())).await.map_err(|e| {
        tracing::warn!("Failed to send message: {}", e);
        ClientError::ConnectionLost
    })
}

async fn close(write: &mut WsWriter) {
    write.send(Message::Close(None)).await.ok();
}
