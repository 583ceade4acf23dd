//! Client execution logic with reconnection support.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use super::{
    domain::{server_url, should_attempt_reconnect},
    error::ClientError,
    session::run_client_session,
    ui::Prompt,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Connect to a relay server and run the interactive session.
///
/// Lost connections are retried up to `MAX_RECONNECT_ATTEMPTS` times; the
/// last accepted username is claimed again after each reconnect.
pub async fn run_client(host: &str, port: u16) -> Result<(), ClientError> {
    let url = server_url(host, port);
    let prompt = Prompt::new();
    let mut input_rx = spawn_input_thread(prompt.clone());
    let mut username: Option<String> = None;
    let mut attempt = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            url,
            attempt + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &mut input_rx, &prompt, &mut username).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);

                if !should_attempt_reconnect(&e, attempt + 1, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!("Giving up after {} attempt(s)", attempt + 1);
                    return Err(e);
                }
                attempt += 1;

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    attempt + 1,
                    MAX_RECONNECT_ATTEMPTS
                );
                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}

/// Read lines on a blocking thread and forward them to the async side.
///
/// The channel closes on Ctrl+C, Ctrl+D or a readline failure.
fn spawn_input_thread(prompt: Prompt) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt.current()) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if input_tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
