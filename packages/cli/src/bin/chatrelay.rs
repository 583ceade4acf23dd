//! Command-line entry point for the chatrelay server and client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatrelay -- start
//! cargo run --bin chatrelay -- start --host 0.0.0.0 --port 9000
//! cargo run --bin chatrelay -- connect --host localhost --port 8765
//! ```

use clap::{Parser, Subcommand};

use chatrelay_server::Server;
use chatrelay_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "chatrelay")]
#[command(about = "Real-time message relay over WebSocket", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the relay server
    Start {
        /// Host address to bind the server to
        #[arg(short = 'H', long, default_value = "localhost")]
        host: String,

        /// Port number to bind the server to
        #[arg(short = 'p', long, default_value_t = 8765)]
        port: u16,
    },
    /// Connect to a relay server as an interactive client
    Connect {
        /// Host of the relay server
        #[arg(short = 'H', long, default_value = "localhost")]
        host: String,

        /// Port of the relay server
        #[arg(short = 'p', long, default_value_t = 8765)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    match args.command {
        Command::Start { host, port } => {
            setup_logger(env!("CARGO_BIN_NAME"), "debug");

            if let Err(e) = Server::in_memory().run(&host, port).await {
                tracing::error!("Server error: {}", e);
                std::process::exit(1);
            }
        }
        Command::Connect { host, port } => {
            setup_logger(env!("CARGO_BIN_NAME"), "info");

            if let Err(e) = chatrelay_client::run_client(&host, port).await {
                tracing::error!("Client error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
