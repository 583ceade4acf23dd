//! Message formatting utilities for client display.

use chatrelay_server::infrastructure::dto::websocket::HistoryEntry;
use chatrelay_shared::time::rfc3339_to_display;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Banner shown once the connection is open
    pub fn format_connected(url: &str) -> String {
        format!(
            "\nConnected to {}.\nType /help for commands. Press Ctrl+C or type /quit to exit.\n",
            url
        )
    }

    /// Ask the user to pick a name
    pub fn format_auth_request() -> String {
        "\nPlease choose a username.\n".to_string()
    }

    /// Greeting plus replayed history
    ///
    /// # Arguments
    ///
    /// * `greeting` - The `content` of `auth_success`
    /// * `history` - Recent broadcast messages, oldest first
    pub fn format_auth_success(greeting: &str, history: &[HistoryEntry]) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n{}\n", RULE, greeting));

        if history.is_empty() {
            output.push_str("(No recent messages)\n");
        } else {
            output.push_str("Recent messages:\n");
            for entry in history {
                output.push_str(&format!(
                    "[{}] {}: {}\n",
                    rfc3339_to_display(&entry.timestamp),
                    entry.sender,
                    entry.content
                ));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// A refused name claim
    pub fn format_auth_error(reason: &str) -> String {
        format!("\n! {}\nPlease choose another username.\n", reason)
    }

    /// A broadcast chat message
    pub fn format_broadcast(sender: &str, content: &str, timestamp: &str) -> String {
        format!(
            "\n[{}] {}: {}\n",
            rfc3339_to_display(timestamp),
            sender,
            content
        )
    }

    /// A private chat message, either received or echoed back to its sender
    ///
    /// # Arguments
    ///
    /// * `me` - The current user's name, used to tell echoes from incoming messages
    pub fn format_private(
        sender: &str,
        recipient: &str,
        content: &str,
        timestamp: &str,
        me: Option<&str>,
    ) -> String {
        let time = rfc3339_to_display(timestamp);
        if me == Some(sender) {
            format!("\n[{}] (to {}) {}\n", time, recipient, content)
        } else {
            format!("\n[{}] (from {}) {}\n", time, sender, content)
        }
    }

    /// List of local commands
    pub fn format_help() -> String {
        [
            "",
            "Commands:",
            "  /msg <name> <message>   send a private message (alias: /pm)",
            "  /help                   show this help",
            "  /quit                   leave the chat",
            "Anything else is sent to everyone.",
            "",
        ]
        .join("\n")
    }

    /// A command used incorrectly
    pub fn format_invalid_command(reason: &str) -> String {
        format!("\n{}\n", reason)
    }

    /// A command typed before a name was accepted
    pub fn format_name_required() -> String {
        "\nPlease enter a username first (commands are available after login).\n".to_string()
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
