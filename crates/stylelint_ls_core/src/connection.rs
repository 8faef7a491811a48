//! Connection-side reporting channels.

use async_trait::async_trait;

/// The slice of an editor connection the lint layer reports through: the
/// trace channel, user-facing error notifications, and the remote console.
///
/// Every implementation must tolerate being called from concurrent lint
/// passes.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Writes a line to the connection's trace channel.
    async fn trace(&self, message: String);

    /// Shows an error notification to the user.
    async fn show_error_message(&self, message: String);

    /// Writes to the remote console's error channel.
    async fn console_error(&self, message: String);
}

/// Connection that drops every message, for running without an editor
/// attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullConnection;

#[async_trait]
impl Connection for NullConnection {
    async fn trace(&self, _message: String) {}

    async fn show_error_message(&self, _message: String) {}

    async fn console_error(&self, _message: String) {}
}
