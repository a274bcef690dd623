//! IPC (Inter-Process Communication) module for daemon control
//!
//! One request line in, one response line out, over a Unix domain socket.
//! Every history mutation requested by a CLI client runs inside the daemon's
//! engine, so the daemon stays the single writer of the history file.

mod unix_socket;

pub use unix_socket::{SocketPath, UnixSocketClient, UnixSocketServer};

use std::fmt;
use std::io;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLocator, HistoryRepository, SystemClipboard};
use crate::application::ClipboardHistoryUseCase;

/// Reply sent for successful mutations
pub const RESPONSE_OK: &str = "ok";

/// Prefix of every failure reply
pub const ERROR_PREFIX: &str = "error:";

/// Requests understood by the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpcRequest {
    List,
    Restore(usize),
    Clear,
    Status,
}

impl IpcRequest {
    /// Parse one request line
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let request = match (parts.next(), parts.next()) {
            (Some("list"), None) => IpcRequest::List,
            (Some("clear"), None) => IpcRequest::Clear,
            (Some("status"), None) => IpcRequest::Status,
            (Some("restore"), Some(index)) => match index.parse() {
                Ok(index) => IpcRequest::Restore(index),
                Err(_) => return Err(format!("invalid index '{}'", index)),
            },
            _ => return Err("unknown command".to_string()),
        };

        if parts.next().is_some() {
            return Err("unknown command".to_string());
        }
        Ok(request)
    }
}

impl fmt::Display for IpcRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpcRequest::List => write!(f, "list"),
            IpcRequest::Restore(index) => write!(f, "restore {}", index),
            IpcRequest::Clear => write!(f, "clear"),
            IpcRequest::Status => write!(f, "status"),
        }
    }
}

/// Format a failure reply
pub fn error_response(message: impl fmt::Display) -> String {
    format!("{} {}", ERROR_PREFIX, message)
}

/// Split a reply into its payload or the daemon's error message
pub fn into_result(response: &str) -> Result<&str, String> {
    let response = response.trim();
    match response.strip_prefix(ERROR_PREFIX) {
        Some(message) => Err(message.trim().to_string()),
        None => Ok(response),
    }
}

/// Answers IPC requests
#[async_trait]
pub trait IpcHandler: Send + Sync {
    /// Produce the single-line response for `request`
    async fn handle(&self, request: IpcRequest) -> String;
}

#[async_trait]
impl<C, L, R> IpcHandler for ClipboardHistoryUseCase<C, L, R>
where
    C: SystemClipboard,
    L: FileLocator,
    R: HistoryRepository,
{
    async fn handle(&self, request: IpcRequest) -> String {
        match request {
            IpcRequest::List => serde_json::to_string(&self.history().await)
                .unwrap_or_else(|e| error_response(e)),
            IpcRequest::Restore(index) => match self.restore(index).await {
                Ok(_) => RESPONSE_OK.to_string(),
                Err(e) => error_response(e),
            },
            IpcRequest::Clear => {
                self.clear().await;
                RESPONSE_OK.to_string()
            }
            IpcRequest::Status => {
                let status = self.status().await;
                format!("running entries={} capacity={}", status.len, status.capacity)
            }
        }
    }
}

/// Trait for IPC servers that serve daemon requests
#[async_trait]
pub trait IpcServer: Send + Sync {
    /// Bind to the IPC endpoint
    fn bind(&mut self) -> io::Result<()>;

    /// Get the path/name of the IPC endpoint
    fn path(&self) -> String;

    /// Accept connections and answer each request with `handler`
    async fn run(&self, handler: Arc<dyn IpcHandler>) -> io::Result<()>;

    /// Cleanup IPC resources
    fn cleanup(&self);
}

/// Trait for IPC clients that send requests to the daemon
#[async_trait]
pub trait IpcClient: Send + Sync {
    /// Check if daemon appears to be running (endpoint exists)
    fn is_daemon_running(&self) -> bool;

    /// Send a request and receive the response line
    async fn send(&self, request: IpcRequest) -> io::Result<String>;
}

/// Create the IPC server for the current session
pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(UnixSocketServer::new(SocketPath::new()))
}

/// Create the IPC client for the current session
pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(UnixSocketClient::new(SocketPath::new()))
}
