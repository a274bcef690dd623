//! Unix Domain Socket transport for daemon control

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

use super::{error_response, IpcClient, IpcHandler, IpcRequest, IpcServer};
use crate::cli::paths::runtime_path;

/// Socket file name inside the runtime directory
const SOCKET_FILE_NAME: &str = "clipkeep.sock";

/// Socket path resolver
#[derive(Debug, Clone)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Create socket path, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        Self::with_path(runtime_path(SOCKET_FILE_NAME))
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove socket file if it exists
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Unix Domain Socket server for daemon requests
pub struct UnixSocketServer {
    socket_path: SocketPath,
    listener: Option<UnixListener>,
}

impl UnixSocketServer {
    /// Create a new socket server
    pub fn new(socket_path: SocketPath) -> Self {
        Self {
            socket_path,
            listener: None,
        }
    }
}

impl Drop for UnixSocketServer {
    fn drop(&mut self) {
        if self.listener.is_some() {
            self.cleanup();
        }
    }
}

#[async_trait]
impl IpcServer for UnixSocketServer {
    fn bind(&mut self) -> io::Result<()> {
        // Remove stale socket file if it exists
        self.socket_path.cleanup()?;

        let listener = UnixListener::bind(self.socket_path.path())?;
        self.listener = Some(listener);
        Ok(())
    }

    fn path(&self) -> String {
        self.socket_path.path().to_string_lossy().to_string()
    }

    async fn run(&self, handler: Arc<dyn IpcHandler>) -> io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Socket not bound"))?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let handler = Arc::clone(&handler);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, handler).await {
                            tracing::debug!(error = %e, "socket connection error");
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "socket accept error");
                }
            }
        }
    }

    fn cleanup(&self) {
        let _ = self.socket_path.cleanup();
    }
}

/// Handle a single client connection
async fn handle_connection(stream: UnixStream, handler: Arc<dyn IpcHandler>) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    reader.read_line(&mut line).await?;

    let response = match IpcRequest::parse(&line) {
        Ok(request) => {
            tracing::debug!(%request, "ipc request");
            handler.handle(request).await
        }
        Err(message) => error_response(message),
    };

    writer.write_all(response.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;

    Ok(())
}

/// Unix Domain Socket client for sending requests to the daemon
pub struct UnixSocketClient {
    socket_path: SocketPath,
}

impl UnixSocketClient {
    /// Create a new socket client
    pub fn new(socket_path: SocketPath) -> Self {
        Self { socket_path }
    }
}

#[async_trait]
impl IpcClient for UnixSocketClient {
    fn is_daemon_running(&self) -> bool {
        self.socket_path.exists()
    }

    async fn send(&self, request: IpcRequest) -> io::Result<String> {
        let stream = UnixStream::connect(self.socket_path.path()).await?;
        let (reader, mut writer) = stream.into_split();

        writer.write_all(format!("{}\n", request).as_bytes()).await?;
        writer.flush().await?;

        let mut reader = BufReader::new(reader);
        let mut response = String::new();
        reader.read_line(&mut response).await?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoHandler;

    #[async_trait]
    impl IpcHandler for EchoHandler {
        async fn handle(&self, request: IpcRequest) -> String {
            format!("got {}", request)
        }
    }

    #[test]
    fn socket_path_is_in_runtime_dir() {
        let socket_path = SocketPath::new();
        assert_eq!(socket_path.path(), runtime_path(SOCKET_FILE_NAME));
    }

    #[tokio::test]
    async fn client_and_server_exchange_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = SocketPath::with_path(dir.path().join("test.sock"));

        let mut server = UnixSocketServer::new(path.clone());
        server.bind().unwrap();
        let server = Arc::new(server);
        let running = Arc::clone(&server);
        let task = tokio::spawn(async move { running.run(Arc::new(EchoHandler)).await });

        let client = UnixSocketClient::new(path.clone());
        assert!(client.is_daemon_running());
        let response = client.send(IpcRequest::Restore(3)).await.unwrap();
        assert_eq!(response, "got restore 3\n");

        task.abort();
    }

    #[tokio::test]
    async fn unknown_request_gets_error_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = SocketPath::with_path(dir.path().join("test.sock"));

        let mut server = UnixSocketServer::new(path.clone());
        server.bind().unwrap();
        let server = Arc::new(server);
        let running = Arc::clone(&server);
        let task = tokio::spawn(async move { running.run(Arc::new(EchoHandler)).await });

        let stream = UnixStream::connect(path.path()).await.unwrap();
        let (reader, mut writer) = stream.into_split();
        writer.write_all(b"toggle\n").await.unwrap();
        let mut response = String::new();
        BufReader::new(reader).read_line(&mut response).await.unwrap();
        assert_eq!(response, "error: unknown command\n");

        task.abort();
    }

    #[test]
    fn missing_socket_means_no_daemon() {
        let dir = tempfile::tempdir().unwrap();
        let client = UnixSocketClient::new(SocketPath::with_path(dir.path().join("none.sock")));
        assert!(!client.is_daemon_running());
    }
}
