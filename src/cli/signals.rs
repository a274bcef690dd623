//! Shutdown signal handling for daemon mode

use std::fmt;

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

/// OS signals that stop the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT (Ctrl+C)
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Daemon signal handler
///
/// Listens for SIGINT/SIGTERM in background tasks and forwards them
/// over a channel, so the daemon loop can `select!` on them next to its
/// poll timer.
pub struct DaemonSignalHandler {
    receiver: mpsc::Receiver<ShutdownSignal>,
}

impl DaemonSignalHandler {
    /// Create a new daemon signal handler and start listening
    pub fn new() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(4);

        for (kind, which) in [
            (SignalKind::interrupt(), ShutdownSignal::Interrupt),
            (SignalKind::terminate(), ShutdownSignal::Terminate),
        ] {
            let mut stream = signal(kind)?;
            let tx = tx.clone();
            tokio::spawn(async move {
                while stream.recv().await.is_some() {
                    if tx.send(which).await.is_err() {
                        break;
                    }
                }
            });
        }

        Ok(Self { receiver: rx })
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<ShutdownSignal> {
        self.receiver.recv().await
    }
}
