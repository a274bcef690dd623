//! Daemon app runner

use std::process::ExitCode;
use std::sync::Arc;

use tokio::time::MissedTickBehavior;

use crate::application::TickOutcome;

use super::app::{build_engine, Engine, EXIT_ERROR, EXIT_SUCCESS};
use super::args::EngineOptions;
use super::ipc::{create_ipc_server, IpcHandler, IpcServer};
use super::pid_file::PidFile;
use super::presenter::Presenter;
use super::signals::DaemonSignalHandler;

/// Run daemon mode
pub async fn run_daemon(options: EngineOptions) -> ExitCode {
    let presenter = Presenter::new();

    // Acquire PID file
    let mut pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    let mut signals = match DaemonSignalHandler::new() {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (engine, backend) = build_engine(&options);
    let engine = Arc::new(engine);
    let loaded = engine.initialize().await;

    // Setup IPC server
    let mut server = create_ipc_server();
    if let Err(e) = server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }
    let server: Arc<dyn IpcServer> = Arc::from(server);

    let handler: Arc<dyn IpcHandler> = Arc::clone(&engine) as Arc<dyn IpcHandler>;
    let serving = Arc::clone(&server);
    let server_task = tokio::spawn(async move {
        if let Err(e) = serving.run(handler).await {
            tracing::error!(error = %e, "IPC server stopped");
        }
    });

    presenter.daemon_status(&format!(
        "Watching clipboard ({} of {} entries loaded)",
        loaded, options.capacity
    ));
    presenter.info(&format!(
        "PID: {} | Socket: {} | Backend: {} | Every {} | History: {}",
        std::process::id(),
        server.path(),
        backend,
        options.interval,
        options.history_file.display()
    ));

    let result = daemon_loop(&engine, &mut signals, &presenter, &options).await;

    server_task.abort();
    server.cleanup();
    let _ = pid_file.release();

    if result {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Tick on every interval until a shutdown signal arrives
async fn daemon_loop(
    engine: &Engine,
    signals: &mut DaemonSignalHandler,
    presenter: &Presenter,
    options: &EngineOptions,
) -> bool {
    let mut ticker = tokio::time::interval(options.interval.as_std());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Clipboard failures repeat every tick; report only the first of a run
    let mut failing = false;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match engine.tick().await {
                    Ok(outcome) => {
                        if failing {
                            tracing::info!("clipboard readable again");
                            failing = false;
                        }
                        if let TickOutcome::Recorded { entry, .. } = outcome {
                            tracing::debug!(label = %entry.label(), "new history entry");
                        }
                    }
                    Err(e) if !failing => {
                        tracing::warn!(error = %e, "clipboard poll failed");
                        failing = true;
                    }
                    Err(e) => tracing::debug!(error = %e, "clipboard poll failed"),
                }
            }
            signal = signals.recv() => {
                return match signal {
                    Some(signal) => {
                        presenter.daemon_status(&format!("Received {}, shutting down...", signal));
                        true
                    }
                    // Channel closed
                    None => false,
                };
            }
        }
    }
}
