//! History command handler
//!
//! Requests go to the running daemon when there is one, so that its engine
//! stays the only writer. Without a daemon they run on a local engine over
//! the same history file.

use crate::application::HistoryItem;

use super::app::{build_engine, Engine};
use super::args::{EngineOptions, HistoryAction};
use super::ipc::{create_ipc_client, into_result, IpcRequest};
use super::presenter::Presenter;

/// Handle history subcommand
pub async fn handle_history_command(
    action: HistoryAction,
    options: &EngineOptions,
    presenter: &Presenter,
) -> Result<(), String> {
    if let Some(result) = try_daemon(&action, presenter).await {
        return result;
    }

    let (engine, _) = build_engine(options);
    engine.load().await;
    run_local(&engine, action, presenter).await
}

fn to_request(action: &HistoryAction) -> IpcRequest {
    match action {
        HistoryAction::List { .. } => IpcRequest::List,
        HistoryAction::Restore { index } => IpcRequest::Restore(*index),
        HistoryAction::Clear => IpcRequest::Clear,
        HistoryAction::Status => IpcRequest::Status,
    }
}

/// Forward to the daemon. `None` when no daemon answers.
async fn try_daemon(action: &HistoryAction, presenter: &Presenter) -> Option<Result<(), String>> {
    let client = create_ipc_client();
    if !client.is_daemon_running() {
        return None;
    }

    let response = match client.send(to_request(action)).await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(error = %e, "daemon socket not answering, using local history");
            return None;
        }
    };

    Some(render_daemon_response(action, &response, presenter))
}

fn render_daemon_response(
    action: &HistoryAction,
    response: &str,
    presenter: &Presenter,
) -> Result<(), String> {
    let payload = into_result(response)?;

    match action {
        HistoryAction::List { json } => {
            let items: Vec<HistoryItem> = serde_json::from_str(payload)
                .map_err(|e| format!("Unexpected daemon response: {}", e))?;
            show(&items, *json, presenter)
        }
        HistoryAction::Restore { index } => {
            presenter.success(&format!("Restored entry {}", index));
            Ok(())
        }
        HistoryAction::Clear => {
            presenter.success("History cleared");
            Ok(())
        }
        HistoryAction::Status => {
            presenter.output(payload);
            Ok(())
        }
    }
}

async fn run_local(engine: &Engine, action: HistoryAction, presenter: &Presenter) -> Result<(), String> {
    match action {
        HistoryAction::List { json } => show(&engine.history().await, json, presenter),
        HistoryAction::Restore { index } => {
            engine.restore(index).await.map_err(|e| e.to_string())?;
            presenter.success(&format!("Restored entry {}", index));
            Ok(())
        }
        HistoryAction::Clear => {
            engine.clear().await;
            presenter.success("History cleared");
            Ok(())
        }
        HistoryAction::Status => {
            let status = engine.status().await;
            presenter.output(&format!(
                "stopped entries={} capacity={}",
                status.len, status.capacity
            ));
            Ok(())
        }
    }
}

fn show(items: &[HistoryItem], json: bool, presenter: &Presenter) -> Result<(), String> {
    if json {
        presenter.history_json(items)
    } else {
        presenter.history(items);
        Ok(())
    }
}
