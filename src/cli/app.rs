//! Shared wiring for every command: config layering and engine construction

use std::env;

use crate::application::ports::{ConfigStore, SystemClipboard};
use crate::application::ClipboardHistoryUseCase;
use crate::domain::config::AppConfig;
use crate::infrastructure::clipboard::{create_clipboard, ClipboardBackend};
use crate::infrastructure::{default_history_path, BookmarkLocator, JsonHistoryFile};

use super::args::EngineOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Overrides the history file location
pub const HISTORY_FILE_ENV: &str = "CLIPKEEP_HISTORY_FILE";

/// Overrides the log filter
pub const LOG_ENV: &str = "CLIPKEEP_LOG";

/// Log filter for one-shot commands when none is configured
pub const COMMAND_LOG_LEVEL: &str = "warn";

/// Engine wired to the real clipboard, bookmark locator and JSON history file
pub type Engine = ClipboardHistoryUseCase<
    Box<dyn SystemClipboard>,
    BookmarkLocator,
    JsonHistoryFile<BookmarkLocator>,
>;

/// Config layer read from the environment
pub fn env_config() -> AppConfig {
    let non_empty = |key: &str| env::var(key).ok().filter(|s| !s.trim().is_empty());
    AppConfig {
        history_file: non_empty(HISTORY_FILE_ENV),
        log_level: non_empty(LOG_ENV),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI.
///
/// An unreadable config file is reported and skipped.
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
    presenter: &Presenter,
) -> AppConfig {
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.warn(&format!(
                "Ignoring config file {}: {}",
                store.path().display(),
                e
            ));
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

/// Resolve engine settings, falling back to defaults for invalid values
pub fn resolve_options(config: &AppConfig) -> EngineOptions {
    let backend = config
        .backend_or_default()
        .parse::<ClipboardBackend>()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using automatic clipboard backend");
            ClipboardBackend::Auto
        });

    EngineOptions {
        capacity: config.capacity_or_default(),
        interval: config.poll_interval_or_default(),
        backend,
        history_file: config
            .history_file_path()
            .unwrap_or_else(default_history_path),
    }
}

/// Build the engine described by `options`.
///
/// Returns the engine and the clipboard backend actually selected.
pub fn build_engine(options: &EngineOptions) -> (Engine, ClipboardBackend) {
    let (clipboard, backend) = create_clipboard(options.backend);
    let locator = BookmarkLocator::new();
    let repository = JsonHistoryFile::with_path(&options.history_file, locator);

    let engine = ClipboardHistoryUseCase::new(clipboard, locator, repository, options.capacity);
    (engine, backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::polling::PollInterval;
    use crate::infrastructure::XdgConfigStore;

    #[tokio::test]
    async fn cli_layer_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        store
            .save(&AppConfig {
                capacity: Some(5),
                poll_interval: Some("2s".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let cli = AppConfig {
            capacity: Some(9),
            ..Default::default()
        };
        let config = load_merged_config(&store, cli, &Presenter::new()).await;

        assert_eq!(config.capacity, Some(9));
        assert_eq!(config.poll_interval, Some("2s".to_string()));
        assert_eq!(config.backend, Some("auto".to_string()));
    }

    #[tokio::test]
    async fn unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "capacity = [").unwrap();
        let store = XdgConfigStore::with_path(path);

        let config = load_merged_config(&store, AppConfig::empty(), &Presenter::new()).await;
        assert_eq!(config.capacity, Some(20));
    }

    #[test]
    fn resolve_options_falls_back_on_invalid_values() {
        let config = AppConfig {
            capacity: Some(0),
            poll_interval: Some("never".to_string()),
            backend: Some("x11".to_string()),
            history_file: Some("/tmp/clipkeep-test.json".to_string()),
            log_level: None,
        };
        let options = resolve_options(&config);

        assert_eq!(options.capacity, 20);
        assert_eq!(options.interval, PollInterval::default());
        assert_eq!(options.backend, ClipboardBackend::Auto);
        assert_eq!(
            options.history_file,
            std::path::PathBuf::from("/tmp/clipkeep-test.json")
        );
    }

    #[test]
    fn resolve_options_uses_default_history_path() {
        let options = resolve_options(&AppConfig::defaults());
        assert_eq!(options.history_file, default_history_path());
    }

    #[test]
    fn build_engine_honors_explicit_backend() {
        let dir = tempfile::tempdir().unwrap();
        let options = EngineOptions {
            capacity: 3,
            interval: PollInterval::default(),
            backend: ClipboardBackend::Arboard,
            history_file: dir.path().join("history.json"),
        };
        let (_engine, backend) = build_engine(&options);
        assert_eq!(backend, ClipboardBackend::Arboard);
    }
}
