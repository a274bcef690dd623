//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::polling::PollInterval;
use crate::infrastructure::clipboard::ClipboardBackend;

use super::args::{is_valid_config_key, parse_capacity, ConfigAction, VALID_CONFIG_KEYS};
use super::logging::is_valid_filter;
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match value_of(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = value_of(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Current value of `key` as shown to the user
fn value_of(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "capacity" => config.capacity.map(|c| c.to_string()),
        "poll_interval" => config.poll_interval.clone(),
        "backend" => config.backend.clone(),
        "history_file" => config.history_file.clone(),
        "log_level" => config.log_level.clone(),
        _ => None,
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "capacity" => config.capacity = Some(parse_capacity(value).map_err(invalid)?),
        "poll_interval" => {
            let interval = value
                .parse::<PollInterval>()
                .map_err(|e| invalid(e.to_string()))?;
            config.poll_interval = Some(interval.to_string());
        }
        "backend" => {
            let backend = value
                .parse::<ClipboardBackend>()
                .map_err(|e| invalid(e.to_string()))?;
            config.backend = Some(backend.to_string());
        }
        "history_file" => {
            if value.trim().is_empty() {
                return Err(invalid("Path must not be empty".to_string()));
            }
            config.history_file = Some(value.to_string());
        }
        "log_level" => {
            if !is_valid_filter(value) {
                return Err(invalid(format!("Invalid log filter '{}'", value)));
            }
            config.log_level = Some(value.to_string());
        }
        _ => {
            return Err(invalid(format!(
                "Unknown key. Valid keys: {}",
                VALID_CONFIG_KEYS.join(", ")
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn capacity_must_be_positive() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "capacity", "25").is_ok());
        assert_eq!(config.capacity, Some(25));
        assert!(apply_value(&mut config, "capacity", "0").is_err());
        assert!(apply_value(&mut config, "capacity", "many").is_err());
        assert_eq!(config.capacity, Some(25));
    }

    #[test]
    fn poll_interval_is_normalized() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "poll_interval", "90s").unwrap();
        assert_eq!(config.poll_interval, Some("1m30s".to_string()));
        assert!(apply_value(&mut config, "poll_interval", "soon").is_err());
    }

    #[test]
    fn backend_values() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "backend", "Wayland").unwrap();
        assert_eq!(config.backend, Some("wayland".to_string()));
        assert!(apply_value(&mut config, "backend", "x11").is_err());
    }

    #[test]
    fn history_file_must_not_be_blank() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "history_file", "  ").is_err());
        apply_value(&mut config, "history_file", "/tmp/h.json").unwrap();
        assert_eq!(value_of(&config, "history_file"), Some("/tmp/h.json".into()));
    }

    #[test]
    fn log_level_is_validated() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "log_level", "debug").unwrap();
        assert!(apply_value(&mut config, "log_level", "clipkeep=loud").is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            check_key("api_key"),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[tokio::test]
    async fn set_persists_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_set(&store, &presenter, "capacity", "12").await.unwrap();
        assert_eq!(store.load().await.unwrap().capacity, Some(12));

        let err = handle_set(&store, &presenter, "capacity", "0").await;
        assert!(err.is_err());
        assert_eq!(store.load().await.unwrap().capacity, Some(12));
    }
}
