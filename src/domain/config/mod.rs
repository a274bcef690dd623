//! Application configuration

mod app_config;

pub use app_config::{AppConfig, DEFAULT_BACKEND, DEFAULT_LOG_LEVEL};
