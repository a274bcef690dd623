//! clipkeep - clipboard history engine and CLI
//!
//! This crate watches the system clipboard, keeps a bounded, deduplicated,
//! most-recent-first history of copied text and files, persists it across
//! restarts, and can put any past entry back on the clipboard without that
//! write being recorded as a new copy.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: History store, entries, poll interval, config and errors
//! - **Application**: The history engine and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (arboard, wl-clipboard, JSON file, etc.)
//! - **CLI**: Command-line interface, daemon runner, IPC and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
