//! Passkeep - a local, plaintext credential store.
//!
//! This library provides the pieces behind the `passkeep` binary: the
//! delimited store format, the per-user entry collection, the login gate,
//! the password generator and the interactive command shell.

pub mod app;
pub mod auth;
pub mod clipboard;
pub mod config;
pub mod console;
pub mod credentials;
pub mod entries;
pub mod entry;
pub mod error;
pub mod generator;
pub mod logging;
pub mod shell;
pub mod storage;
pub mod user;

// Re-export commonly used types
pub use app::App;
pub use auth::{LoginGate, LoginOutcome, LoginState};
pub use config::AppConfig;
pub use credentials::{ApprovedUsers, LoginCredentials};
pub use entries::EntryCollection;
pub use entry::Entry;
pub use error::Error;
pub use logging::{LogConfig, init_logging};
pub use shell::{LineSource, Shell, ShellConfig};
pub use user::User;
