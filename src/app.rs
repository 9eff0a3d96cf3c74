//! Startup sequence: approved users, login, profile, shell.

use anyhow::{Context, Result};
use std::process::ExitCode;

use crate::auth::{LoginGate, LoginOutcome};
use crate::clipboard::Clipboard;
use crate::config::AppConfig;
use crate::console::Prompter;
use crate::credentials::ApprovedUsers;
use crate::shell::history::HistoryConfig;
use crate::shell::{LineEditor, LineSource, Shell, ShellConfig};
use crate::storage;
use crate::user::User;

/// Shown when a user logs in for the first time.
pub const PROFILE_CREATED: &str = "Existing user profile not found. A new one has been created.";

/// One run of the program against a base directory.
pub struct App {
    config: AppConfig,
    shell: Shell,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let history =
            HistoryConfig::new(config.history_path()).with_max_entries(config.history_size);
        let shell = Shell::with_config(ShellConfig {
            history,
            show_welcome: true,
        });
        Self { config, shell }
    }

    /// Line editor for interactive use.
    pub fn editor(&self) -> Result<LineEditor> {
        self.shell.editor()
    }

    /// Logs the user in and runs the shell.
    ///
    /// Lockout is a normal outcome and yields a success status.
    pub fn run(
        &self,
        lines: &mut dyn LineSource,
        prompter: &mut dyn Prompter,
        clipboard: &mut dyn Clipboard,
    ) -> Result<ExitCode> {
        let approved_path = self.config.approved_users_path();
        storage::ensure_exists(&approved_path)
            .with_context(|| format!("Failed to create {}", approved_path.display()))?;
        let approved = ApprovedUsers::load(&approved_path)
            .with_context(|| format!("Failed to read {}", approved_path.display()))?;
        if approved.is_empty() {
            log::warn!("No approved users in {}", approved_path.display());
        }

        let mut gate = LoginGate::new(approved, self.config.max_attempts)?;
        if let Some(greeting) = &self.config.greeting {
            gate = gate.with_greeting(greeting.as_str());
        }

        let credentials = match gate.authenticate(prompter)? {
            LoginOutcome::Authenticated(credentials) => credentials,
            LoginOutcome::LockedOut => return Ok(ExitCode::SUCCESS),
        };

        let profile = self.config.profile_path(&credentials.username);
        if storage::ensure_exists(&profile)
            .with_context(|| format!("Failed to create {}", profile.display()))?
        {
            prompter.notify(PROFILE_CREATED);
            log::info!("Created profile {}", profile.display());
        }
        let mut user = User::load(credentials.username, &profile)
            .with_context(|| format!("Failed to read {}", profile.display()))?;

        self.shell.run(lines, &mut user, &profile, prompter, clipboard)?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Turns the outcome of a run into the process status. Errors exit with 1.
pub fn exit_code(result: Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            log::error!("Fatal: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
