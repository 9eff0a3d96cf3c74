//! Login gate with a bounded number of attempts.

use anyhow::Result;

use crate::console::Prompter;
use crate::credentials::{ApprovedUsers, LoginCredentials};
use crate::error::Error;

/// Attempts allowed when the configuration does not say otherwise.
pub const DEFAULT_MAX_ATTEMPTS: i64 = 5;

pub const USERNAME_PROMPT: &str = "Username: ";
pub const PASSWORD_PROMPT: &str = "Password: ";
pub const LOCKOUT_MESSAGE: &str = "Maximum incorrect attempts reached. Program will now exit.";

/// Where a login session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    AwaitingInput,
    Authenticated(LoginCredentials),
    RejectedRetry { remaining: u32 },
    LockedOut,
}

impl LoginState {
    /// Authenticated and locked out are final.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoginState::Authenticated(_) | LoginState::LockedOut)
    }
}

/// Final result of [`LoginGate::authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(LoginCredentials),
    LockedOut,
}

/// Checks login attempts against the approved users.
#[derive(Debug, Clone)]
pub struct LoginGate {
    approved: ApprovedUsers,
    max_attempts: u32,
    greeting: Option<String>,
}

impl LoginGate {
    /// Creates a gate. Fails if `max_attempts` is negative or above `u32::MAX`.
    pub fn new(approved: ApprovedUsers, max_attempts: i64) -> Result<Self, Error> {
        let max_attempts = u32::try_from(max_attempts).map_err(|_| {
            Error::validation(format!(
                "Max attempts must be between 0 and {} (got {})",
                u32::MAX,
                max_attempts
            ))
        })?;
        Ok(Self {
            approved,
            max_attempts,
            greeting: None,
        })
    }

    /// Text printed once before the first prompt. Blank text is ignored.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        self.greeting = if greeting.trim().is_empty() {
            None
        } else {
            Some(greeting)
        };
        self
    }

    /// Starts a fresh session.
    pub fn session(&self) -> LoginSession<'_> {
        let state = if self.max_attempts == 0 {
            LoginState::LockedOut
        } else {
            LoginState::AwaitingInput
        };
        LoginSession {
            gate: self,
            attempts: 0,
            state,
        }
    }

    /// Prompts until the user logs in or runs out of attempts.
    pub fn authenticate(&self, prompter: &mut dyn Prompter) -> Result<LoginOutcome> {
        if let Some(greeting) = &self.greeting {
            prompter.notify(greeting);
        }

        let mut session = self.session();
        loop {
            match session.state() {
                LoginState::Authenticated(credentials) => {
                    log::info!("User {} logged in", credentials.username);
                    return Ok(LoginOutcome::Authenticated(credentials.clone()));
                }
                LoginState::LockedOut => {
                    log::warn!(
                        "Login locked out after {} failed attempts",
                        session.attempts()
                    );
                    return Ok(LoginOutcome::LockedOut);
                }
                LoginState::AwaitingInput | LoginState::RejectedRetry { .. } => {}
            }

            let username = prompter.read_secret(USERNAME_PROMPT)?;
            let password = prompter.read_secret(PASSWORD_PROMPT)?;

            match session.submit(LoginCredentials::new(username, password)) {
                LoginState::RejectedRetry { remaining } => {
                    log::warn!("Invalid login attempt, {} remaining", remaining);
                    prompter.notify(&rejection_message(*remaining));
                }
                LoginState::LockedOut => prompter.notify(LOCKOUT_MESSAGE),
                _ => {}
            }
        }
    }
}

/// Message shown after a failed attempt with `remaining` tries left.
pub fn rejection_message(remaining: u32) -> String {
    if remaining == 1 {
        "Invalid login attempt. 1 attempt remaining.".to_string()
    } else {
        format!("Invalid login attempt. {} attempts remaining.", remaining)
    }
}

/// One run through the login state machine.
#[derive(Debug)]
pub struct LoginSession<'a> {
    gate: &'a LoginGate,
    attempts: u32,
    state: LoginState,
}

impl LoginSession<'_> {
    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// Number of attempts submitted so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Records an attempt. Has no effect once the session is terminal.
    pub fn submit(&mut self, credentials: LoginCredentials) -> &LoginState {
        if self.state.is_terminal() {
            return &self.state;
        }

        self.attempts += 1;
        self.state = if self.gate.approved.contains(&credentials) {
            LoginState::Authenticated(credentials)
        } else {
            match self.gate.max_attempts - self.attempts {
                0 => LoginState::LockedOut,
                remaining => LoginState::RejectedRetry { remaining },
            }
        };
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::ScriptedPrompter;

    fn gate(max_attempts: i64) -> LoginGate {
        let approved = ApprovedUsers::new(vec![LoginCredentials::new("u1", "p1")]);
        LoginGate::new(approved, max_attempts).unwrap()
    }

    #[test]
    fn test_negative_max_attempts_rejected() {
        let result = LoginGate::new(ApprovedUsers::default(), -1);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_oversized_max_attempts_rejected() {
        let err = LoginGate::new(ApprovedUsers::default(), i64::from(u32::MAX) + 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Max attempts must be between 0 and {} (got 4294967296)", u32::MAX)
        );
        assert!(LoginGate::new(ApprovedUsers::default(), i64::from(u32::MAX)).is_ok());
    }

    #[test]
    fn test_session_transitions() {
        let gate = gate(3);
        let mut session = gate.session();
        assert_eq!(session.state(), &LoginState::AwaitingInput);

        assert_eq!(
            session.submit(LoginCredentials::new("u1", "bad")),
            &LoginState::RejectedRetry { remaining: 2 }
        );
        assert_eq!(
            session.submit(LoginCredentials::new("u1", "p1")),
            &LoginState::Authenticated(LoginCredentials::new("u1", "p1"))
        );

        // terminal states do not move
        session.submit(LoginCredentials::new("x", "y"));
        assert_eq!(session.attempts(), 2);
        assert!(session.state().is_terminal());
    }

    #[test]
    fn test_three_wrong_attempts_lock_out() {
        let gate = gate(3);
        let mut prompter = ScriptedPrompter::new(&["u1", "a", "u1", "b", "u1", "c", "u1", "p1"]);

        let outcome = gate.authenticate(&mut prompter).unwrap();
        assert_eq!(outcome, LoginOutcome::LockedOut);
        // No fourth prompt.
        assert_eq!(prompter.prompts.len(), 6);
        assert_eq!(prompter.answers.len(), 2);
        assert_eq!(
            prompter.messages,
            vec![
                "Invalid login attempt. 2 attempts remaining.",
                "Invalid login attempt. 1 attempt remaining.",
                LOCKOUT_MESSAGE,
            ]
        );
    }

    #[test]
    fn test_success_on_second_try() {
        let gate = gate(3).with_greeting("Welcome.");
        let mut prompter = ScriptedPrompter::new(&["u1", "wrong", "u1", "p1", "extra", "extra"]);

        let outcome = gate.authenticate(&mut prompter).unwrap();
        assert_eq!(
            outcome,
            LoginOutcome::Authenticated(LoginCredentials::new("u1", "p1"))
        );
        assert_eq!(prompter.prompts.len(), 4);
        assert_eq!(prompter.messages[0], "Welcome.");
    }

    #[test]
    fn test_zero_attempts_locks_out_immediately() {
        let gate = gate(0);
        let mut prompter = ScriptedPrompter::new(&["u1", "p1"]);

        let outcome = gate.authenticate(&mut prompter).unwrap();
        assert_eq!(outcome, LoginOutcome::LockedOut);
        assert!(prompter.prompts.is_empty());
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let gate = gate(3);
        let mut prompter = ScriptedPrompter::new(&["u1"]);
        assert!(gate.authenticate(&mut prompter).is_err());
    }

    #[test]
    fn test_rejection_message_grammar() {
        assert_eq!(
            rejection_message(1),
            "Invalid login attempt. 1 attempt remaining."
        );
        assert_eq!(
            rejection_message(4),
            "Invalid login attempt. 4 attempts remaining."
        );
    }
}
