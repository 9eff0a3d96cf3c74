//! Tab completion of command names.

use rustyline::Context;
use rustyline::completion::{Completer, Pair};
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// Completes the command word, ignoring case.
pub struct ShellCompleter {
    registry: Arc<CommandRegistry>,
}

impl ShellCompleter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Candidates for a partially typed command.
    fn complete_command(&self, partial: &str) -> Vec<Pair> {
        self.registry
            .completions(partial)
            .into_iter()
            .map(|s| Pair {
                display: s.clone(),
                replacement: s,
            })
            .collect()
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_pos = &line[..pos];
        let partial = line_to_pos.trim_start();

        // Commands are a single word; nothing to offer after a space.
        if partial.contains(char::is_whitespace) {
            return Ok((pos, vec![]));
        }

        Ok((pos - partial.len(), self.complete_command(partial)))
    }
}
