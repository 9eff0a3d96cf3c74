//! Copying generated passwords to the system clipboard.
//!
//! The text is piped to the platform's copy utility. Windows is not supported.

use anyhow::{Context, Result, anyhow, bail};
use std::env;
use std::io::Write;
use std::process::{Command, Stdio};

/// Destination for generated passwords.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Clipboard reached through the platform's copy utility.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    fn program() -> Result<(&'static str, Vec<&'static str>)> {
        if cfg!(target_os = "macos") {
            Ok(("pbcopy", vec![]))
        } else if env::var("WAYLAND_DISPLAY").is_ok() {
            Ok(("wl-copy", vec!["--trim-newline"]))
        } else if env::var("DISPLAY").is_ok() {
            Ok(("xclip", vec!["-in", "-selection", "clipboard"]))
        } else {
            bail!("No clipboard available (neither WAYLAND_DISPLAY nor DISPLAY is set)")
        }
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let (program, args) = Self::program()?;
        pipe_to(program, &args, text)?;
        log::debug!("Copied {} characters to clipboard via {}", text.len(), program);
        Ok(())
    }
}

/// Runs `program` with `text` on its stdin and waits for it to exit.
fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to spawn {}", program))?;

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin
            .write_all(text.as_bytes())
            .with_context(|| format!("Failed to write to {}", program)),
        None => Err(anyhow!("stdin wasn't captured")),
    };
    // Reap the child even when the write failed.
    let status = child.wait();
    written?;

    let status = status.with_context(|| format!("Failed to wait for {}", program))?;
    if !status.success() {
        bail!("{} exited with {}", program, status);
    }
    Ok(())
}
