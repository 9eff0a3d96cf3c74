use anyhow::Result;
use std::process::ExitCode;

use passkeep::clipboard::SystemClipboard;
use passkeep::console::TerminalPrompter;
use passkeep::{App, AppConfig, LogConfig, app, init_logging};

fn main() -> ExitCode {
    app::exit_code(run())
}

fn run() -> Result<ExitCode> {
    let config = AppConfig::load()?;

    let log_config = LogConfig::new(config.log_path()).with_level(config.log_level);
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    log::info!("Using base directory {}", config.base_dir.display());

    let app = App::new(config);
    let mut editor = app.editor()?;
    let mut prompter = TerminalPrompter::new();
    let mut clipboard = SystemClipboard::new();
    app.run(&mut editor, &mut prompter, &mut clipboard)
}
