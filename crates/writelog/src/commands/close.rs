//! Close command implementation - appends the closing blank entry

use anyhow::{bail, Result};
use writelog_core::LoggingMode;
use writelog_host::ConsoleHost;
use writelog_logs::LogRegistry;
use writelog_session::{SessionOptions, WriteLogSession};

use crate::cli::PathArgs;
use crate::output::print_success_json;

pub fn execute(args: PathArgs) -> Result<()> {
    let config = super::load_config(args.path)?;
    let path = super::log_path(&config)?;

    let mut registry = LogRegistry::new();
    let mut host = ConsoleHost::new();
    let options = SessionOptions {
        mode: LoggingMode::Close,
        preferences: config.preferences.clone(),
        ..Default::default()
    };

    let mut session = WriteLogSession::new(&mut registry, &mut host, options);
    session.start(&path)?;
    if !session.finish(false, 0) {
        bail!("Failed to close {}", path.display());
    }

    print_success_json(&format!("Closed {}", path.display()), Some(&path));
    Ok(())
}
