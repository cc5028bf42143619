//! Open command implementation - creates the log and writes the session header

use anyhow::Result;
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
        mode: LoggingMode::Default,
        preferences: config.preferences.clone(),
        ..Default::default()
    };

    let mut session = WriteLogSession::new(&mut registry, &mut host, options);
    session.start(&path)?;
    let path = session.path().to_path_buf();
    session.finish(false, 0);

    print_success_json(&format!("Opened {}", path.display()), Some(&path));
    Ok(())
}
