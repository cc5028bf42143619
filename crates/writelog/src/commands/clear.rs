//! Clear command implementation - truncates the log file

use anyhow::Result;
use writelog_logs::LogRegistry;

use crate::cli::PathArgs;
use crate::output::print_success_json;

pub fn execute(args: PathArgs) -> Result<()> {
    let config = super::load_config(args.path)?;
    let path = super::log_path(&config)?;

    LogRegistry::new().clear(&path)?;

    print_success_json(&format!("Cleared {}", path.display()), Some(&path));
    Ok(())
}
