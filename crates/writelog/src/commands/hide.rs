//! Hide command implementation - hides the directory holding the log

use anyhow::Result;
use writelog_logs::hide_directory;

use crate::cli::PathArgs;
use crate::output::{is_json_mode, print_info, print_success_json};

pub fn execute(args: PathArgs) -> Result<()> {
    let config = super::load_config(args.path)?;
    let path = super::log_path(&config)?;

    match hide_directory(&path)? {
        Some(hidden) => {
            if is_json_mode() {
                print_success_json("Log directory hidden", Some(&hidden));
            } else {
                // Bare path so scripts can capture it
                println!("{}", hidden.display());
            }
        }
        None => {
            if is_json_mode() {
                print_success_json("Log directory left in place", Some(&path));
            } else {
                print_info(&format!("Log path unchanged: {}", path.display()));
            }
        }
    }
    Ok(())
}
