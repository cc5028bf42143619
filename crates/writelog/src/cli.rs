//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use writelog_core::{LoggingMode, Severity};

#[derive(Parser)]
#[command(name = "writelog")]
#[command(version, about = "Append timestamped, severity-tagged entries to a log file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write one entry per message to the log
    Write(WriteArgs),

    /// Make sure the log exists and write the session header
    Open(PathArgs),

    /// Append the closing blank entry and close the log
    Close(PathArgs),

    /// Truncate the log file
    Clear(PathArgs),

    /// Hide the directory holding the log and print the new log path
    Hide(PathArgs),
}

#[derive(Args)]
pub struct PathArgs {
    /// Log file path (overrides LogPath and the config file)
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct WriteArgs {
    /// Messages to write; read from stdin, one per line, when omitted
    pub messages: Vec<String>,

    /// Entry severity
    #[arg(short = 't', long = "type", default_value = "information")]
    pub severity: Severity,

    /// Log file path (overrides LogPath and the config file)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Also show each entry on the console
    #[arg(long)]
    pub out_host: bool,

    /// Logging mode: default, keepalive or close
    #[arg(short, long)]
    pub mode: Option<LoggingMode>,

    /// Hide the log directory when the log is first opened
    #[arg(long)]
    pub hide_log_dir: bool,

    /// Write the bare message without timestamp and severity
    #[arg(long)]
    pub no_details: bool,

    /// Empty the log before writing
    #[arg(long)]
    pub replace_log: bool,

    /// Terminate the process after writing
    #[arg(long)]
    pub terminate: bool,

    /// Count down this many seconds, then terminate
    #[arg(long, default_value = "0")]
    pub terminate_in: u32,

    /// Preference override, e.g. DebugPreference=SilentlyContinue
    #[arg(long = "pref", value_name = "CATEGORY=VALUE")]
    pub preferences: Vec<String>,
}
