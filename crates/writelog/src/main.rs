//! writelog CLI - append timestamped, severity-tagged entries to a log file

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::*;

fn main() -> Result<()> {
    // LogPath and the preference variables may come from a .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    output::set_json_mode(cli.json);

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "writelog={0},writelog_core={0},writelog_logs={0},writelog_host={0},writelog_session={0}",
                    log_level
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match cli.command {
        Commands::Write(args) => write::execute(args),
        Commands::Open(args) => open::execute(args),
        Commands::Close(args) => close::execute(args),
        Commands::Clear(args) => clear::execute(args),
        Commands::Hide(args) => hide::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
