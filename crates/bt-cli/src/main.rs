use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bt_cli::commands::{dashboard, log, status, watch};
use bt_cli::{Cli, Commands, Config};

/// Load configuration for a command.
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    match &cli.command {
        Some(Commands::Watch) => {
            let config = load_config(cli.config.as_deref())?;
            let stdin = std::io::stdin();
            watch::run(stdin.lock(), &mut stdout, &config)?;
        }
        Some(Commands::Status) => {
            let config = load_config(cli.config.as_deref())?;
            status::run(&mut stdout, &config)?;
        }
        Some(Commands::Dashboard { output }) => {
            let config = load_config(cli.config.as_deref())?;
            dashboard::run(&mut stdout, &config, output.as_deref())?;
        }
        Some(Commands::Log) => {
            let config = load_config(cli.config.as_deref())?;
            log::run(&mut stdout, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
