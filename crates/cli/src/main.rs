mod cli;

use std::{fs::OpenOptions, path::PathBuf, process::ExitCode, sync::Mutex};

use anyhow::{bail, Context, Result};
use balance_core::{AppConfig, HttpGateway, RequestOrchestrator, SessionManager, SessionStore};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli) {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(balance) => {
            println!("{balance}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if cli.log.is_some() {
                error!("{err:#}");
            }
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let config = AppConfig::load(&cli.config)?;
    info!("config {} loaded", cli.config.display());

    let session_path = cli
        .session_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.session_file));
    let gateway = HttpGateway::from_config(&config)?;
    let sessions = SessionManager::new(&gateway, SessionStore::new(session_path));
    let result = RequestOrchestrator::new(sessions, &gateway)
        .with_force_refresh(cli.force_refresh)
        .run(&config)?;

    if !result.is_success() {
        bail!(
            "balance request failed with code {}: {}",
            result.status_code,
            result.last_error().unwrap_or("no message from server")
        );
    }
    Ok(result.balance)
}

fn init_logging(cli: &Cli) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact();

    match &cli.log {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}
