//! Numscope command line interface.

mod cli;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use numscope_core::AppConfig;
use numscope_scanner::{Phase, ScanController, ScreenView};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,numscope=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Scan {
            number,
            api_key,
            json,
        } => {
            let config = load_config(cli.config.as_deref())?;
            scan(&config, &number, api_key, json).await
        }
        Commands::Validate { number, json } => validate(&number, json),
        Commands::Config => {
            let config = load_config(cli.config.as_deref())?;
            print!("{}", toml::to_string_pretty(&config.redacted())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            let mut config = AppConfig::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.apply_env_overrides(|name| std::env::var(name).ok());
            config.validate()?;
            Ok(config)
        }
        None => AppConfig::load_with_env().context("Failed to load config"),
    }
}

async fn scan(
    config: &AppConfig,
    number: &str,
    api_key: Option<String>,
    json: bool,
) -> Result<ExitCode> {
    info!("Starting Numscope v{}", env!("CARGO_PKG_VERSION"));

    let controller = ScanController::from_config(config);
    controller.set_manual_key(api_key);

    let mut view = run_session(&controller, number).await?;

    if view.needs_manual_key && io::stdin().is_terminal() {
        eprintln!("{}", view.error.as_deref().unwrap_or_default());
        if let Some(key) = prompt_for_key()? {
            controller.set_manual_key(Some(key));
            view = run_session(&controller, number).await?;
        }
    }

    match (view.phase, view.report.as_ref()) {
        (Phase::Success, Some(report)) => {
            if json {
                let out = serde_json::json!({ "number": view.parsed, "report": report });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", render::report_text(view.parsed.as_ref(), report));
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            let message = view.error.unwrap_or_else(|| "Scan did not complete".to_string());
            if json {
                println!("{}", serde_json::json!({ "error": message }));
            } else {
                eprintln!("{message}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Submit `number` and follow the session to its terminal view, drawing
/// progress on stderr when it is a terminal.
async fn run_session(controller: &ScanController, number: &str) -> Result<ScreenView> {
    let draw = io::stderr().is_terminal();
    let mut rx = controller.subscribe();
    let session = controller.submit(number).session();
    let mut drawn = false;

    loop {
        {
            let view = rx.borrow_and_update();
            if view.session == session {
                if draw && view.phase == Phase::Scanning {
                    eprint!("\r{}", render::progress_bar(view.progress));
                    drawn = true;
                }
                if view.phase.is_terminal() {
                    if drawn {
                        eprintln!();
                    }
                    return Ok(view.clone());
                }
            }
        }
        rx.changed().await.context("Scan controller stopped")?;
    }
}

fn prompt_for_key() -> Result<Option<String>> {
    eprint!("API key: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let key = line.trim();

    Ok((!key.is_empty()).then(|| key.to_string()))
}

fn validate(number: &str, json: bool) -> Result<ExitCode> {
    match numscope_scanner::validate(number) {
        Ok(parsed) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            } else {
                println!("{}", render::number_line(&parsed));
                println!("E.164: {}", parsed.e164);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if json {
                println!("{}", serde_json::json!({ "error": err.user_message() }));
            } else {
                eprintln!("{}", err.user_message());
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
