pub mod badges;
pub mod bootstrap;
mod doctor;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use badgey_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "badgey",
    about = "Slack badge bot",
    long_about = "Connects to Slack, answers canned commands, and renders Acclaim badge \
                  templates as attachment cards.",
    after_help = "Examples:\n  badgey run\n  badgey doctor --json"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a badgey.toml config file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Connect to Slack and serve events (the default)")]
    Run,
    #[command(about = "Validate config and credential readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        ..LoadOptions::default()
    };

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => match run_bot(options).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("badgey failed to start: {error:#}");
                ExitCode::FAILURE
            }
        },
        Command::Doctor { json } => {
            let (exit_code, output) = doctor::run(options, json);
            println!("{output}");
            ExitCode::from(exit_code)
        }
    }
}

async fn run_bot(options: LoadOptions) -> Result<()> {
    // Config and logging come up before anything else so a bad token fails
    // loudly instead of surfacing mid-connection.
    let config = AppConfig::load(options)?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;

    tracing::info!(event_name = "system.bot.started", "badgey started");
    tokio::select! {
        result = app.runner.start() => result?,
        result = tokio::signal::ctrl_c() => result?,
    }
    tracing::info!(event_name = "system.bot.stopping", "badgey stopping");

    Ok(())
}

fn init_logging(config: &AppConfig) {
    use badgey_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}
