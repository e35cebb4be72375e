pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use expedite_core::config::{AppConfig, LoadOptions};

use crate::commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "expedite",
    about = "Emergency purchase request tracker",
    long_about = "Track emergency purchase requests through intake, buyer follow-up, \
                  and administrator finalization, backed by a single CSV file.",
    after_help = "Examples:\n  expedite submit --requester-name \"Ana Souza\" --registration-number 55421 \\\n    --work-order-number OS-1188 --request-code RC-2071 --equipment-tag PUMP-12B \\\n    --description \"Seal kit\" --kind material\n  expedite update <id> --expected-delivery 2024-01-20 --status in-progress\n  expedite finalize <id> --priority high --complete\n  expedite list --status delayed"
)]
pub struct Cli {
    /// Path to an expedite.toml config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Register a new emergency purchase request (requester screen)")]
    Submit(commands::submit::SubmitArgs),
    #[command(about = "Update delivery estimate, status, and purchase order (buyer screen)")]
    Update(commands::update::UpdateArgs),
    #[command(about = "Set priority and notes, optionally mark completed (administrator screen)")]
    Finalize(commands::finalize::FinalizeArgs),
    #[command(about = "List requests, optionally filtered by status, kind, or priority")]
    List(commands::list::ListArgs),
    #[command(about = "Show a single request by id")]
    Show(commands::show::ShowArgs),
    #[command(about = "Move several requests to one status in a single pass")]
    BulkStatus(commands::bulk_status::BulkStatusArgs),
}

fn init_logging(config: &AppConfig) {
    use expedite_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    let builder = tracing_subscriber::fmt().with_target(false).with_max_level(log_level);
    let result = match config.logging.format {
        Compact => builder.compact().try_init(),
        Pretty => builder.pretty().try_init(),
        Json => builder.json().try_init(),
    };
    // A second init (tests driving run() repeatedly) is not an error worth dying for.
    let _ = result;
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        ..LoadOptions::default()
    }) {
        Ok(config) => config,
        Err(error) => {
            let result = CommandResult::failure(
                "config",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };

    init_logging(&config);

    let result = match &cli.command {
        Command::Submit(args) => commands::submit::run(&config, args),
        Command::Update(args) => commands::update::run(&config, args),
        Command::Finalize(args) => commands::finalize::run(&config, args),
        Command::List(args) => commands::list::run(&config, args),
        Command::Show(args) => commands::show::run(&config, args),
        Command::BulkStatus(args) => commands::bulk_status::run(&config, args),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
