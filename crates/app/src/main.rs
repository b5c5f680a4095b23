use std::process::ExitCode;

use clap::Parser;

use crate::{
    cli::Cli,
    commands::Context,
    error::Result,
    settings::Settings,
};

mod cli;
mod commands;
mod error;
mod settings;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            if let Some(hint) = err.hint() {
                eprintln!("Hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(&cli.global)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "follyo={level},engine={level}",
            level = settings.log_level
        ))
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("using data directory {}", settings.data_dir.display());

    let engine = engine::Engine::builder()
        .ledger_path(settings.ledger_path())
        .snapshots_path(settings.snapshots_path())
        .allow_negative_holdings(settings.allow_negative_holdings)
        .build()?;

    let ctx = Context {
        engine: &engine,
        settings: &settings,
        json: cli.global.json,
    };
    commands::run(&ctx, cli.command)
}
