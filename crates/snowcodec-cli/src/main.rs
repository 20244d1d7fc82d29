#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use config::{CliArgs, CodecConfig, Command};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<ExitCode> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    init_telemetry()?;
    let config = CodecConfig::try_from(args)?;

    if cfg!(debug_assertions) {
        tracing::debug!("Starting with full config: {:#?}", config);
    }

    let codec = config.codec();
    let mut out = std::io::stdout().lock();

    let status = match &config.command {
        Command::Generate {
            timestamp,
            count,
            json,
        } => {
            commands::generate(&codec, *timestamp, *count, *json, &mut out)?;
            ExitCode::SUCCESS
        }
        Command::Parse { id, json } => {
            commands::parse(&codec, id, *json, &mut out)?;
            ExitCode::SUCCESS
        }
        Command::Validate { ids } => {
            if commands::validate(&codec, ids, &mut out)? {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    };

    out.flush()?;
    Ok(status)
}
