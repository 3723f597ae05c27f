//! RainMachine forwarder CLI
//!
//! Reads weather archive records as JSON Lines and forwards them to a
//! RainMachine controller.

#![allow(clippy::print_stdout)]

mod records;

use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, init_logging};
use integration_rainmachine::{
    HttpRainMachineClient, RainMachineClient, RecordForwarder, WeatherMapper, mapping,
};
use tokio::io::AsyncBufReadExt;
use tracing::{debug, info, warn};

use crate::records::{RunSummary, open_input, parse_record_line};

/// RainMachine forwarder
#[derive(Parser)]
#[command(name = "rainmachine-forwarder")]
#[command(author, version, about = "Forward weather station records to a RainMachine controller", long_about = None)]
struct Cli {
    /// Verbosity level (overrides the configured log level)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./rainmachine.toml if present)
    #[arg(short, long, env = "RAINMACHINE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forward records to the controller
    ///
    /// Each line of input is one archive record as a JSON object.
    /// Example: weewx-dump | rainmachine-forwarder run
    Run {
        /// Read records from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Log in with the configured password and print the access token
    ///
    /// The token can be stored as `device.token` to skip the login on start.
    Login,

    /// Print the payloads that would be uploaded, without contacting the device
    Payload {
        /// Read records from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging, log_filter_from_verbosity(cli.verbose))?;

    match cli.command {
        Commands::Run { input } => run(&config, input).await,
        Commands::Login => login(&config).await,
        Commands::Payload { input } => payload(input).await,
    }
}

async fn run(config: &AppConfig, input: Option<PathBuf>) -> anyhow::Result<()> {
    config.validate()?;
    let rm_config = config.to_rainmachine_config();
    let client = HttpRainMachineClient::new(&rm_config)?;
    info!(url = %client.base_url(), "Forwarding records to RainMachine");
    debug!(
        fields = ?mapping::mapped_fields().collect::<Vec<_>>(),
        "Record fields forwarded"
    );

    let mut forwarder = RecordForwarder::new(client, rm_config);
    let mut lines = open_input(input.as_deref()).await?.lines();
    let mut summary = RunSummary::default();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read input")?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                break;
            }
        };
        let Some(line) = line else { break };

        match parse_record_line(&line) {
            Ok(Some(record)) => summary.record(&forwarder.handle(&record).await),
            Ok(None) => {},
            Err(e) => {
                warn!(error = %e, "Skipping malformed record");
                summary.record_invalid();
            },
        }
    }

    info!(
        records = summary.total(),
        posted = summary.posted,
        skipped = summary.skipped,
        disabled = summary.disabled,
        dropped = summary.dropped,
        invalid = summary.invalid,
        "Input exhausted"
    );
    Ok(())
}

async fn login(config: &AppConfig) -> anyhow::Result<()> {
    let rm_config = config.to_rainmachine_config();
    let Some(password) = rm_config.password() else {
        bail!("device.password is not configured");
    };
    let client = HttpRainMachineClient::new(&rm_config)?;
    let token = client.login(password).await?;
    println!("{token}");
    Ok(())
}

async fn payload(input: Option<PathBuf>) -> anyhow::Result<()> {
    let mut mapper = WeatherMapper::new();
    let mut lines = open_input(input.as_deref()).await?.lines();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        match parse_record_line(&line) {
            Ok(Some(record)) => match mapper.map(&record, Utc::now()) {
                Ok(payload) => println!("{}", serde_json::to_string(&payload)?),
                Err(e) => warn!(error = %e, "Skipping unmappable record"),
            },
            Ok(None) => {},
            Err(e) => warn!(error = %e, "Skipping malformed record"),
        }
    }
    Ok(())
}
