use std::fs::File;
use std::io::{self, BufReader};

use anyhow::Context;
use clap::Parser;
use runway_cli::{repl, CliArgs, Session, SessionOptions};
use runway_core::ReservationLedger;
use runway_store::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    let config = Config::load_from(&args.config_dir, &run_mode).context("Failed to load config")?;

    // Logs go to stderr so they never interleave with prompt output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let ids = config.ledger.id_generator()?;
    let ledger = ReservationLedger::with_default_schedule(Box::new(ids))?;
    tracing::info!(
        flights = ledger.flights().count(),
        run_mode = %run_mode,
        "Reservation ledger ready"
    );

    let mut session = Session::new(
        ledger,
        SessionOptions {
            export_path: config.export.default_path.clone(),
            json: args.json,
        },
    );

    let stdout = io::stdout();
    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            repl::run(&mut session, BufReader::new(file), stdout.lock(), false)
        }
        None => repl::run(&mut session, io::stdin().lock(), stdout.lock(), true),
    }
}
