use anyhow::Context;
use clap::Parser;
use seatmap_cli::Session;
use seatmap_store::{Config, FlightFileRepository};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "seatmap")]
#[command(about = "Interactive seat reservations for a single flight")]
struct Args {
    /// Flight name; reservations are kept in a file of that name
    flight: String,

    /// Directory holding default/<RUN_MODE>/local configuration files
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with prompts on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seatmap_cli=warn,seatmap_store=warn,seatmap_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::load_from(&args.config_dir).context("Failed to load config")?;

    let path = config.storage.flight_path(&args.flight);
    tracing::info!("Using flight file {}", path.display());
    let repository = FlightFileRepository::new(path);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&repository, config.session, stdin.lock(), stdout.lock());
    session.run()
}
