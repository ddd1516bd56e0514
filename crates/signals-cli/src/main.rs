use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "signals")]
#[command(about = "Signals CLI - dispatch signals to CityControl (Sigmax)", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a stored signal to CityControl
    Send {
        signal_id: i64,
        /// Store directory (defaults to the user data dir)
        #[arg(long)]
        store: Option<PathBuf>,
        /// Configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Store a signal read from a TOML file
    Import {
        file: PathBuf,
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Print a STUF message for a signal without sending it
    Render {
        #[arg(value_enum)]
        message: MessageKind,
        /// Signal as TOML
        #[arg(long)]
        signal: PathBuf,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=99))]
        sequence: u8,
        /// Base URL used for links back to the signal
        #[arg(long)]
        api_base: Option<String>,
    },
    /// Check whether a saved response body acknowledges a message
    CheckResponse { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MessageKind {
    CreeerZaak,
    VoegZaakdocument,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;

    match cli.command {
        Commands::Send {
            signal_id,
            store,
            config,
        } => commands::send::execute(signal_id, store, config).await?,
        Commands::Import { file, store } => commands::import::execute(&file, store).await?,
        Commands::Render {
            message,
            signal,
            sequence,
            api_base,
        } => commands::render::execute(message, &signal, sequence, api_base)?,
        Commands::CheckResponse { file } => commands::check_response::execute(&file)?,
    }

    Ok(())
}

fn init_logging(json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .context("Failed to create log filter")?;

    // Logs go to stderr so rendered messages on stdout stay clean.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }

    Ok(())
}
