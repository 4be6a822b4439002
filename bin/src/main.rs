//! fundscore CLI binary.
//!
//! Ranks listed equities by a weighted fundamental score, exports results,
//! and serves the same pipeline over HTTP.

mod cmd;
mod data;
mod server;
mod sources;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::rank::{OutputFormat, RankOptions};
use fundscore::Settings;
use std::{net::SocketAddr, path::PathBuf, process};

#[derive(Parser)]
#[command(name = "fundscore")]
#[command(about = "Fundamental scoring and ranking of listed equities", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (JSON); defaults apply to any missing key
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and rank stocks
    Rank {
        /// Plain stock symbols (e.g. TCS,INFY)
        #[arg(value_delimiter = ',')]
        symbols: Vec<String>,

        /// CSV file with a `symbol` column
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Exchange suffix appended to each symbol
        #[arg(long)]
        suffix: Option<String>,

        /// Number of results to keep
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Also write CSV tables into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Write CSV tables for a saved JSON results file
    Export {
        /// JSON file holding an array of results
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,
    },

    /// Run the HTTP API
    Serve {
        /// Listen address
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: SocketAddr,

        /// Directory for exported tables
        #[arg(long, default_value = "data")]
        output_dir: PathBuf,
    },

    /// Validate and print the effective settings
    Config,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Install the global subscriber: `RUST_LOG` filter, plain or JSON output
/// on stderr.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fundscore=info"));
    let json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Rank {
            symbols,
            file,
            suffix,
            top_n,
            format,
            export,
        } => {
            let options = RankOptions {
                symbols,
                file,
                suffix,
                top_n,
                format,
                export,
            };
            cmd::rank::rank(settings, options).await?;
        }
        Commands::Export { input, output_dir } => {
            cmd::export::export_results(&settings, &input, output_dir)?;
        }
        Commands::Serve { addr, output_dir } => {
            cmd::serve::serve(settings, addr, output_dir).await?;
        }
        Commands::Config => {
            cmd::config::show_config(&settings)?;
        }
    }

    Ok(())
}
