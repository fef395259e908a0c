//! Tessera CLI - identifiers and JSON encoding from the command line.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;
mod input;
mod output;

use commands::{decode, encode, uuid};

#[derive(Parser)]
#[command(name = "tessera", version)]
#[command(about = "Version-4 identifiers and JSON encode/decode")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random version-4 identifiers
    Uuid {
        /// Number of identifiers to generate
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
        /// Output as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Re-encode input JSON with the selected escaping
    Encode {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Escape quotes, tags, ampersands, apostrophes and non-ASCII
        #[arg(long, conflicts_with = "options")]
        html: bool,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
        /// Raw encoder flag bitmask (default: unescaped slashes and unicode)
        #[arg(long)]
        options: Option<u32>,
    },
    /// Validate input JSON and print it in normalized form
    Decode {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Decode JSON objects as records instead of mappings
        #[arg(long)]
        objects: bool,
        /// Report the result as JSON, including failures
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Uuid { count, json } => uuid::run(count, json),
        Commands::Encode {
            input,
            html,
            pretty,
            options,
        } => encode::run(input, html, pretty, options),
        Commands::Decode {
            input,
            objects,
            json,
        } => decode::run(input, objects, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
