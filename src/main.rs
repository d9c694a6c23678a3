//! temple2bitwave CLI - Convert Temple trade fills exports to Bitwave CSV
//!
//! # Commands
//!
//! ```bash
//! temple2bitwave convert trades_export.csv     # Convert to Bitwave CSV
//! temple2bitwave parse trades_export.csv       # Parse + validate only
//! temple2bitwave serve                         # Start HTTP server (port 3000)
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use temple2bitwave::{check_required_columns, convert_file, parse_csv_file_auto};

#[derive(Parser)]
#[command(name = "temple2bitwave")]
#[command(about = "Convert Temple trade fills exports to Bitwave-compatible CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Temple trade fills CSV to Bitwave format
    Convert {
        /// Input CSV file (a trades_export from the Temple platform)
        input: PathBuf,

        /// Output file (default: bitwave_trades_<date>.csv in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse and validate a CSV without converting it
    Parse {
        /// Input CSV file
        input: PathBuf,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert { input, output } => cmd_convert(&input, output.as_deref()),
        Commands::Parse { input } => cmd_parse(&input),
        Commands::Serve { port } => cmd_serve(port).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Processing: {}", input.display());

    let result = convert_file(input)?;

    eprintln!();
    eprintln!("Conversion summary");
    eprintln!("   Input fills:   {}", result.summary.input_rows);
    eprintln!("   Unique trades: {}", result.summary.unique_trades);
    eprintln!(
        "   Sells / Buys:  {} / {}",
        result.summary.sell_trades, result.summary.buy_trades
    );
    eprintln!("   Output rows:   {}", result.summary.output_rows);

    if result.fees_detected {
        eprintln!();
        eprintln!(
            "Warning: one or more rows carry non-zero seller_fees or buyer_fees. \
             Fee handling is not implemented - review these transactions manually."
        );
    }

    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(&result.filename));
    fs::write(&path, &result.csv)?;
    eprintln!();
    eprintln!("Output written to: {}", path.display());

    Ok(())
}

fn cmd_parse(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Parsing CSV: {}", input.display());

    let result = parse_csv_file_auto(input)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!(
        "   Delimiter: '{}'",
        match result.delimiter {
            '\t' => "\\t".to_string(),
            c => c.to_string(),
        }
    );
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("Parsed {} records", result.records.len());

    check_required_columns(&result.headers)?;
    eprintln!("All required columns present");

    Ok(())
}

async fn cmd_serve(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    temple2bitwave::server::start_server(port).await
}
