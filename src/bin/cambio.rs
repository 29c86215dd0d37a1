//! cambio CLI - command-line front-end for the conversion core
//!
//! Presentation glue only: collects arguments, calls the session facade and
//! prints plain values. All logic lives in the library.
//!
//! ## Example Usage
//!
//! ```bash
//! # Convert at the latest rate
//! cambio convert 5.0 EUR BRL
//!
//! # Historical series over a range
//! cambio series 2024-01-01 2024-12-31 EUR BRL
//!
//! # Inspect an offline rate table
//! cambio table rates.csv --filter us --sort
//! ```

use anyhow::Result;
use cambio::config::SessionConfig;
use cambio::content::Language;
use cambio::currency::Currency;
use cambio::rates::{filter_by_currency, sort_by_rate, CsvRateLoader};
use cambio::session::Session;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cambio: currency conversion against ECB reference rates
#[derive(Parser)]
#[command(name = "cambio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Currency conversion against ECB reference rates", long_about = None)]
struct Cli {
    /// Configuration file path (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount at the latest rate
    Convert {
        amount: f64,
        source: Currency,
        target: Currency,
    },
    /// Print a historical rate series
    Series {
        /// Start date (YYYY-MM-DD)
        start: NaiveDate,
        /// End date (YYYY-MM-DD)
        end: NaiveDate,
        source: Currency,
        target: Currency,
    },
    /// Print an offline CSV rate table
    Table {
        /// CSV file; defaults to the configured well-known table
        path: Option<PathBuf>,

        /// Keep only currencies containing this text
        #[arg(long)]
        filter: Option<String>,

        /// Sort by rate, ascending
        #[arg(long)]
        sort: bool,
    },
    /// Print the curiosity of the day for a currency
    Curiosity { currency: Currency },
    /// Print a financial tip for a currency
    Tip {
        currency: Currency,

        /// Tip language (en, es, pt); defaults to the configured language
        #[arg(long)]
        language: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::default(),
    };
    let mut session = Session::new(config)?;

    match cli.command {
        Commands::Convert {
            amount,
            source,
            target,
        } => {
            let result = session.convert(amount, source, target)?;
            println!(
                "{} {} = {:.2} {}",
                amount, source, result.converted, target
            );
            session.append_history(&result);

            let today = Utc::now().date_naive();
            let curiosity = session.curiosity(target, today);
            println!("{}", curiosity);
            let tip = session.tip(target);
            if !tip.is_empty() {
                println!("{}", tip);
            }
        }
        Commands::Series {
            start,
            end,
            source,
            target,
        } => {
            let series = session.series(start, end, source, target)?;
            if series.is_empty() {
                println!("No data for {}..{}", start, end);
            } else {
                for point in series.iter() {
                    println!("{}  {:.4}", point.date, point.rate);
                }
            }
        }
        Commands::Table { path, filter, sort } => {
            let mut rows = match path {
                Some(path) => CsvRateLoader::load_path(path)?,
                None => session.load_csv()?,
            };
            if let Some(needle) = filter {
                rows = filter_by_currency(&rows, &needle);
            }
            if sort {
                sort_by_rate(&mut rows, false);
            }
            for row in rows {
                println!("{}  {}", row.currency, row.rate);
            }
        }
        Commands::Curiosity { currency } => {
            println!("{}", session.curiosity(currency, Utc::now().date_naive()));
        }
        Commands::Tip { currency, language } => {
            let tip = match language {
                Some(tag) => session.tip_in(currency, Language::from_tag(&tag)),
                None => session.tip(currency),
            };
            println!("{}", tip);
        }
    }

    Ok(())
}
