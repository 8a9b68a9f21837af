use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use squish::{
    parse_byte, restore_file, sort_file, strategy::strategy_listing, RestoreConfig, SortConfig,
    Strategy, DEFAULT_KMER_SIZE, DEFAULT_ORDER_FILENAME,
};

mod logging;

#[derive(Parser)]
#[command(name = "squish", version)]
#[command(about = "Reorder FASTQ reads for better compression, keeping the original order recoverable", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort the reads of a FASTQ file and save their original order
    Sort {
        /// Input FASTQ file (optionally compressed)
        input: PathBuf,

        /// Output FASTQ file; `.gz` and `.zst` extensions are compressed
        output: PathBuf,

        /// Read sorting method (see `squish strategies`)
        #[arg(short = 'm', long = "method", default_value_t = Strategy::default(), value_parser = parse_strategy)]
        strategy: Strategy,

        /// K-mer length used by the `kmer` method
        #[arg(short, long, default_value_t = DEFAULT_KMER_SIZE)]
        kmer_size: usize,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Put the reads of a sorted file back in their original order
    Restore {
        /// Sorted FASTQ file written by `squish sort`
        input: PathBuf,

        /// Output FASTQ file in the original read order
        output: PathBuf,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// List the available sorting methods
    Strategies,
}

#[derive(Args)]
struct FormatArgs {
    /// File recording the original order of the sorted reads
    #[arg(short, long = "order-file", default_value = DEFAULT_ORDER_FILENAME)]
    order_file: PathBuf,

    /// First character of a record header line
    #[arg(long, default_value = "@", value_parser = parse_header_char)]
    header_char: u8,

    /// Line delimiter (a single character, or one of \n \t \r \0)
    #[arg(long, default_value = "\\n", value_parser = parse_delimiter)]
    delimiter: u8,
}

fn parse_strategy(name: &str) -> Result<Strategy, String> {
    name.parse::<Strategy>().map_err(|e| e.to_string())
}

fn parse_header_char(value: &str) -> Result<u8, String> {
    parse_byte("header-char", value).map_err(|e| e.to_string())
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    parse_byte("delimiter", value).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match cli.command {
        Commands::Sort {
            input,
            output,
            strategy,
            kmer_size,
            format,
        } => {
            let config = SortConfig::builder()
                .input(&input)
                .output(&output)
                .order_path(&format.order_file)
                .strategy(strategy)
                .kmer_size(kmer_size)
                .header_marker(format.header_char)
                .delimiter(format.delimiter)
                .build()?;
            info!("Using sort method: {} ({})", strategy, strategy.description());
            let summary = sort_file(&config).with_context(|| {
                format!(
                    "Failed to sort {} into {}",
                    input.display(),
                    output.display()
                )
            })?;
            info!(
                "Sorted {} reads in {:.2?}",
                summary.records, summary.elapsed
            );
        }
        Commands::Restore {
            input,
            output,
            format,
        } => {
            let config = RestoreConfig::builder()
                .input(&input)
                .output(&output)
                .order_path(&format.order_file)
                .header_marker(format.header_char)
                .delimiter(format.delimiter)
                .build()?;
            let summary = restore_file(&config).with_context(|| {
                format!(
                    "Failed to restore {} with ledger {}",
                    input.display(),
                    format.order_file.display()
                )
            })?;
            info!(
                "Restored {} reads in {:.2?}",
                summary.records, summary.elapsed
            );
        }
        Commands::Strategies => println!("{}", strategy_listing()),
    }

    Ok(())
}
