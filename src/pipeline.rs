//! End-to-end runs over files
//!
//! A sort run loads the whole input, sorts it, then writes the records and
//! the order ledger from the same sorted slice. A restore run reads a sorted
//! file and its ledger and writes the records back in input order. Each phase
//! finishes before the next begins.

use std::{
    fs::File,
    time::{Duration, Instant},
};

use log::{info, warn};

use crate::{
    config::{RestoreConfig, SortConfig},
    error::Result,
    handles::{open_input, OutputHandle},
    ledger::{read_ledger, restore_order, LedgerWriter},
    loader::{DelimitedLines, RecordLoader},
    utils::{file_size, format_bytes},
    RecordWriter, SortEngine,
};

/// Outcome of a sort run
#[derive(Debug, Clone, Copy)]
pub struct SortSummary {
    pub records: usize,
    pub loaded_bytes: usize,
    pub input_size: Option<u64>,
    pub output_size: Option<u64>,
    pub elapsed: Duration,
}
impl SortSummary {
    /// Fraction of the input size saved by the output, if both sizes are known
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn reduction(&self) -> Option<f64> {
        match (self.input_size, self.output_size) {
            (Some(input), Some(output)) if input > 0 => {
                Some((input as f64 - output as f64) / input as f64)
            }
            _ => None,
        }
    }
}

/// Outcome of a restore run
#[derive(Debug, Clone, Copy)]
pub struct RestoreSummary {
    pub records: usize,
    pub elapsed: Duration,
}

/// Sorts the records of `config.input` into `config.output` and writes the ledger.
pub fn sort_file(config: &SortConfig) -> Result<SortSummary> {
    let start = Instant::now();
    let engine = SortEngine::new(config.strategy, config.kmer_size)?;

    let input_size = file_size(&config.input);
    if let Some(size) = input_size {
        info!(
            "Input file {} of size {}",
            config.input.display(),
            format_bytes(size)
        );
    }

    let reader = open_input(&config.input)?;
    let loaded = RecordLoader::new(config.format.header_marker)
        .load(DelimitedLines::new(reader, config.format.delimiter))?;
    info!(
        "{} reads loaded ({})",
        loaded.records.len(),
        format_bytes(loaded.total_bytes as u64)
    );

    let mut records = loaded.records;
    engine.sort(&mut records)?;

    let mut writer = RecordWriter::new(OutputHandle::create(&config.output)?);
    let n_written = writer.write_records(&records)?;
    writer.into_inner()?.finish()?;

    info!(
        "Saving read order to file {} for {} reads",
        config.order_path.display(),
        records.len()
    );
    let mut ledger = LedgerWriter::new(File::create(&config.order_path)?);
    ledger.write_records(&records)?;
    ledger.into_inner()?;

    let summary = SortSummary {
        records: n_written,
        loaded_bytes: loaded.total_bytes,
        input_size,
        output_size: file_size(&config.output),
        elapsed: start.elapsed(),
    };
    log_summary(&summary);
    Ok(summary)
}

fn log_summary(summary: &SortSummary) {
    match (summary.input_size, summary.output_size) {
        (Some(input), Some(output)) => info!(
            "{} in {:.2?}",
            size_change(input, output),
            summary.elapsed
        ),
        _ => warn!("Could not determine the input and output file sizes"),
    }
}

/// Describes how the output size compares to the input size.
#[allow(clippy::cast_precision_loss)]
fn size_change(input: u64, output: u64) -> String {
    let ratio = |delta: u64| if input == 0 { 0.0 } else { delta as f64 / input as f64 };
    if output <= input {
        let saved = input - output;
        format!("Size reduced by {} ({:.4})", format_bytes(saved), ratio(saved))
    } else {
        let grown = output - input;
        format!("Size grew by {} ({:.4})", format_bytes(grown), ratio(grown))
    }
}

/// Writes the records of a sorted file back in their original order.
pub fn restore_file(config: &RestoreConfig) -> Result<RestoreSummary> {
    let start = Instant::now();

    let ledger = read_ledger(open_input(&config.order_path)?)?;
    let reader = open_input(&config.input)?;
    let loaded = RecordLoader::new(config.format.header_marker)
        .load(DelimitedLines::new(reader, config.format.delimiter))?;
    info!(
        "{} reads loaded, {} ledger entries",
        loaded.records.len(),
        ledger.len()
    );

    let records = restore_order(loaded.records, &ledger)?;

    let mut writer = RecordWriter::new(OutputHandle::create(&config.output)?);
    let n_written = writer.write_records(&records)?;
    writer.into_inner()?.finish()?;

    Ok(RestoreSummary {
        records: n_written,
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Strategy;
    use anyhow::Result;

    #[test]
    fn test_sort_file_two_records() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("in.fastq");
        let output = dir.path().join("out.fastq");
        let order = dir.path().join("order.txt");
        std::fs::write(&input, b"@A\nTTAA\n+\nIIII\n@B\nAATT\n+\nIIII\n")?;

        let config = SortConfig::builder()
            .input(&input)
            .output(&output)
            .order_path(&order)
            .strategy(Strategy::Payload)
            .build()?;
        let summary = sort_file(&config)?;

        assert_eq!(summary.records, 2);
        assert_eq!(summary.loaded_bytes, 30);
        assert_eq!(std::fs::read(&order)?, b"2\n1\n");
        assert_eq!(
            std::fs::read(&output)?,
            b"@B\nAATT\n+\nIIII\n@A\nTTAA\n+\nIIII\n"
        );
        Ok(())
    }

    #[test]
    fn test_sort_missing_input() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = SortConfig::builder()
            .input(dir.path().join("missing.fastq"))
            .output(dir.path().join("out.fastq"))
            .order_path(dir.path().join("order.txt"))
            .build()?;
        assert!(sort_file(&config).is_err());
        assert!(!dir.path().join("out.fastq").exists());
        Ok(())
    }

    #[test]
    fn test_reduction() {
        let summary = SortSummary {
            records: 0,
            loaded_bytes: 0,
            input_size: Some(200),
            output_size: Some(50),
            elapsed: Duration::ZERO,
        };
        assert_eq!(summary.reduction(), Some(0.75));
        let unknown = SortSummary {
            output_size: None,
            ..summary
        };
        assert_eq!(unknown.reduction(), None);
    }

    #[test]
    fn test_size_change() {
        assert_eq!(size_change(200, 50), "Size reduced by 150B (0.7500)");
        assert_eq!(size_change(200, 250), "Size grew by 50B (0.2500)");
        assert_eq!(size_change(0, 0), "Size reduced by 0B (0.0000)");
    }
}
