//! # squish
//!
//! Reorders the records of a FASTQ file so that similar reads end up next to
//! each other, which tends to make the rewritten file compress better. The
//! permutation is saved to an *order ledger* so the original order can always
//! be restored.
//!
//! ## Overview
//!
//! 1. [`RecordLoader`] reads four-line records from a [`LineSource`] into memory,
//!    numbering them from 1 in input order.
//! 2. [`SortEngine`] reorders them in place with one of the [`Strategy`] variants
//!    (see [`strategy`] for the list).
//! 3. [`RecordWriter`] writes the records and [`LedgerWriter`] writes their
//!    original indices, both from the same sorted slice.
//!
//! ## Example
//!
//! ```
//! use squish::{load_fastq, LedgerWriter, RecordWriter, Result, SortEngine, Strategy};
//!
//! fn main() -> Result<()> {
//!     let fastq = b"@A\nTTAA\n+\nIIII\n@B\nAATT\n+\nIIII\n";
//!     let mut records = load_fastq(&fastq[..])?.records;
//!
//!     SortEngine::new(Strategy::Payload, 3)?.sort(&mut records)?;
//!
//!     let mut writer = RecordWriter::new(Vec::new());
//!     writer.write_records(&records)?;
//!     assert_eq!(writer.into_inner()?, b"@B\nAATT\n+\nIIII\n@A\nTTAA\n+\nIIII\n");
//!
//!     let mut ledger = LedgerWriter::new(Vec::new());
//!     ledger.write_records(&records)?;
//!     assert_eq!(ledger.into_inner()?, b"2\n1\n");
//!     Ok(())
//! }
//! ```

/// Default first byte of a record header line
pub const DEFAULT_HEADER_MARKER: u8 = b'@';

/// Default line terminator
pub const DEFAULT_DELIMITER: u8 = b'\n';

mod config;
mod engine;
mod error;
pub mod handles;
mod ledger;
mod loader;
pub mod pipeline;
mod record;
pub mod strategy;
mod utils;
mod writer;

pub use config::{
    parse_byte, RecordFormat, RestoreConfig, RestoreConfigBuilder, SortConfig, SortConfigBuilder,
    DEFAULT_ORDER_FILENAME,
};
pub use engine::{apply_order, SortEngine};
pub use error::{ConfigError, Error, LedgerError, LoadError, Result, SortError};
pub use ledger::{read_ledger, restore_order, LedgerWriter};
pub use loader::{
    load_fastq, load_records, DelimitedLines, LineSource, LoadedRecords, RecordLoader,
};
pub use pipeline::{restore_file, sort_file, RestoreSummary, SortSummary};
pub use record::Record;
pub use strategy::{Strategy, StrategyInfo, DEFAULT_KMER_SIZE, STRATEGIES};
pub use utils::format_bytes;
pub use writer::{RecordWriter, RecordWriterBuilder};
