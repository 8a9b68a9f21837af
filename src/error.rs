/// Custom Result type for squish operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the squish library, encompassing all possible error cases
/// that can occur while loading, sorting, and writing records.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// Errors raised while parsing records from the input stream
    LoadError(#[from] LoadError),

    /// Errors in the run configuration, surfaced before any I/O happens
    ConfigError(#[from] ConfigError),

    /// Errors related to reading or applying an order ledger
    LedgerError(#[from] LedgerError),

    /// Errors raised while rearranging records into a computed order
    SortError(#[from] SortError),

    /// Standard I/O errors from the Rust standard library
    IoError(#[from] std::io::Error),

    /// Errors from the niffler decompression layer
    NifflerError(#[from] niffler::Error),
}

/// Errors that can occur while loading records from a line source
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// A header line was found but the stream ended before the record was complete
    ///
    /// # Fields
    /// * `index` - The 1-based index of the truncated record
    /// * `line` - The line number where the stream ended
    /// * `missing` - Which of the trailing record lines was missing
    #[error(
        "Record {index} is truncated: stream ended at line {line} before its {missing} line"
    )]
    TruncatedRecord {
        index: usize,
        line: usize,
        missing: &'static str,
    },
}

/// Errors in the sort or restore configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The requested ordering strategy is not in the registry
    ///
    /// # Arguments
    /// * `String` - The unknown strategy name
    #[error("Unknown sort method: {0} (use `squish strategies` to list them)")]
    UnknownStrategy(String),

    /// K-mers must be at least one byte long
    #[error("Invalid k-mer size: {0}. Expected a value of at least 1")]
    InvalidKmerSize(usize),

    /// The header marker and the line delimiter must differ
    ///
    /// # Arguments
    /// * `u8` - The byte used for both
    #[error("Header marker and delimiter are both {0:#04x}")]
    ConflictingBytes(u8),

    /// A single-byte option was given something that is not one byte
    #[error("Expected a single byte for {name}, got {value:?}")]
    InvalidByte { name: &'static str, value: String },

    /// No input path was provided to the builder
    #[error("Missing input path in config builder")]
    MissingInput,

    /// No output path was provided to the builder
    #[error("Missing output path in config builder")]
    MissingOutput,
}

/// Errors raised when a record order is not a permutation of the records
#[derive(thiserror::Error, Debug)]
pub enum SortError {
    /// The order does not have one position per record
    ///
    /// # Fields
    /// * `records` - Number of records being rearranged
    /// * `positions` - Number of positions in the order
    #[error("Order has {positions} positions but there are {records} records")]
    OrderLength { records: usize, positions: usize },

    /// A position points outside of `0..N`
    ///
    /// # Arguments
    /// * First `usize` - The offending position
    /// * Second `usize` - The number of records
    #[error("Order position ({0}) is out of record range ({1})")]
    PositionOutOfRange(usize, usize),

    /// The same position appears twice in the order
    #[error("Order position {0} appears more than once")]
    RepeatedPosition(usize),
}

/// Errors that can occur while reading an order ledger or applying it
#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    /// A ledger line is not a positive decimal integer
    #[error("Invalid ledger entry on line {line}: {content:?}")]
    InvalidEntry { line: usize, content: String },

    /// The ledger and the sorted records disagree on the number of records
    ///
    /// # Fields
    /// * `records` - Number of records loaded from the sorted file
    /// * `entries` - Number of entries in the ledger
    #[error("Ledger has {entries} entries but {records} records were loaded")]
    LengthMismatch { records: usize, entries: usize },

    /// A ledger entry points outside of `1..=N`
    ///
    /// # Arguments
    /// * First `usize` - The offending index
    /// * Second `usize` - The number of records
    #[error("Ledger index ({0}) is out of record range ({1})")]
    OutOfRange(usize, usize),

    /// The same original index appears twice in the ledger
    #[error("Ledger index {0} appears more than once")]
    Duplicate(usize),
}
