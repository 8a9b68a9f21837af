//! Run configuration
//!
//! Both configurations are assembled through builders whose `build` method
//! validates everything that can be checked without touching the filesystem,
//! so configuration mistakes surface before any file is opened.

use std::path::{Path, PathBuf};

use crate::{
    error::{ConfigError, Result},
    strategy::{Strategy, DEFAULT_KMER_SIZE},
    DEFAULT_DELIMITER, DEFAULT_HEADER_MARKER,
};

/// Default path of the order ledger
pub const DEFAULT_ORDER_FILENAME: &str = "order.txt";

/// Parses a single-byte command line option such as `@` or `\n`.
///
/// Accepts a literal single byte or one of the escapes `\n`, `\t`, `\r`, `\0`.
pub fn parse_byte(name: &'static str, value: &str) -> std::result::Result<u8, ConfigError> {
    match value {
        "\\n" => Ok(b'\n'),
        "\\t" => Ok(b'\t'),
        "\\r" => Ok(b'\r'),
        "\\0" => Ok(b'\0'),
        _ if value.len() == 1 => Ok(value.as_bytes()[0]),
        _ => Err(ConfigError::InvalidByte {
            name,
            value: value.to_string(),
        }),
    }
}

/// Settings shared by the sort and restore runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFormat {
    /// First byte of every record header line
    pub header_marker: u8,

    /// Line terminator
    pub delimiter: u8,
}
impl Default for RecordFormat {
    fn default() -> Self {
        Self {
            header_marker: DEFAULT_HEADER_MARKER,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}
impl RecordFormat {
    fn validate(self) -> std::result::Result<Self, ConfigError> {
        if self.header_marker == self.delimiter {
            return Err(ConfigError::ConflictingBytes(self.delimiter));
        }
        Ok(self)
    }
}

/// Configuration of a sort run
#[derive(Debug, Clone)]
pub struct SortConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub order_path: PathBuf,
    pub strategy: Strategy,
    pub kmer_size: usize,
    pub format: RecordFormat,
}
impl SortConfig {
    #[must_use]
    pub fn builder() -> SortConfigBuilder {
        SortConfigBuilder::default()
    }
}

/// Builder for [`SortConfig`]
///
/// # Examples
///
/// ```
/// # use squish::{SortConfig, Strategy, Result};
/// # fn main() -> Result<()> {
/// let config = SortConfig::builder()
///     .input("reads.fastq.gz")
///     .output("reads.sorted.fastq.gz")
///     .strategy(Strategy::Composition)
///     .build()?;
/// assert_eq!(config.order_path.to_str(), Some("order.txt"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SortConfigBuilder {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    order_path: Option<PathBuf>,
    strategy: Option<Strategy>,
    kmer_size: Option<usize>,
    header_marker: Option<u8>,
    delimiter: Option<u8>,
}
impl SortConfigBuilder {
    #[must_use]
    pub fn input<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.input = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn order_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.order_path = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    #[must_use]
    pub fn kmer_size(mut self, kmer_size: usize) -> Self {
        self.kmer_size = Some(kmer_size);
        self
    }

    #[must_use]
    pub fn header_marker(mut self, marker: u8) -> Self {
        self.header_marker = Some(marker);
        self
    }

    #[must_use]
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn build(self) -> Result<SortConfig> {
        let Some(input) = self.input else {
            return Err(ConfigError::MissingInput.into());
        };
        let Some(output) = self.output else {
            return Err(ConfigError::MissingOutput.into());
        };
        let kmer_size = self.kmer_size.unwrap_or(DEFAULT_KMER_SIZE);
        if kmer_size == 0 {
            return Err(ConfigError::InvalidKmerSize(kmer_size).into());
        }
        let format = RecordFormat {
            header_marker: self.header_marker.unwrap_or(DEFAULT_HEADER_MARKER),
            delimiter: self.delimiter.unwrap_or(DEFAULT_DELIMITER),
        }
        .validate()?;
        Ok(SortConfig {
            input,
            output,
            order_path: self
                .order_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ORDER_FILENAME)),
            strategy: self.strategy.unwrap_or_default(),
            kmer_size,
            format,
        })
    }
}

/// Configuration of a restore run
#[derive(Debug, Clone)]
pub struct RestoreConfig {
    /// The sorted file produced by a sort run
    pub input: PathBuf,
    /// Where the records are written back in original order
    pub output: PathBuf,
    pub order_path: PathBuf,
    pub format: RecordFormat,
}
impl RestoreConfig {
    #[must_use]
    pub fn builder() -> RestoreConfigBuilder {
        RestoreConfigBuilder::default()
    }
}

/// Builder for [`RestoreConfig`]
#[derive(Debug, Default)]
pub struct RestoreConfigBuilder {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    order_path: Option<PathBuf>,
    header_marker: Option<u8>,
    delimiter: Option<u8>,
}
impl RestoreConfigBuilder {
    #[must_use]
    pub fn input<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.input = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn order_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.order_path = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn header_marker(mut self, marker: u8) -> Self {
        self.header_marker = Some(marker);
        self
    }

    #[must_use]
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn build(self) -> Result<RestoreConfig> {
        let Some(input) = self.input else {
            return Err(ConfigError::MissingInput.into());
        };
        let Some(output) = self.output else {
            return Err(ConfigError::MissingOutput.into());
        };
        let format = RecordFormat {
            header_marker: self.header_marker.unwrap_or(DEFAULT_HEADER_MARKER),
            delimiter: self.delimiter.unwrap_or(DEFAULT_DELIMITER),
        }
        .validate()?;
        Ok(RestoreConfig {
            input,
            output,
            order_path: self
                .order_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ORDER_FILENAME)),
            format,
        })
    }
}
