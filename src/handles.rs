//! File handles for the two ends of the pipeline
//!
//! Input files are decompressed transparently, with the format detected from
//! their magic bytes. Output files are compressed according to their
//! extension: `.gz` as gzip, `.zst` as zstd, anything else is written plain.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use flate2::{write::GzEncoder, Compression};
use log::info;

use crate::error::Result;

/// Read buffer size for input files (1 MiB)
pub const INPUT_BUFFER_SIZE: usize = 1 << 20;

/// Default zstd compression level
pub const ZSTD_LEVEL: i32 = 3;

/// Files shorter than this cannot carry a compression magic number
const MAGIC_PROBE_LEN: u64 = 5;

/// Opens a possibly compressed input file for buffered reading.
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    if std::fs::metadata(path)?.len() < MAGIC_PROBE_LEN {
        info!("Opening short input file {} as plain text", path.display());
        return Ok(Box::new(BufReader::new(File::open(path)?)));
    }
    let (handle, format) = niffler::from_path(path)?;
    info!("Opening {:?} input file {}", format, path.display());
    Ok(Box::new(BufReader::with_capacity(INPUT_BUFFER_SIZE, handle)))
}

/// Compression applied to an output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Plain,
    Gzip,
    Zstd,
}
impl OutputFormat {
    /// Picks the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("gz" | "gzip") => Self::Gzip,
            Some("zst" | "zstd") => Self::Zstd,
            _ => Self::Plain,
        }
    }
}

/// A writable output file, compressed or not
///
/// Call [`OutputHandle::finish`] once everything is written so the compressed
/// stream is terminated and any final write error is reported.
pub enum OutputHandle {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Zstd(zstd::Encoder<'static, BufWriter<File>>),
}
impl OutputHandle {
    /// Creates the file at `path` with the compression its extension calls for.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = OutputFormat::from_path(path);
        info!("Writing {:?} output file {}", format, path.display());
        Self::with_format(File::create(path)?, format)
    }

    /// Wraps an already open file.
    pub fn with_format(file: File, format: OutputFormat) -> Result<Self> {
        let inner = BufWriter::new(file);
        Ok(match format {
            OutputFormat::Plain => Self::Plain(inner),
            OutputFormat::Gzip => Self::Gzip(GzEncoder::new(inner, Compression::best())),
            OutputFormat::Zstd => Self::Zstd(zstd::Encoder::new(inner, ZSTD_LEVEL)?),
        })
    }

    #[must_use]
    pub fn format(&self) -> OutputFormat {
        match self {
            Self::Plain(_) => OutputFormat::Plain,
            Self::Gzip(_) => OutputFormat::Gzip,
            Self::Zstd(_) => OutputFormat::Zstd,
        }
    }

    /// Terminates the compressed stream and flushes the file.
    pub fn finish(self) -> Result<()> {
        let mut inner = match self {
            Self::Plain(inner) => inner,
            Self::Gzip(encoder) => encoder.finish()?,
            Self::Zstd(encoder) => encoder.finish()?,
        };
        inner.flush()?;
        Ok(())
    }
}
impl Write for OutputHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Gzip(w) => w.write(buf),
            Self::Zstd(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.write_all(buf),
            Self::Gzip(w) => w.write_all(buf),
            Self::Zstd(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
            Self::Zstd(w) => w.flush(),
        }
    }
}
