//! Record writer module
//!
//! Writes [`Record`]s back out as four verbatim lines each, in the order of
//! the slice they are given. Compression, if any, is the business of the
//! underlying writer (see [`crate::handles`]).

use std::io::{BufWriter, Write};

use log::info;

use crate::{error::Result, Record};

/// Default capacity of the internal write buffer
pub const DEFAULT_BUFFER_CAPACITY: usize = 1 << 20;

/// Builder for [`RecordWriter`] instances
///
/// # Examples
///
/// ```
/// # use squish::{RecordWriterBuilder, Result};
/// # fn main() -> Result<()> {
/// let writer = RecordWriterBuilder::default()
///     .buffer_capacity(8192)
///     .build(Vec::new());
/// let bytes = writer.into_inner()?;
/// assert!(bytes.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct RecordWriterBuilder {
    /// Optional buffer capacity setting
    buffer_capacity: Option<usize>,
}
impl RecordWriterBuilder {
    /// Sets the buffer capacity for the writer
    #[must_use]
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = Some(capacity);
        self
    }

    pub fn build<W: Write>(self, inner: W) -> RecordWriter<W> {
        RecordWriter::with_capacity(
            inner,
            self.buffer_capacity.unwrap_or(DEFAULT_BUFFER_CAPACITY),
        )
    }
}

/// Buffered writer of four-line records
pub struct RecordWriter<W: Write> {
    /// The buffered output
    inner: BufWriter<W>,

    /// Number of records written
    records_written: usize,
}
impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_capacity(inner, DEFAULT_BUFFER_CAPACITY)
    }

    pub fn with_capacity(inner: W, capacity: usize) -> Self {
        Self {
            inner: BufWriter::with_capacity(capacity, inner),
            records_written: 0,
        }
    }

    /// Writes the four lines of a record verbatim.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        for line in record.lines() {
            self.inner.write_all(line)?;
        }
        self.records_written += 1;
        Ok(())
    }

    /// Writes all records in slice order and returns how many were written.
    pub fn write_records(&mut self, records: &[Record]) -> Result<usize> {
        records.iter().try_for_each(|r| self.write_record(r))?;
        info!("Wrote {} reads", records.len());
        Ok(records.len())
    }

    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Gets a mutable reference to the underlying writer
    pub fn by_ref(&mut self) -> &mut W {
        self.inner.get_mut()
    }

    /// Consumes the writer and returns the inner writer after flushing
    pub fn into_inner(self) -> Result<W> {
        match self.inner.into_inner() {
            Ok(inner) => Ok(inner),
            Err(e) => Err(std::io::Error::from(e).into()),
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::load_fastq;
    use anyhow::Result;

    const FASTQ: &[u8] = b"@r1\nTTAA\n+\nIIII\n@r2\nAATT\n+r2\n####\n";

    #[test]
    fn test_verbatim_roundtrip() -> Result<()> {
        let records = load_fastq(FASTQ)?.records;
        let mut writer = RecordWriterBuilder::default().build(Vec::new());
        assert_eq!(writer.write_records(&records)?, 2);
        assert_eq!(writer.records_written(), 2);
        assert_eq!(writer.into_inner()?, FASTQ);
        Ok(())
    }

    #[test]
    fn test_writes_in_slice_order() -> Result<()> {
        let mut records = load_fastq(FASTQ)?.records;
        records.swap(0, 1);
        let mut writer = RecordWriter::new(Vec::new());
        writer.write_records(&records)?;
        let bytes = writer.into_inner()?;
        assert!(bytes.starts_with(b"@r2\nAATT\n+r2\n####\n"));
        assert!(bytes.ends_with(b"@r1\nTTAA\n+\nIIII\n"));
        Ok(())
    }

    #[test]
    fn test_small_buffer() -> Result<()> {
        let records = load_fastq(FASTQ)?.records;
        let mut writer = RecordWriterBuilder::default()
            .buffer_capacity(4)
            .build(Vec::new());
        writer.write_records(&records)?;
        writer.flush()?;
        assert_eq!(writer.by_ref().as_slice(), FASTQ);
        Ok(())
    }
}
