//! Record loading
//!
//! This module turns a stream of delimiter-terminated lines into an in-memory
//! vector of [`Record`]s. Lines that do not start with the header marker and
//! do not belong to a record are skipped, which tolerates leading blank or
//! comment lines.

use std::io::BufRead;

use auto_impl::auto_impl;
use log::debug;

use crate::{
    error::{LoadError, Result},
    Record, DEFAULT_DELIMITER, DEFAULT_HEADER_MARKER,
};

/// A forward-only source of delimiter-terminated lines
///
/// Implemented by [`DelimitedLines`] for any [`BufRead`], and automatically
/// for `&mut` references and boxes of sources.
#[auto_impl(&mut, Box)]
pub trait LineSource {
    /// Returns the next line including its delimiter, or `None` at end of stream.
    fn next_line(&mut self) -> Result<Option<Vec<u8>>>;

    /// Number of lines pulled so far (1-based number of the last line returned)
    fn line_number(&self) -> usize;
}

/// Splits a buffered reader on a single delimiter byte
///
/// A final line without a trailing delimiter is completed with one so that
/// every returned line is delimiter-terminated.
pub struct DelimitedLines<R: BufRead> {
    inner: R,
    delimiter: u8,
    line_number: usize,
}
impl<R: BufRead> DelimitedLines<R> {
    pub fn new(inner: R, delimiter: u8) -> Self {
        Self {
            inner,
            delimiter,
            line_number: 0,
        }
    }
}
impl<R: BufRead> LineSource for DelimitedLines<R> {
    fn next_line(&mut self) -> Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        if self.inner.read_until(self.delimiter, &mut line)? == 0 {
            return Ok(None);
        }
        if line.last() != Some(&self.delimiter) {
            line.push(self.delimiter);
        }
        self.line_number += 1;
        Ok(Some(line))
    }

    fn line_number(&self) -> usize {
        self.line_number
    }
}

/// The result of a full load
#[derive(Debug, Default)]
pub struct LoadedRecords {
    /// Records in input order, `original_index` running from 1
    pub records: Vec<Record>,

    /// Sum of [`Record::size_bytes`] over all records
    pub total_bytes: usize,

    /// Lines outside of records that were ignored
    pub skipped_lines: usize,
}

/// Parses four-line records out of a [`LineSource`]
#[derive(Debug, Clone, Copy)]
pub struct RecordLoader {
    header_marker: u8,
}
impl Default for RecordLoader {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_MARKER)
    }
}
impl RecordLoader {
    #[must_use]
    pub fn new(header_marker: u8) -> Self {
        Self { header_marker }
    }

    /// Loads every record of the source into memory.
    ///
    /// A header line whose three trailing lines are not all present is a
    /// fatal [`LoadError::TruncatedRecord`].
    pub fn load<S: LineSource>(&self, mut source: S) -> Result<LoadedRecords> {
        let mut loaded = LoadedRecords::default();
        while let Some(line) = source.next_line()? {
            if line.first() != Some(&self.header_marker) {
                loaded.skipped_lines += 1;
                continue;
            }
            let index = loaded.records.len() + 1;
            let record = Self::complete_record(&mut source, line, index)?;
            loaded.total_bytes += record.size_bytes();
            loaded.records.push(record);
        }
        if loaded.skipped_lines > 0 {
            debug!(
                "Skipped {} lines outside of records",
                loaded.skipped_lines
            );
        }
        Ok(loaded)
    }

    /// Pulls the payload, separator and annotation lines that follow a header.
    fn complete_record<S: LineSource>(
        source: &mut S,
        identifier: Vec<u8>,
        index: usize,
    ) -> Result<Record> {
        let payload = Self::next_record_line(source, index, "sequence")?;
        let separator = Self::next_record_line(source, index, "separator")?;
        let annotation = Self::next_record_line(source, index, "quality")?;
        Ok(Record::new(
            identifier, payload, separator, annotation, index,
        ))
    }

    fn next_record_line<S: LineSource>(
        source: &mut S,
        index: usize,
        missing: &'static str,
    ) -> Result<Vec<u8>> {
        match source.next_line()? {
            Some(line) => Ok(line),
            None => Err(LoadError::TruncatedRecord {
                index,
                line: source.line_number(),
                missing,
            }
            .into()),
        }
    }
}

/// Convenience wrapper loading all records of a buffered reader.
pub fn load_records<R: BufRead>(
    reader: R,
    header_marker: u8,
    delimiter: u8,
) -> Result<LoadedRecords> {
    RecordLoader::new(header_marker).load(DelimitedLines::new(reader, delimiter))
}

/// Same as [`load_records`] with the FASTQ defaults (`@` and `\n`).
pub fn load_fastq<R: BufRead>(reader: R) -> Result<LoadedRecords> {
    load_records(reader, DEFAULT_HEADER_MARKER, DEFAULT_DELIMITER)
}
