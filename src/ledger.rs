//! # Order ledger
//!
//! The ledger records, for every position of the sorted output, the 1-based
//! input position of the record written there:
//!
//! ```text
//! 2
//! 1
//! ```
//!
//! One decimal integer per line, `\n` terminated, no header. It must be
//! written from the same record sequence, in the same order, as the sorted
//! output; [`restore_order`] inverts the sort from the two.

use std::io::{BufRead, BufWriter, Write};

use crate::{
    error::{LedgerError, Result},
    Record,
};

/// Writes the original index of each record, one per line
pub struct LedgerWriter<W: Write> {
    inner: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    entries_written: usize,
}
impl<W: Write> LedgerWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            itoa_buf: itoa::Buffer::new(),
            entries_written: 0,
        }
    }

    /// Writes the ledger line of a single record.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        let digits = self.itoa_buf.format(record.original_index());
        self.inner.write_all(digits.as_bytes())?;
        self.inner.write_all(b"\n")?;
        self.entries_written += 1;
        Ok(())
    }

    /// Writes the ledger lines of all records in slice order.
    ///
    /// Returns the number of entries written by this call.
    pub fn write_records(&mut self, records: &[Record]) -> Result<usize> {
        records.iter().try_for_each(|r| self.write_record(r))?;
        Ok(records.len())
    }

    #[must_use]
    pub fn entries_written(&self) -> usize {
        self.entries_written
    }

    /// Flushes the buffer and returns the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| std::io::Error::from(e).into())
    }
}

/// Parses a ledger into its list of original indices.
///
/// Blank lines are not allowed; a trailing newline is.
pub fn read_ledger<R: BufRead>(reader: R) -> Result<Vec<usize>> {
    let mut entries = Vec::new();
    for (i, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let content = line.strip_suffix(b"\r").unwrap_or(&line);
        match std::str::from_utf8(content).ok().and_then(|s| s.parse::<usize>().ok()) {
            Some(index) => entries.push(index),
            None => {
                return Err(LedgerError::InvalidEntry {
                    line: i + 1,
                    content: String::from_utf8_lossy(content).into_owned(),
                }
                .into())
            }
        }
    }
    Ok(entries)
}

/// Puts sorted records back in their original order.
///
/// `ledger[i]` is the original index of `records[i]`. The ledger must be a
/// permutation of `1..=records.len()`.
pub fn restore_order(records: Vec<Record>, ledger: &[usize]) -> Result<Vec<Record>> {
    let n_records = records.len();
    if ledger.len() != n_records {
        return Err(LedgerError::LengthMismatch {
            records: n_records,
            entries: ledger.len(),
        }
        .into());
    }

    let mut slots: Vec<Option<Record>> = vec![None; n_records];
    for (record, &index) in records.into_iter().zip(ledger) {
        if index == 0 || index > n_records {
            return Err(LedgerError::OutOfRange(index, n_records).into());
        }
        let slot = &mut slots[index - 1];
        if slot.is_some() {
            return Err(LedgerError::Duplicate(index).into());
        }
        *slot = Some(record);
    }

    // every slot is filled: n distinct indices in 1..=n
    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::{load_fastq, Error};
    use anyhow::Result;

    fn two_records() -> Result<Vec<Record>> {
        Ok(load_fastq(&b"@A\nTTAA\n+\nIIII\n@B\nAATT\n+\nIIII\n"[..])?.records)
    }

    #[test]
    fn test_write_ledger() -> Result<()> {
        let mut records = two_records()?;
        records.reverse();
        let mut ledger = LedgerWriter::new(Vec::new());
        assert_eq!(ledger.write_records(&records)?, 2);
        assert_eq!(ledger.entries_written(), 2);
        assert_eq!(ledger.into_inner()?, b"2\n1\n");
        Ok(())
    }

    #[test]
    fn test_read_ledger() -> Result<()> {
        assert_eq!(read_ledger(&b"3\n1\n2\n"[..])?, vec![3, 1, 2]);
        assert_eq!(read_ledger(&b"3\r\n1"[..])?, vec![3, 1]);
        assert!(read_ledger(&b""[..])?.is_empty());
        Ok(())
    }

    #[test]
    fn test_read_invalid_ledger() {
        match read_ledger(&b"1\nx2\n"[..]) {
            Err(Error::LedgerError(LedgerError::InvalidEntry { line, content })) => {
                assert_eq!(line, 2);
                assert_eq!(content, "x2");
            }
            other => panic!("expected an invalid entry, got {other:?}"),
        }
    }

    #[test]
    fn test_read_ledger_with_invalid_utf8() {
        match read_ledger(&b"1\n2\n\xff3\n"[..]) {
            Err(Error::LedgerError(LedgerError::InvalidEntry { line, content })) => {
                assert_eq!(line, 3);
                assert_eq!(content, "\u{fffd}3");
            }
            other => panic!("expected an invalid entry, got {other:?}"),
        }
    }

    #[test]
    fn test_restore_order() -> Result<()> {
        let original = two_records()?;
        let mut sorted = original.clone();
        sorted.reverse();
        let restored = restore_order(sorted, &[2, 1])?;
        assert_eq!(restored, original);
        Ok(())
    }

    #[test]
    fn test_restore_rejects_bad_ledgers() -> Result<()> {
        assert!(matches!(
            restore_order(two_records()?, &[1]),
            Err(Error::LedgerError(LedgerError::LengthMismatch { .. }))
        ));
        assert!(matches!(
            restore_order(two_records()?, &[1, 3]),
            Err(Error::LedgerError(LedgerError::OutOfRange(3, 2)))
        ));
        assert!(matches!(
            restore_order(two_records()?, &[0, 1]),
            Err(Error::LedgerError(LedgerError::OutOfRange(0, 2)))
        ));
        assert!(matches!(
            restore_order(two_records()?, &[2, 2]),
            Err(Error::LedgerError(LedgerError::Duplicate(2)))
        ));
        Ok(())
    }
}
