//! The parsed four-line record and its cached metrics.

use memchr::memchr2_iter;

/// One four-line entry of the input.
///
/// All four lines are stored verbatim, each ending with the delimiter. Records
/// never change after the loader builds them; sorting only moves them around
/// in the owning `Vec`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Header line (first byte is the header marker)
    identifier: Vec<u8>,

    /// Sequence line
    payload: Vec<u8>,

    /// Separator line (`+` in FASTQ)
    separator: Vec<u8>,

    /// Quality line
    annotation: Vec<u8>,

    /// 1-based position of this record in the input
    original_index: usize,

    /// Cached GC fraction of the payload content
    composition_ratio: f64,

    /// Sum of the byte lengths of the four lines
    size_bytes: usize,
}
impl Record {
    /// Builds a record from its four delimiter-terminated lines.
    #[must_use]
    pub fn new(
        identifier: Vec<u8>,
        payload: Vec<u8>,
        separator: Vec<u8>,
        annotation: Vec<u8>,
        original_index: usize,
    ) -> Self {
        let composition_ratio = composition_ratio(line_content(&payload));
        let size_bytes = identifier.len() + payload.len() + separator.len() + annotation.len();
        Self {
            identifier,
            payload,
            separator,
            annotation,
            original_index,
            composition_ratio,
            size_bytes,
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &[u8] {
        &self.identifier
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    #[must_use]
    pub fn separator(&self) -> &[u8] {
        &self.separator
    }

    #[must_use]
    pub fn annotation(&self) -> &[u8] {
        &self.annotation
    }

    /// The payload without its trailing delimiter
    #[must_use]
    pub fn payload_content(&self) -> &[u8] {
        line_content(&self.payload)
    }

    /// The annotation without its trailing delimiter
    #[must_use]
    pub fn annotation_content(&self) -> &[u8] {
        line_content(&self.annotation)
    }

    #[must_use]
    pub fn original_index(&self) -> usize {
        self.original_index
    }

    /// Fraction of payload content bytes that are `G` or `C`.
    ///
    /// Empty payloads report `0.0`.
    #[must_use]
    pub fn composition_ratio(&self) -> f64 {
        self.composition_ratio
    }

    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// The four lines in write order
    #[must_use]
    pub fn lines(&self) -> [&[u8]; 4] {
        [
            &self.identifier,
            &self.payload,
            &self.separator,
            &self.annotation,
        ]
    }
}

/// Strips the trailing delimiter byte of a stored line.
///
/// Every line held by a [`Record`] ends with the delimiter, so the last byte is dropped.
#[must_use]
pub fn line_content(line: &[u8]) -> &[u8] {
    match line.split_last() {
        Some((_, content)) => content,
        None => line,
    }
}

/// GC fraction of a sequence, `0.0` for an empty one
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn composition_ratio(sequence: &[u8]) -> f64 {
    if sequence.is_empty() {
        return 0.0;
    }
    let n_gc = memchr2_iter(b'G', b'C', sequence).count();
    n_gc as f64 / sequence.len() as f64
}

#[cfg(test)]
mod testing {
    use super::*;

    fn record(payload: &str) -> Record {
        Record::new(
            b"@r\n".to_vec(),
            format!("{payload}\n").into_bytes(),
            b"+\n".to_vec(),
            format!("{}\n", "I".repeat(payload.len())).into_bytes(),
            1,
        )
    }

    #[test]
    fn test_composition_ratio() {
        assert!((record("GGCC").composition_ratio() - 1.0).abs() < f64::EPSILON);
        assert!((record("ACGT").composition_ratio() - 0.5).abs() < f64::EPSILON);
        assert!(record("ATAT").composition_ratio().abs() < f64::EPSILON);
    }

    #[test]
    fn test_composition_ignores_delimiter() {
        // 1 of 4 content bytes, the newline must not count toward the length
        assert!((record("GAAA").composition_ratio() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_payload_sentinel() {
        let rec = record("");
        assert_eq!(rec.payload_content(), b"");
        assert!(rec.composition_ratio().abs() < f64::EPSILON);
        assert!(!rec.composition_ratio().is_nan());
    }

    #[test]
    fn test_size_bytes() {
        let rec = record("ACGT");
        assert_eq!(rec.size_bytes(), 3 + 5 + 2 + 5);
        let total: usize = rec.lines().iter().map(|l| l.len()).sum();
        assert_eq!(total, rec.size_bytes());
    }

    #[test]
    fn test_line_content() {
        assert_eq!(line_content(b"ACGT\n"), b"ACGT");
        assert_eq!(line_content(b"\n"), b"");
        assert_eq!(line_content(b""), b"");
    }
}
