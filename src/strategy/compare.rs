//! Pairwise record comparators

use std::cmp::Ordering;

use crate::Record;

/// Byte-wise comparison of the sequence content
#[must_use]
pub fn by_payload(a: &Record, b: &Record) -> Ordering {
    a.payload_content().cmp(b.payload_content())
}

/// Byte-wise comparison of the quality content
#[must_use]
pub fn by_annotation(a: &Record, b: &Record) -> Ordering {
    a.annotation_content().cmp(b.annotation_content())
}

/// Numeric comparison of the GC fraction.
///
/// Uses the IEEE total order, so the comparison is total even for values a
/// record can never hold (NaN sorts last).
#[must_use]
pub fn by_composition(a: &Record, b: &Record) -> Ordering {
    a.composition_ratio().total_cmp(&b.composition_ratio())
}

/// Sorts with the standard unstable comparison sort.
pub fn comparison_sort(records: &mut [Record], cmp: fn(&Record, &Record) -> Ordering) {
    records.sort_unstable_by(cmp);
}
