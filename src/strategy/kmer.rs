//! K-mer index ordering
//!
//! Every record contributes one `(k-mer, record)` pair per overlapping window
//! of its sequence content, so a sequence of length `L` yields
//! `max(L - k + 1, 0)` pairs. The pairs are radix sorted on the k-mer bytes,
//! giving a k-mer → record index in which a record appears once per window.
//!
//! To reorder records the index is collapsed to the first occurrence of each
//! record; records too short to hold a single k-mer keep their relative order
//! after all indexed records.

use log::debug;

use crate::Record;

/// Number of buckets per radix pass, one per byte value
const N_BUCKETS: usize = 256;

/// A k-mer and the position of the record that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmerPair<'a> {
    /// The k-mer bytes, borrowed from the owning record
    pub kmer: &'a [u8],

    /// Position of the owning record in the slice the pairs were built from
    pub record: usize,
}
impl KmerPair<'_> {
    /// Bucket of this pair at character position `pos`.
    ///
    /// K-mers shorter than `pos + 1` fall into bucket 0.
    #[inline]
    fn bucket(&self, pos: usize) -> usize {
        self.kmer.get(pos).map_or(0, |&b| b as usize)
    }
}

/// Iterates the overlapping k-mers of a sequence.
///
/// Yields nothing when `k` is zero or larger than the sequence.
pub fn extract_kmers(sequence: &[u8], k: usize) -> impl Iterator<Item = &[u8]> {
    // `windows` panics on zero, and a sequence shorter than k has no window
    let size = if k == 0 || k > sequence.len() {
        sequence.len() + 1
    } else {
        k
    };
    sequence.windows(size)
}

/// Collects the `(k-mer, record)` pairs of all records, in record order.
#[must_use]
pub fn kmer_pairs(records: &[Record], k: usize) -> Vec<KmerPair<'_>> {
    records
        .iter()
        .enumerate()
        .flat_map(|(record, rec)| {
            extract_kmers(rec.payload_content(), k).map(move |kmer| KmerPair { kmer, record })
        })
        .collect()
}

/// Radix sorts pairs on their k-mer bytes.
///
/// Character positions are processed from the last position of the longest
/// k-mer down to the first. Each pass distributes the current sequence into
/// 256 buckets by the byte at that position and concatenates the buckets in
/// ascending order into a fresh sequence, which replaces the previous one.
/// The distribution is stable, so the final order is lexicographic on the
/// k-mer and, within equal k-mers, follows the input order.
///
/// K-mers of mixed length are padded with bucket 0, the same bucket as the
/// byte `0x00`. A shorter k-mer therefore only sorts before its extensions
/// when those contain no `0x00` byte past its end: `[b"A\0", b"A"]` is
/// already in radix order. K-mers built by [`kmer_pairs`] all share one length
/// and are unaffected.
#[must_use]
pub fn radix_sort(mut pairs: Vec<KmerPair<'_>>) -> Vec<KmerPair<'_>> {
    let max_len = pairs.iter().map(|p| p.kmer.len()).max().unwrap_or(0);
    let mut buckets: Vec<Vec<KmerPair>> = vec![Vec::new(); N_BUCKETS];

    for pos in (0..max_len).rev() {
        for pair in pairs.drain(..) {
            buckets[pair.bucket(pos)].push(pair);
        }
        // `pairs` is empty here; refill it from the buckets in order
        for bucket in &mut buckets {
            pairs.append(bucket);
        }
    }
    pairs
}

/// A radix sorted k-mer → record index
///
/// Records appear once per k-mer they contain; this is not a permutation of
/// the records. Use [`KmerIndex::record_order`] to derive one.
#[derive(Debug)]
pub struct KmerIndex<'a> {
    pairs: Vec<KmerPair<'a>>,
    n_records: usize,
}
impl<'a> KmerIndex<'a> {
    /// Builds the sorted index over `records` with k-mers of length `k`.
    #[must_use]
    pub fn build(records: &'a [Record], k: usize) -> Self {
        let pairs = kmer_pairs(records, k);
        debug!(
            "Extracted {} {k}-mers from {} records",
            pairs.len(),
            records.len()
        );
        Self {
            pairs: radix_sort(pairs),
            n_records: records.len(),
        }
    }

    /// The sorted pairs
    #[must_use]
    pub fn pairs(&self) -> &[KmerPair<'a>] {
        &self.pairs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of index entries owned by the record at position `record`
    #[must_use]
    pub fn count_for(&self, record: usize) -> usize {
        self.pairs.iter().filter(|p| p.record == record).count()
    }

    /// Collapses the index into a permutation of record positions.
    ///
    /// Each record is placed at its first occurrence in k-mer order. Records
    /// without any k-mer follow, in their original relative order.
    #[must_use]
    pub fn record_order(&self) -> Vec<usize> {
        let mut seen = vec![false; self.n_records];
        let mut order = Vec::with_capacity(self.n_records);
        for pair in &self.pairs {
            if !seen[pair.record] {
                seen[pair.record] = true;
                order.push(pair.record);
            }
        }
        order.extend((0..self.n_records).filter(|&i| !seen[i]));
        order
    }
}
