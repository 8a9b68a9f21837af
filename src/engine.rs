//! Applies an ordering [`Strategy`] to the in-memory record sequence.

use log::{debug, info};

use crate::{
    error::{ConfigError, Result, SortError},
    strategy::{compare, heap, kmer::KmerIndex, Strategy, DEFAULT_KMER_SIZE},
    Record,
};

/// Reorders records with a fixed strategy
///
/// The engine holds only its configuration, so a single instance can sort any
/// number of sequences.
#[derive(Debug, Clone, Copy)]
pub struct SortEngine {
    strategy: Strategy,
    kmer_size: usize,
}
impl Default for SortEngine {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            kmer_size: DEFAULT_KMER_SIZE,
        }
    }
}
impl SortEngine {
    /// Creates an engine, rejecting a zero k-mer size.
    pub fn new(strategy: Strategy, kmer_size: usize) -> Result<Self> {
        if kmer_size == 0 {
            return Err(ConfigError::InvalidKmerSize(kmer_size).into());
        }
        Ok(Self {
            strategy,
            kmer_size,
        })
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub fn kmer_size(&self) -> usize {
        self.kmer_size
    }

    /// Sorts the records in place.
    pub fn sort(&self, records: &mut Vec<Record>) -> Result<()> {
        info!(
            "Sorting {} records with method: {}",
            records.len(),
            self.strategy
        );
        match (self.strategy, self.strategy.comparator()) {
            (Strategy::Kmer, _) | (_, None) => {
                let order = KmerIndex::build(records, self.kmer_size).record_order();
                apply_order(records, &order)?;
            }
            (strategy, Some(cmp)) if strategy.is_heap() => heap::heap_sort_by(records, cmp),
            (_, Some(cmp)) => compare::comparison_sort(records, cmp),
        }
        debug!("{} records after sorting", records.len());
        Ok(())
    }
}

/// Rearranges `records` so that position `i` holds the record previously at `order[i]`.
///
/// `order` must be a permutation of `0..records.len()`; otherwise an error is
/// returned and `records` is left untouched.
pub fn apply_order(records: &mut Vec<Record>, order: &[usize]) -> Result<()> {
    let n_records = records.len();
    if order.len() != n_records {
        return Err(SortError::OrderLength {
            records: n_records,
            positions: order.len(),
        }
        .into());
    }
    let mut seen = vec![false; n_records];
    for &i in order {
        match seen.get_mut(i) {
            None => return Err(SortError::PositionOutOfRange(i, n_records).into()),
            Some(true) => return Err(SortError::RepeatedPosition(i).into()),
            Some(flag) => *flag = true,
        }
    }

    let mut slots: Vec<Option<Record>> = std::mem::take(records).into_iter().map(Some).collect();
    records.extend(order.iter().filter_map(|&i| slots[i].take()));
    Ok(())
}
