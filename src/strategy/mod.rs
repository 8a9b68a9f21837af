//! # Ordering strategies
//!
//! Every way of reordering records is one variant of the closed [`Strategy`]
//! enum. The command line selects a strategy by name through the read-only
//! [`STRATEGIES`] registry.
//!
//! | Name         | Key                     | Algorithm                 |
//! | ------------ | ----------------------- | ------------------------- |
//! | `alpha`      | sequence bytes          | comparison sort           |
//! | `qual`       | quality bytes           | comparison sort           |
//! | `gc`         | GC fraction of sequence | comparison sort           |
//! | `alpha-heap` | sequence bytes          | binary heap extraction    |
//! | `gc-heap`    | GC fraction of sequence | binary heap extraction    |
//! | `kmer`       | sequence k-mers         | radix sort on k-mer index |
//!
//! The heap variants produce the same key order as their comparison
//! counterparts; ties may land differently.
//!
//! The `kmer` strategy does not compare records directly. It builds a
//! k-mer → record index, radix sorts it, and orders each record by the first
//! position at which one of its k-mers appears (see [`kmer`]).

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::{error::ConfigError, Record};

pub mod compare;
pub mod heap;
pub mod kmer;

/// Default k-mer length of the `kmer` strategy
pub const DEFAULT_KMER_SIZE: usize = 3;

/// A pluggable rule ordering records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Lexicographic on the sequence line
    #[default]
    Payload,
    /// Lexicographic on the quality line
    Annotation,
    /// Numeric on the GC fraction
    Composition,
    /// Heap sort on the sequence line
    PayloadHeap,
    /// Heap sort on the GC fraction
    CompositionHeap,
    /// First occurrence in the radix sorted k-mer index
    Kmer,
}
impl Strategy {
    /// The registry entry of this strategy
    #[must_use]
    pub fn info(self) -> &'static StrategyInfo {
        // Every variant has exactly one entry in `STRATEGIES`.
        match self {
            Self::Payload => &STRATEGIES[0],
            Self::Annotation => &STRATEGIES[1],
            Self::Composition => &STRATEGIES[2],
            Self::PayloadHeap => &STRATEGIES[3],
            Self::CompositionHeap => &STRATEGIES[4],
            Self::Kmer => &STRATEGIES[5],
        }
    }

    /// Name used on the command line
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        self.info().description
    }

    /// The comparator a comparison or heap strategy orders by.
    ///
    /// Returns `None` for [`Strategy::Kmer`], which has no pairwise order.
    #[must_use]
    pub fn comparator(self) -> Option<fn(&Record, &Record) -> Ordering> {
        match self {
            Self::Payload | Self::PayloadHeap => Some(compare::by_payload),
            Self::Annotation => Some(compare::by_annotation),
            Self::Composition | Self::CompositionHeap => Some(compare::by_composition),
            Self::Kmer => None,
        }
    }

    /// Whether this strategy uses the binary heap algorithm
    #[must_use]
    pub fn is_heap(self) -> bool {
        matches!(self, Self::PayloadHeap | Self::CompositionHeap)
    }

    /// Looks up a strategy by its registry name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        STRATEGIES
            .iter()
            .find(|info| info.name == name)
            .map(|info| info.strategy)
            .ok_or_else(|| ConfigError::UnknownStrategy(name.to_string()))
    }
}
impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the strategy registry
#[derive(Debug)]
pub struct StrategyInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub strategy: Strategy,
}

/// Process-wide table of the available strategies, in [`Strategy`] declaration order
pub static STRATEGIES: [StrategyInfo; 6] = [
    StrategyInfo {
        name: "alpha",
        description: "Alphabetical sort on sequence",
        strategy: Strategy::Payload,
    },
    StrategyInfo {
        name: "qual",
        description: "Quality score sort",
        strategy: Strategy::Annotation,
    },
    StrategyInfo {
        name: "gc",
        description: "GC content sort",
        strategy: Strategy::Composition,
    },
    StrategyInfo {
        name: "alpha-heap",
        description: "Sequence alpha heap sort",
        strategy: Strategy::PayloadHeap,
    },
    StrategyInfo {
        name: "gc-heap",
        description: "GC content heap sort",
        strategy: Strategy::CompositionHeap,
    },
    StrategyInfo {
        name: "kmer",
        description: "Sort on the first occurrence of each read in the radix sorted k-mer index",
        strategy: Strategy::Kmer,
    },
];

/// One line per strategy, `name<TAB>description`
#[must_use]
pub fn strategy_listing() -> String {
    STRATEGIES
        .iter()
        .map(|info| format!("{}\t{}", info.name, info.description))
        .collect::<Vec<_>>()
        .join("\n")
}
