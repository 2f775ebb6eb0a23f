//! Aggregates over the classified row stream
//!
//! A closed set of strategies behind one fold/finalize surface. Each
//! aggregate consumes the full row sequence in a single forward pass with
//! memory bounded by the number of distinct manufacturers, never by the
//! number of rows.

mod average;
mod counter;

use std::collections::HashMap;

pub use average::AverageAccumulator;
pub use counter::Counter;

use crate::classify::ClassifiedRow;
use crate::error::Result;

/// Final result of one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateOutput {
    /// Manufacturer name → vehicle count.
    Count(HashMap<String, u64>),
    /// Mean electric range for the requested manufacturer's BEVs.
    Average(f64),
}

/// One of the supported aggregation strategies.
#[derive(Debug)]
pub enum Aggregator {
    Counter(Counter),
    Average(AverageAccumulator),
}

impl Aggregator {
    pub fn counter() -> Self {
        Self::Counter(Counter::new())
    }

    pub fn average(target_maker: impl Into<String>, bev_marker: impl Into<String>) -> Self {
        Self::Average(AverageAccumulator::new(target_maker, bev_marker))
    }

    /// Fold one classified row into the running aggregate.
    pub fn fold(&mut self, row: ClassifiedRow) -> Result<()> {
        match self {
            Self::Counter(c) => c.fold(row),
            Self::Average(a) => a.fold(row),
        }
    }

    /// Produce the final result. Only meaningful after the row stream
    /// completed without error; a failed run never reaches this point.
    pub fn finish(self) -> AggregateOutput {
        match self {
            Self::Counter(c) => AggregateOutput::Count(c.finish()),
            Self::Average(a) => AggregateOutput::Average(a.finish()),
        }
    }
}
