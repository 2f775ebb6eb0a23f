//! Per-manufacturer vehicle counter

use std::collections::HashMap;

use crate::classify::ClassifiedRow;
use crate::error::Result;

/// Counts rows per manufacturer name.
#[derive(Debug, Default)]
pub struct Counter {
    counts: HashMap<String, u64>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, row: ClassifiedRow) -> Result<()> {
        *self.counts.entry(row.manufacturer).or_insert(0) += 1;
        Ok(())
    }

    pub fn finish(self) -> HashMap<String, u64> {
        self.counts
    }
}
