//! Response shape

use std::collections::HashMap;

use evreg_client::AggregateOutput;
use serde::Serialize;

/// Final result of one request: a manufacturer → count mapping for
/// `count`, a single floating-point mean for `avg_autonomy`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatsResponse {
    Count(HashMap<String, u64>),
    Average(f64),
}

impl From<AggregateOutput> for StatsResponse {
    fn from(output: AggregateOutput) -> Self {
        match output {
            AggregateOutput::Count(counts) => Self::Count(counts),
            AggregateOutput::Average(mean) => Self::Average(mean),
        }
    }
}
