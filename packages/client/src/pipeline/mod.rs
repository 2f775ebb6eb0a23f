//! Single-pass aggregation pipeline
//!
//! One chunk source, one extractor, one aggregator, processed strictly in
//! arrival order. The aggregator pulls rows, the extractor pulls chunks;
//! backpressure is implicit because nothing is buffered beyond the single
//! in-flight scan buffer. Dropping the pipeline future cancels the run and
//! releases the buffer without returning any partial aggregate.

use crate::aggregate::{AggregateOutput, Aggregator};
use crate::classify::Classifier;
use crate::config::DatasetConfig;
use crate::error::Result;
use crate::scanner::RowExtractor;
use crate::transport::ChunkSource;

/// Lifecycle of one run. `Failed` is terminal; a failed run never yields
/// a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Streaming,
    Complete,
    Failed,
}

/// Drives chunk source → extractor → classifier → aggregator.
#[derive(Debug)]
pub struct Pipeline<S> {
    source: S,
    extractor: RowExtractor,
    classifier: Option<Classifier>,
    state: PipelineState,
}

impl<S: ChunkSource> Pipeline<S> {
    pub fn new(config: &DatasetConfig, source: S) -> Self {
        Self {
            source,
            extractor: RowExtractor::new(config),
            classifier: None,
            state: PipelineState::Init,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Consume the whole stream and produce the aggregate's final result.
    pub async fn run(&mut self, mut aggregator: Aggregator) -> Result<AggregateOutput> {
        self.state = PipelineState::Streaming;
        match self.drive(&mut aggregator).await {
            Ok(()) => {
                self.state = PipelineState::Complete;
                Ok(aggregator.finish())
            }
            Err(e) => {
                self.state = PipelineState::Failed;
                tracing::warn!(error = %e, "aggregation pipeline failed");
                Err(e)
            }
        }
    }

    async fn drive(&mut self, aggregator: &mut Aggregator) -> Result<()> {
        let mut total_rows = 0u64;
        while let Some(chunk) = self.source.next_chunk().await {
            let rows = self.extractor.push_chunk(chunk?)?;
            if rows.is_empty() {
                continue;
            }
            let classifier = match self.classifier {
                Some(c) => c,
                None => {
                    // Rows only flow after the marker, so indices exist here.
                    let indices = *self.extractor.columns().ok_or_else(|| {
                        crate::error::Error::malformed_row(
                            "rows emitted before column positions were known",
                        )
                    })?;
                    *self.classifier.insert(Classifier::new(indices))
                }
            };
            total_rows += rows.len() as u64;
            for row in rows {
                aggregator.fold(classifier.classify(&row)?)?;
            }
        }
        self.extractor.finish()?;
        tracing::debug!(total_rows, "row stream complete");
        Ok(())
    }
}
