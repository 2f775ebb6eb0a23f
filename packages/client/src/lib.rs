//! Streaming aggregation engine for the WA EV registration dataset
//!
//! The dataset is one very large JSON document whose bulk is a `data` array
//! of row-arrays. This crate consumes it as a chunked byte stream, extracts
//! rows incrementally as they become decodable, and folds them into one of
//! two aggregates in a single forward pass: vehicles per manufacturer, or
//! mean advertised electric range for one manufacturer's battery-electric
//! vehicles. Memory stays proportional to the largest in-flight row plus
//! the number of distinct manufacturers, never to the document size.

#![deny(unsafe_code)]

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod scanner;
pub mod transport;

pub use aggregate::{AggregateOutput, Aggregator, AverageAccumulator, Counter};
pub use classify::{ClassifiedRow, Classifier};
pub use config::{ColumnIndices, ColumnLayout, ColumnNames, DatasetConfig};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineState};
pub use scanner::{Cell, RowExtractor, RowRecord};
pub use transport::{BytesChunkSource, ChunkSource, HttpChunkSource, StreamChunkSource};
