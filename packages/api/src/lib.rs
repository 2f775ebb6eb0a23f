//! Aggregate statistics over the WA EV registration dataset
//!
//! Public surface: parse a request, stream the dataset once, return either
//! a per-manufacturer vehicle count or the mean electric range of one
//! manufacturer's battery-electric vehicles. The streaming engine lives in
//! `evreg_client`.

#![deny(unsafe_code)]

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{handle, process};
pub use request::{DataTarget, StatsRequest, parse_request, validate};
pub use response::StatsResponse;

// Re-export the engine types callers need to plug in their own transport
// or configuration.
pub use evreg_client::{
    BytesChunkSource, ChunkSource, ColumnIndices, ColumnLayout, ColumnNames, DatasetConfig, Error,
    Result, StreamChunkSource,
};
