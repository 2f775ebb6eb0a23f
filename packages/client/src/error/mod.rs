//! Error types for the streaming aggregation engine
//!
//! One crate-level taxonomy; every variant is fatal to the pipeline that
//! raised it. Nothing is retried internally and no partial aggregate is
//! ever returned from a failed run.

use std::error::Error as StdError;

/// A Result alias where the Err case is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the extraction/aggregation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request body did not match the expected shape.
    #[error("invalid request: {0}")]
    RequestValidation(String),

    /// The stream ended before the data section marker appeared.
    #[error("data section never appeared before end of stream")]
    SectionNotFound,

    /// A matched row literal failed to decode as an array of scalar cells.
    #[error("malformed row: {0}")]
    MalformedRow(String),

    /// A classified cell had the wrong scalar kind.
    #[error("unexpected cell type: {0}")]
    UnexpectedCellType(String),

    /// An electric-range cell could not be parsed as a leading integer.
    #[error("electric range is not numeric: {0:?}")]
    NumericParse(String),

    /// Column positions could not be resolved from the document metadata.
    #[error("column resolution failed: {0}")]
    ColumnResolution(String),

    /// The chunk source or the upstream HTTP call failed.
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    /// Create a new RequestValidation error
    pub fn request_validation(msg: impl Into<String>) -> Self {
        Self::RequestValidation(msg.into())
    }

    /// Create a new MalformedRow error
    pub fn malformed_row(msg: impl Into<String>) -> Self {
        Self::MalformedRow(msg.into())
    }

    /// Create a new UnexpectedCellType error
    pub fn unexpected_cell_type(msg: impl Into<String>) -> Self {
        Self::UnexpectedCellType(msg.into())
    }

    /// Create a new ColumnResolution error
    pub fn column_resolution(msg: impl Into<String>) -> Self {
        Self::ColumnResolution(msg.into())
    }

    /// Wrap an underlying transport failure
    pub fn transport<E: Into<Box<dyn StdError + Send + Sync>>>(source: E) -> Self {
        Self::Transport(source.into())
    }

    /// Create a transport error from a bare message
    pub fn transport_msg(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into().into())
    }
}
