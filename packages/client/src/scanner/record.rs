//! Decoded row records
//!
//! A row is an ordered, fixed-but-unvalidated-length array of scalar cells.
//! Column semantics live in [`crate::config::ColumnIndices`], not here.

use serde::Deserialize;

/// One scalar cell of a row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// One decoded row of the dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RowRecord(pub Vec<Cell>);

impl RowRecord {
    /// Cell at `index`, or `None` when the row is shorter than expected.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
