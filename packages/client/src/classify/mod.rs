//! Row classification
//!
//! Pure mapping from a row record plus column indices to the fields the
//! aggregates read. No side effects; classifying the same row twice yields
//! identical output.

use crate::config::ColumnIndices;
use crate::error::{Error, Result};
use crate::scanner::{Cell, RowRecord};

/// Fields extracted from one row.
///
/// The manufacturer is mandatory; the dataset has sparse rows, so the
/// vehicle-type and range cells may legitimately be null or absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    pub manufacturer: String,
    pub vehicle_type: Option<String>,
    pub electric_range_raw: Option<String>,
}

/// Maps rows to classified fields using resolved column positions.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    indices: ColumnIndices,
}

impl Classifier {
    pub fn new(indices: ColumnIndices) -> Self {
        Self { indices }
    }

    pub fn classify(&self, row: &RowRecord) -> Result<ClassifiedRow> {
        Ok(ClassifiedRow {
            manufacturer: self.required_text(row, self.indices.maker, "manufacturer")?,
            vehicle_type: self.optional_text(row, self.indices.vehicle_type, "vehicle type")?,
            electric_range_raw: self.optional_text(
                row,
                self.indices.electric_range,
                "electric range",
            )?,
        })
    }

    fn required_text(&self, row: &RowRecord, index: usize, what: &str) -> Result<String> {
        match row.cell(index) {
            Some(Cell::Text(s)) => Ok(s.clone()),
            Some(Cell::Null) | None => Err(Error::unexpected_cell_type(format!(
                "{what} cell at index {index} is null or absent"
            ))),
            Some(Cell::Number(n)) => Err(Error::unexpected_cell_type(format!(
                "{what} cell at index {index} is numeric ({n})"
            ))),
        }
    }

    fn optional_text(&self, row: &RowRecord, index: usize, what: &str) -> Result<Option<String>> {
        match row.cell(index) {
            Some(Cell::Text(s)) => Ok(Some(s.clone())),
            Some(Cell::Null) | None => Ok(None),
            Some(Cell::Number(n)) => Err(Error::unexpected_cell_type(format!(
                "{what} cell at index {index} is numeric ({n})"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(ColumnIndices { maker: 0, vehicle_type: 1, electric_range: 3 })
    }

    fn row(json: &str) -> RowRecord {
        serde_json::from_str(json).expect("test row should decode")
    }

    #[test]
    fn extracts_all_three_fields() {
        let c = classifier()
            .classify(&row(r#"["TESLA","BEV","x","210"]"#))
            .expect("well-shaped row");
        assert_eq!(c.manufacturer, "TESLA");
        assert_eq!(c.vehicle_type.as_deref(), Some("BEV"));
        assert_eq!(c.electric_range_raw.as_deref(), Some("210"));
    }

    #[test]
    fn classification_is_idempotent() {
        let r = row(r#"["TESLA","BEV",null,"210"]"#);
        let c = classifier();
        assert_eq!(c.classify(&r).unwrap(), c.classify(&r).unwrap());
    }

    #[test]
    fn null_manufacturer_is_rejected() {
        let err = classifier().classify(&row(r#"[null,"BEV","x","210"]"#)).unwrap_err();
        assert!(matches!(err, Error::UnexpectedCellType(_)));
    }

    #[test]
    fn numeric_manufacturer_is_rejected() {
        let err = classifier().classify(&row(r#"[42,"BEV","x","210"]"#)).unwrap_err();
        assert!(matches!(err, Error::UnexpectedCellType(_)));
    }

    #[test]
    fn sparse_optional_cells_are_none() {
        let c = classifier()
            .classify(&row(r#"["TESLA",null]"#))
            .expect("sparse row is fine");
        assert_eq!(c.vehicle_type, None);
        assert_eq!(c.electric_range_raw, None);
    }
}
