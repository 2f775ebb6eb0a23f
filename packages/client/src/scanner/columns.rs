//! Column index resolution from the document metadata prefix
//!
//! The metadata (`meta.view.columns`) precedes the data array, so by the
//! time the section marker is found the full `"columns"` array is sitting
//! in the scan buffer. Resolving positions by name here removes the silent
//! breakage a fixed-index layout suffers when the upstream reorders columns.

use memchr::memmem;
use serde::Deserialize;

use super::scan;
use crate::config::{ColumnIndices, ColumnNames};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct ColumnMeta {
    name: String,
}

/// Resolve the positions of the named columns from the metadata bytes that
/// precede the data array.
pub(crate) fn resolve(prefix: &[u8], names: &ColumnNames) -> Result<ColumnIndices> {
    let columns = parse_column_names(prefix)?;
    let position = |name: &str| -> Result<usize> {
        columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| {
                Error::column_resolution(format!("column {name:?} not present in document metadata"))
            })
    };
    Ok(ColumnIndices {
        maker: position(&names.maker)?,
        vehicle_type: position(&names.vehicle_type)?,
        electric_range: position(&names.electric_range)?,
    })
}

fn parse_column_names(prefix: &[u8]) -> Result<Vec<ColumnMeta>> {
    let missing = || Error::column_resolution("no \"columns\" array in document metadata");
    let key = memmem::Finder::new(b"\"columns\"");
    let hit = key.find(prefix).ok_or_else(missing)?;

    let mut pos = hit + key.needle().len();
    match scan::next_significant(prefix, &mut pos) {
        Some(b':') => pos += 1,
        _ => return Err(missing()),
    }
    let open = match scan::next_significant(prefix, &mut pos) {
        Some(b'[') => pos,
        _ => return Err(missing()),
    };
    let close = scan::find_array_end(prefix, open).ok_or_else(missing)?;

    serde_json::from_slice(&prefix[open..=close])
        .map_err(|e| Error::column_resolution(format!("column metadata did not decode: {e}")))
}
