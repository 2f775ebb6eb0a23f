//! Incremental row extractor
//!
//! Consumes chunks of one large JSON document and yields complete top-level
//! row records as soon as they become decodable, without retaining the bytes
//! of already-emitted rows. Works for any chunk fragmentation: the section
//! marker, a row literal, or a single token may be split across chunks.

use bytes::Bytes;
use memchr::memmem;

use super::buffer::ScanBuffer;
use super::columns;
use super::record::RowRecord;
use super::scan::{self, MarkerScan};
use crate::config::{ColumnIndices, ColumnLayout, DatasetConfig};
use crate::error::{Error, Result};

const SECTION_KEY: &[u8] = b"\"data\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtractorState {
    /// Buffering everything until the data section marker appears.
    SeekingMarker,
    /// Inside the data array, emitting rows and trimming the buffer.
    Rows,
    /// Data array closed; remaining stream bytes are trailer, not rows.
    Done,
}

/// Stateful scanner over the concatenation of chunks.
///
/// Restartable only by constructing a fresh instance against a fresh stream.
#[derive(Debug)]
pub struct RowExtractor {
    buffer: ScanBuffer,
    state: ExtractorState,
    marker: memmem::Finder<'static>,
    layout: ColumnLayout,
    columns: Option<ColumnIndices>,
}

impl RowExtractor {
    pub fn new(config: &DatasetConfig) -> Self {
        let columns = match &config.columns {
            ColumnLayout::Fixed(indices) => Some(*indices),
            ColumnLayout::Named(_) => None,
        };
        Self {
            buffer: ScanBuffer::with_capacity(config.buffer_capacity),
            state: ExtractorState::SeekingMarker,
            marker: memmem::Finder::new(SECTION_KEY),
            layout: config.columns.clone(),
            columns,
        }
    }

    /// Column positions, available once the section marker has been found
    /// (immediately, for a fixed layout).
    pub fn columns(&self) -> Option<&ColumnIndices> {
        self.columns.as_ref()
    }

    /// Append one chunk and drain every row that is now complete.
    ///
    /// An empty result means no full row arrived yet, not end of data.
    pub fn push_chunk(&mut self, chunk: Bytes) -> Result<Vec<RowRecord>> {
        self.buffer.append_chunk(chunk);

        if self.state == ExtractorState::SeekingMarker {
            self.seek_marker()?;
        }
        match self.state {
            ExtractorState::Rows => self.drain_rows(),
            ExtractorState::SeekingMarker => Ok(Vec::new()),
            ExtractorState::Done => {
                // Trailer bytes after the data array are not row data.
                self.buffer.clear();
                Ok(Vec::new())
            }
        }
    }

    /// Signal end of stream.
    ///
    /// Fails with [`Error::SectionNotFound`] when the data section never
    /// appeared; otherwise any leftover unmatched buffer content is the
    /// document's closing syntax and is discarded.
    pub fn finish(&mut self) -> Result<()> {
        let leftover = self.buffer.len();
        self.buffer.clear();
        match self.state {
            ExtractorState::SeekingMarker => Err(Error::SectionNotFound),
            ExtractorState::Rows | ExtractorState::Done => {
                tracing::debug!(
                    leftover,
                    total_bytes = self.buffer.total_in(),
                    "row extraction finished"
                );
                Ok(())
            }
        }
    }

    fn seek_marker(&mut self) -> Result<()> {
        match scan::find_marker(self.buffer.as_bytes(), &self.marker) {
            MarkerScan::Found { array_open } => {
                if let ColumnLayout::Named(names) = &self.layout {
                    let prefix = &self.buffer.as_bytes()[..array_open];
                    self.columns = Some(columns::resolve(prefix, names)?);
                }
                self.buffer.consume(array_open + 1);
                self.state = ExtractorState::Rows;
                tracing::debug!(
                    prefix_bytes = self.buffer.total_consumed(),
                    "data section marker found"
                );
                Ok(())
            }
            MarkerScan::NotFound | MarkerScan::Incomplete => Ok(()),
        }
    }

    fn drain_rows(&mut self) -> Result<Vec<RowRecord>> {
        let mut rows = Vec::new();
        loop {
            let bytes = self.buffer.as_bytes();
            let mut pos = 0usize;
            let next = loop {
                match scan::next_significant(bytes, &mut pos) {
                    Some(b',') => pos += 1,
                    other => break other,
                }
            };
            match next {
                None => {
                    // Only whitespace/commas buffered; release them.
                    self.buffer.clear();
                    return Ok(rows);
                }
                Some(b']') => {
                    self.state = ExtractorState::Done;
                    self.buffer.clear();
                    return Ok(rows);
                }
                Some(b'[') => match scan::find_array_end(bytes, pos) {
                    Some(end) => {
                        let row = serde_json::from_slice(&bytes[pos..=end]).map_err(|e| {
                            Error::malformed_row(format!(
                                "row literal did not decode as scalar cells: {e}"
                            ))
                        })?;
                        rows.push(row);
                        self.buffer.consume(end + 1);
                    }
                    None => {
                        // Row split across chunks; keep its prefix buffered.
                        self.buffer.consume(pos);
                        return Ok(rows);
                    }
                },
                Some(other) => {
                    return Err(Error::malformed_row(format!(
                        "expected a row literal, found byte {:?}",
                        char::from(other)
                    )));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnNames;
    use crate::scanner::record::Cell;

    const DOC: &str = concat!(
        r#"{"meta":{"view":{"columns":["#,
        r#"{"name":"Make"},{"name":"Electric Vehicle Type"},{"name":"Electric Range"}"#,
        r#"]}},"data":[["TESLA","Battery Electric Vehicle (BEV)","210"],"#,
        r#"["NISSAN","Battery Electric Vehicle (BEV)","150"]]}"#
    );

    fn extract_all(config: &DatasetConfig, chunk_len: usize) -> Vec<RowRecord> {
        let mut extractor = RowExtractor::new(config);
        let mut rows = Vec::new();
        for chunk in DOC.as_bytes().chunks(chunk_len) {
            rows.extend(
                extractor
                    .push_chunk(Bytes::copy_from_slice(chunk))
                    .expect("well-formed document"),
            );
        }
        extractor.finish().expect("marker was present");
        rows
    }

    #[test]
    fn emits_identical_rows_for_any_fragmentation() {
        let config = DatasetConfig::default();
        let whole = extract_all(&config, DOC.len());
        assert_eq!(whole.len(), 2);
        assert_eq!(whole[0].cell(0).and_then(Cell::as_text), Some("TESLA"));
        for chunk_len in [1, 2, 3, 5, 7, 16, 64] {
            assert_eq!(extract_all(&config, chunk_len), whole, "chunk_len={chunk_len}");
        }
    }

    #[test]
    fn resolves_columns_once_marker_is_found() {
        let config = DatasetConfig::default();
        let mut extractor = RowExtractor::new(&config);
        assert!(extractor.columns().is_none());
        extractor
            .push_chunk(Bytes::from(DOC.as_bytes().to_vec()))
            .expect("well-formed document");
        let indices = extractor.columns().expect("columns resolved at marker");
        assert_eq!(indices.maker, 0);
        assert_eq!(indices.electric_range, 2);
    }

    #[test]
    fn stream_without_marker_fails_on_finish() {
        let config = DatasetConfig {
            columns: ColumnLayout::Fixed(ColumnIndices {
                maker: 0,
                vehicle_type: 1,
                electric_range: 2,
            }),
            ..DatasetConfig::default()
        };
        let mut extractor = RowExtractor::new(&config);
        extractor
            .push_chunk(Bytes::from_static(b"{\"meta\": {\"view\": {}}"))
            .expect("no rows yet");
        assert!(matches!(extractor.finish(), Err(Error::SectionNotFound)));
    }

    #[test]
    fn buffer_is_trimmed_after_each_row() {
        let config = DatasetConfig::default();
        let mut extractor = RowExtractor::new(&config);
        extractor
            .push_chunk(Bytes::from(DOC.as_bytes().to_vec()))
            .expect("well-formed document");
        assert!(extractor.buffer.is_empty());
    }

    #[test]
    fn malformed_row_is_fatal() {
        let config = DatasetConfig {
            columns: ColumnLayout::Fixed(ColumnIndices {
                maker: 0,
                vehicle_type: 1,
                electric_range: 2,
            }),
            ..DatasetConfig::default()
        };
        let mut extractor = RowExtractor::new(&config);
        let result = extractor.push_chunk(Bytes::from_static(b"{\"data\":[[{\"a\":1}]]}"));
        assert!(matches!(result, Err(Error::MalformedRow(_))));
    }

    #[test]
    fn fixed_layout_needs_no_metadata() {
        let config = DatasetConfig {
            columns: ColumnLayout::Fixed(ColumnIndices {
                maker: 0,
                vehicle_type: 1,
                electric_range: 2,
            }),
            ..DatasetConfig::default()
        };
        let mut extractor = RowExtractor::new(&config);
        let rows = extractor
            .push_chunk(Bytes::from_static(b"{\"data\":[[\"KIA\",\"x\",\"90\"]]}"))
            .expect("metadata-less document");
        assert_eq!(rows.len(), 1);
        extractor.finish().expect("clean end");
    }

    #[test]
    fn renamed_columns_resolve_to_new_positions() {
        let doc = concat!(
            r#"{"meta":{"view":{"columns":[{"name":"Electric Range"},"#,
            r#"{"name":"Make"},{"name":"Electric Vehicle Type"}]}},"#,
            r#""data":[["30","FORD","PHEV"]]}"#
        );
        let config = DatasetConfig::default();
        let mut extractor = RowExtractor::new(&config);
        extractor
            .push_chunk(Bytes::from(doc.as_bytes().to_vec()))
            .expect("well-formed document");
        let indices = extractor.columns().expect("resolved");
        assert_eq!(indices.maker, 1);
        assert_eq!(indices.electric_range, 0);
    }

    #[test]
    fn missing_named_column_fails_at_marker() {
        let doc = r#"{"meta":{"view":{"columns":[{"name":"Other"}]}},"data":[]}"#;
        let config = DatasetConfig {
            columns: ColumnLayout::Named(ColumnNames::default()),
            ..DatasetConfig::default()
        };
        let mut extractor = RowExtractor::new(&config);
        let result = extractor.push_chunk(Bytes::from(doc.as_bytes().to_vec()));
        assert!(matches!(result, Err(Error::ColumnResolution(_))));
    }
}
