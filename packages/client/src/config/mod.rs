//! Pipeline configuration
//!
//! Dataset location and column semantics are configuration, not hard-coded
//! knowledge, so tests can run the full pipeline against synthetic chunk
//! sources with arbitrary schemas.

/// Production dataset: WA state electric vehicle registrations.
pub const DEFAULT_DATASET_URL: &str = "https://data.wa.gov/api/views/f6w7-q2d2/rows.json";

/// Vehicle-type string identifying a battery-electric vehicle.
pub const BEV_MARKER: &str = "Battery Electric Vehicle (BEV)";

/// Resolved positions of the columns the aggregates read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub maker: usize,
    pub vehicle_type: usize,
    pub electric_range: usize,
}

/// Column names as they appear in `meta.view.columns`.
#[derive(Debug, Clone)]
pub struct ColumnNames {
    pub maker: String,
    pub vehicle_type: String,
    pub electric_range: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            maker: "Make".into(),
            vehicle_type: "Electric Vehicle Type".into(),
            electric_range: "Electric Range".into(),
        }
    }
}

/// How column positions are obtained.
///
/// `Named` resolves positions from the document's own metadata header and is
/// the default; `Fixed` is the fallback for metadata-less documents.
#[derive(Debug, Clone)]
pub enum ColumnLayout {
    Named(ColumnNames),
    Fixed(ColumnIndices),
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::Named(ColumnNames::default())
    }
}

/// Configuration for one aggregation pipeline.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Upstream dataset URL, fetched as a byte stream.
    pub url: String,
    /// Column position strategy.
    pub columns: ColumnLayout,
    /// Exact vehicle-type value that marks a battery-electric vehicle.
    pub bev_marker: String,
    /// Initial scan buffer capacity in bytes.
    pub buffer_capacity: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATASET_URL.into(),
            columns: ColumnLayout::default(),
            bev_marker: BEV_MARKER.into(),
            buffer_capacity: 8192,
        }
    }
}
