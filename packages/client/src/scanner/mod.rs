//! Incremental extraction of row records from a chunked JSON byte stream
//!
//! The scanner finds the `"data"` array once, then yields complete
//! bracket-delimited row literals as they become decodable, trimming
//! consumed bytes so memory stays bounded by the largest in-flight row.

mod buffer;
mod columns;
mod extractor;
mod record;
mod scan;

pub use buffer::ScanBuffer;
pub use extractor::RowExtractor;
pub use record::{Cell, RowRecord};
