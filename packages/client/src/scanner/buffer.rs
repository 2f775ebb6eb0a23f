//! Scan buffer for incremental row extraction
//!
//! Accumulates incoming chunks and is trimmed whenever a row (or the section
//! marker) has been fully consumed, so memory stays proportional to the
//! largest unterminated row plus any unconsumed marker prefix.

use bytes::{Bytes, BytesMut};

/// Append-then-trim byte buffer owned by the row extractor.
///
/// Invariant: at any pause point the buffer holds exactly the unconsumed
/// suffix of all bytes received so far.
#[derive(Debug)]
pub struct ScanBuffer {
    buffer: BytesMut,
    total_in: u64,
    total_consumed: u64,
}

impl ScanBuffer {
    /// Create a scan buffer with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            total_in: 0,
            total_consumed: 0,
        }
    }

    /// Append an incoming chunk.
    pub fn append_chunk(&mut self, chunk: Bytes) {
        self.total_in += chunk.len() as u64;
        self.buffer.extend_from_slice(&chunk);
    }

    /// Current unconsumed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..]
    }

    /// Drop `count` bytes from the front of the buffer.
    pub fn consume(&mut self, count: usize) {
        debug_assert!(count <= self.buffer.len());
        let _ = self.buffer.split_to(count);
        self.total_consumed += count as u64;
    }

    /// Drop everything currently buffered.
    pub fn clear(&mut self) {
        self.total_consumed += self.buffer.len() as u64;
        self.buffer.clear();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Total bytes ever appended.
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Total bytes consumed and released.
    pub fn total_consumed(&self) -> u64 {
        self.total_consumed
    }
}
