//! Chunk source boundary
//!
//! The network transport is an external collaborator: the pipeline only
//! sees an ordered sequence of byte chunks that eventually terminates,
//! cleanly or with an I/O failure. Anything that can produce chunks — a
//! hyper response body, a `futures` stream, a test vector — plugs in here.

mod http;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};

pub use self::http::{HttpChunkSource, fetch};

use crate::error::{Error, Result};

/// Ordered supplier of byte chunks from a long-lived read.
///
/// `next_chunk` resolves to `None` at clean end of stream, and to
/// `Some(Err(_))` when the transport itself fails; either way the source
/// must not be polled again afterwards.
pub trait ChunkSource {
    fn next_chunk(&mut self) -> impl Future<Output = Option<Result<Bytes>>> + Send;
}

/// In-memory chunk source for tests and replays.
#[derive(Debug)]
pub struct BytesChunkSource {
    chunks: std::vec::IntoIter<Bytes>,
    /// Error to surface after the chunks run out, for failure-path tests.
    trailing_error: Option<Error>,
}

impl BytesChunkSource {
    pub fn new(chunks: Vec<Bytes>) -> Self {
        Self { chunks: chunks.into_iter(), trailing_error: None }
    }

    /// Split one byte slice into fixed-size chunks.
    pub fn split(bytes: &[u8], chunk_len: usize) -> Self {
        Self::new(bytes.chunks(chunk_len.max(1)).map(Bytes::copy_from_slice).collect())
    }

    /// Fail with `error` once all chunks have been delivered.
    pub fn failing_with(mut self, error: Error) -> Self {
        self.trailing_error = Some(error);
        self
    }
}

impl ChunkSource for BytesChunkSource {
    async fn next_chunk(&mut self) -> Option<Result<Bytes>> {
        match self.chunks.next() {
            Some(chunk) => Some(Ok(chunk)),
            None => self.trailing_error.take().map(Err),
        }
    }
}

/// Adapter for any `Stream` of byte chunks, e.g. a TLS-terminating client's
/// response body stream.
#[derive(Debug)]
pub struct StreamChunkSource<S> {
    inner: S,
}

impl<S, E> StreamChunkSource<S>
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Unpin + Send,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S, E> ChunkSource for StreamChunkSource<S>
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Unpin + Send,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    async fn next_chunk(&mut self) -> Option<Result<Bytes>> {
        self.inner
            .next()
            .await
            .map(|item| item.map_err(Error::transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bytes_source_replays_chunks_in_order() {
        let mut source = BytesChunkSource::new(vec![
            Bytes::from_static(b"ab"),
            Bytes::from_static(b"cd"),
        ]);
        assert_eq!(source.next_chunk().await.unwrap().unwrap(), "ab");
        assert_eq!(source.next_chunk().await.unwrap().unwrap(), "cd");
        assert!(source.next_chunk().await.is_none());
    }

    #[tokio::test]
    async fn trailing_error_surfaces_after_chunks() {
        let mut source = BytesChunkSource::new(vec![Bytes::from_static(b"ab")])
            .failing_with(Error::transport_msg("connection reset"));
        assert!(source.next_chunk().await.unwrap().is_ok());
        assert!(matches!(source.next_chunk().await, Some(Err(Error::Transport(_)))));
        assert!(source.next_chunk().await.is_none());
    }

    #[tokio::test]
    async fn stream_adapter_maps_errors_to_transport() {
        let items: Vec<std::result::Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"ab")),
            Err(std::io::Error::other("boom")),
        ];
        let mut source = StreamChunkSource::new(futures_util::stream::iter(items));
        assert!(source.next_chunk().await.unwrap().is_ok());
        assert!(matches!(source.next_chunk().await, Some(Err(Error::Transport(_)))));
    }
}
