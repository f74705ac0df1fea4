use futures::{Stream, StreamExt};

/// Upper bound on how much a `Content-Length` hint may preallocate.
/// The buffer still grows past this; the cap only guards against a bogus header.
pub const MAX_PREALLOC: usize = 64 * 1024 * 1024;

/// Append-only byte buffer holding a response body in arrival order.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    bytes: Vec<u8>,
    chunks: usize,
}

impl ChunkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocate from a `Content-Length` hint when the server sent one.
    pub fn with_size_hint(hint: Option<u64>) -> Self {
        let capacity = hint
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX).min(MAX_PREALLOC))
            .unwrap_or(0);
        Self {
            bytes: Vec::with_capacity(capacity),
            chunks: 0,
        }
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
        self.chunks += 1;
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Drain a byte stream into a [`ChunkBuffer`], logging each chunk.
/// Stops at the first stream error.
pub async fn collect_chunks<S, B, E>(stream: S, size_hint: Option<u64>) -> Result<ChunkBuffer, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    let mut buffer = ChunkBuffer::with_size_hint(size_hint);
    futures::pin_mut!(stream);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let chunk = chunk.as_ref();
        buffer.push(chunk);
        tracing::debug!(
            chunk = buffer.chunk_count(),
            bytes = chunk.len(),
            total = buffer.len(),
            "chunk received"
        );
    }

    Ok(buffer)
}
