//! Line framing: one JSON message per `\n`-terminated UTF-8 line.

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};

use crate::core::error::ServerError;

/// Inbound frames. `Lines` grows its buffer per line, so messages larger
/// than `capacity` are read correctly, just with extra reallocation.
pub fn framed_lines<R>(reader: R, capacity: usize) -> Lines<BufReader<R>>
where
    R: AsyncRead + Unpin,
{
    BufReader::with_capacity(capacity, reader).lines()
}

/// Outbound frames: serialize, terminate with `\n`, flush per frame.
pub struct FrameWriter<W> {
    inner: W,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub async fn send<T: Serialize>(&mut self, frame: &T) -> Result<(), ServerError> {
        let line = serde_json::to_string(frame)?;
        self.send_line(&line).await
    }

    /// `line` must already be a single serialized frame. Compact JSON never
    /// contains a raw newline; anything else is refused rather than emitted
    /// as two corrupt frames.
    pub async fn send_line(&mut self, line: &str) -> Result<(), ServerError> {
        if line.contains('\n') {
            return Err(ServerError::EmbeddedNewline);
        }
        self.inner.write_all(line.as_bytes()).await?;
        self.inner.write_all(b"\n").await?;
        self.inner.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[tokio::test]
    async fn frames_are_newline_terminated_compact_json() {
        let mut out = FrameWriter::new(Cursor::new(Vec::new()));
        out.send(&json!({"a": 1})).await.unwrap();
        out.send(&json!({"b": "two\nlines"})).await.unwrap();
        let bytes = out.inner.into_inner();
        let text = String::from_utf8(bytes).unwrap();
        // the embedded newline in the string value stays escaped
        assert_eq!(text, "{\"a\":1}\n{\"b\":\"two\\nlines\"}\n");
    }

    #[tokio::test]
    async fn raw_newlines_are_refused() {
        let mut out = FrameWriter::new(Cursor::new(Vec::new()));
        let err = out.send_line("{\"a\":\n1}").await.unwrap_err();
        assert!(matches!(err, ServerError::EmbeddedNewline));
    }

    #[tokio::test]
    async fn reader_handles_lines_longer_than_its_buffer() {
        let big = format!("{{\"x\":\"{}\"}}", "a".repeat(1024 * 256));
        let input = format!("{big}\nshort\n");
        let mut lines = framed_lines(input.as_bytes(), 64);
        assert_eq!(lines.next_line().await.unwrap().unwrap(), big);
        assert_eq!(lines.next_line().await.unwrap().unwrap(), "short");
        assert!(lines.next_line().await.unwrap().is_none());
    }
}
