use thiserror::Error;

/// Transport-level failures that tear down the serve loop.
///
/// Tool and protocol failures never surface here; those are answered on the
/// wire as JSON-RPC errors or error-flagged call results.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("transport i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("frame serialization: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("frame contains an embedded newline")]
    EmbeddedNewline,
}
