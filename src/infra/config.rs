use crate::infra::server::DEFAULT_READ_CAPACITY;

/// Environment configuration for the reference binary. The library itself
/// takes no configuration beyond the server name and version.
pub struct Config {
    /// Append every inbound/outbound frame to this file (debug convenience).
    pub trace_file: Option<String>,
    /// Initial read-buffer capacity in bytes.
    pub read_capacity: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let trace_file = std::env::var("MCP_TRACE_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let read_capacity = std::env::var("MCP_READ_BUFFER")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_READ_CAPACITY);

        Self { trace_file, read_capacity }
    }
}
