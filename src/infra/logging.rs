pub fn init() {
    // Initialize tracing subscriber once, honoring RUST_LOG if set.
    // Diagnostics go to stderr: stdout carries the JSON-RPC frames.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
