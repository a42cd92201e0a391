use typed_mcp::infra::{config::Config, logging};
use typed_mcp::{tool_params, McpServer, TypedTool};

tool_params! {
    /// Arguments for the `echo` reference tool.
    #[derive(Debug, Clone)]
    pub struct EchoParams {
        message: String,
        count: u32 = 1,
    }
}

async fn echo(params: EchoParams) -> Result<String, std::convert::Infallible> {
    Ok(params.message.repeat(params.count as usize))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cfg = Config::from_env();

    let mut server = McpServer::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        .with_read_capacity(cfg.read_capacity);
    if let Some(path) = &cfg.trace_file {
        server = server.with_trace_file(path)?;
    }
    server.register(TypedTool::new(
        "echo",
        "Echo a message back, optionally repeated",
        echo,
    ))?;

    tracing::info!(tools = server.registry().len(), "serving MCP on stdio");
    server.serve_stdio().await?;
    Ok(())
}
