use anyhow::Result;
use clap::Parser;
use rmcp::{
    handler::server::wrapper::Parameters, model::*, tool, tool_handler, tool_router,
    transport::stdio, ServerHandler, ServiceExt,
};
use std::sync::Arc;
use std::time::Duration;
use talkmed_client::{ClientConfig, SearchOrchestrator, TalkMedClient};
use tracing::info;

mod tools;
use tools::TalkMedServer;

#[derive(Parser)]
#[command(name = "talkmed-mcp", about = "TalkMED MCP Server")]
struct Args {
    /// HTTP port to listen on (if not set, uses stdio)
    #[arg(short, long)]
    port: Option<u16>,

    /// Base URL of the TalkMED API
    #[arg(long, env = "TALKMED_BASE_URL")]
    base_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "TALKMED_TIMEOUT", default_value_t = 10)]
    timeout: u64,
}

impl Args {
    fn orchestrator(&self) -> Result<SearchOrchestrator<TalkMedClient>> {
        let mut config = ClientConfig::new().with_timeout(Duration::from_secs(self.timeout));
        if let Some(ref url) = self.base_url {
            config = config.with_base_url(url.as_str());
        }
        Ok(SearchOrchestrator::new(TalkMedClient::with_config(config)?))
    }
}

#[tool_router]
impl TalkMedServer {
    #[tool(
        description = "Search the TalkMED platform for medical content, including courses and live sessions. Returns a JSON envelope: {success, data} with the keyword, search type, requested page, courses, live sessions and pagination, or {success: false, error} when the search failed."
    )]
    async fn search_medical_content(
        &self,
        params: Parameters<tools::search::SearchMedicalContentRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        tools::search::search_medical_content(self, params).await
    }
}

#[tool_handler]
impl ServerHandler for TalkMedServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "talkmed-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "TalkMED MCP Server - Search medical courses and live sessions on the TalkMED platform. Use search_medical_content with a keyword; narrow with type 'course' or 'live' and page through results with page.".to_string(),
            ),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries JSON-RPC, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting TalkMED MCP Server");

    let orchestrator = Arc::new(args.orchestrator()?);

    if let Some(port) = args.port {
        use rmcp::transport::streamable_http_server::{
            session::local::LocalSessionManager, StreamableHttpService,
        };
        let service = StreamableHttpService::new(
            move || Ok(TalkMedServer::new(Arc::clone(&orchestrator))),
            LocalSessionManager::default().into(),
            Default::default(),
        );

        let router = axum::Router::new().nest_service("/mcp", service);
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
        info!("HTTP MCP server listening on port {port}");
        axum::serve(listener, router).await?;
    } else {
        let service = TalkMedServer::new(orchestrator).serve(stdio()).await?;
        info!("MCP server initialized, waiting for requests");
        service.waiting().await?;
    }

    Ok(())
}
