//! Tools module for TalkMED MCP server

use rmcp::handler::server::router::tool::ToolRouter;
use std::sync::Arc;
use talkmed_client::{SearchOrchestrator, TalkMedClient};

pub mod search;

/// TalkMED MCP Server
#[derive(Clone)]
pub struct TalkMedServer {
    pub(crate) orchestrator: Arc<SearchOrchestrator<TalkMedClient>>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl TalkMedServer {
    pub fn new(orchestrator: Arc<SearchOrchestrator<TalkMedClient>>) -> Self {
        Self {
            orchestrator,
            tool_router: Self::tool_router(),
        }
    }
}
