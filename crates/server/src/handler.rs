//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.

use std::sync::Arc;

use gsearch_core::{ContentExtractor, SearchService};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Implementation, JsonObject, ListToolsResult, PaginatedRequestParam,
        ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
};

use crate::error::DispatchError;
use crate::tools::{
    AddParams, ExtractMultipleParams, ExtractWebpageParams, GoogleSearchParams, ToolKind, ToolRegistry, add,
    extract_multiple, extract_webpage, google_search, parse_args,
};

const INSTRUCTIONS: &str = "Use google_search to find pages, then extract_webpage_content to read one page or \
                            extract_multiple_webpages to compare up to 5 pages.";

/// The main MCP server handler for gsearch.
#[derive(Clone)]
pub struct GoogleSearchServer {
    registry: Arc<ToolRegistry>,
    search: Arc<dyn SearchService>,
    extractor: Arc<dyn ContentExtractor>,
}

impl GoogleSearchServer {
    /// Create a new server handler.
    pub fn new(
        registry: Arc<ToolRegistry>, search: Arc<dyn SearchService>, extractor: Arc<dyn ContentExtractor>,
    ) -> Self {
        Self { registry, search, extractor }
    }

    /// Route a tool call by name.
    ///
    /// Unknown names are protocol errors. Arguments that do not fit the tool's
    /// parameter struct become an `INVALID_ARGUMENTS` error result; every other
    /// outcome is the adapter's result.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> Result<CallToolResult, McpError> {
        let kind = self.registry.resolve(name)?;
        tracing::debug!(tool = kind.name(), "dispatching tool call");

        match self.run(kind, arguments).await {
            Ok(result) => Ok(result),
            Err(err) => {
                tracing::warn!(tool = kind.name(), "rejected tool call: {}", err);
                err.into_tool_result()
            }
        }
    }

    async fn run(&self, kind: ToolKind, arguments: Option<JsonObject>) -> Result<CallToolResult, DispatchError> {
        let result = match kind {
            ToolKind::Add => add::add_impl(parse_args::<AddParams>(kind, arguments)?),
            ToolKind::GoogleSearch => {
                let params = parse_args::<GoogleSearchParams>(kind, arguments)?;
                google_search::search_impl(self.search.as_ref(), &params).await
            }
            ToolKind::ExtractWebpageContent => {
                let params = parse_args::<ExtractWebpageParams>(kind, arguments)?;
                extract_webpage::extract_impl(self.extractor.as_ref(), &params).await
            }
            ToolKind::ExtractMultipleWebpages => {
                let params = parse_args::<ExtractMultipleParams>(kind, arguments)?;
                extract_multiple::batch_extract_impl(self.extractor.as_ref(), &params).await
            }
        };

        Ok(result)
    }
}

impl ServerHandler for GoogleSearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "google-search-engine".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(INSTRUCTIONS.into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult { meta: None, tools: self.registry.tools().to_vec(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(&request.name, request.arguments).await
    }
}
