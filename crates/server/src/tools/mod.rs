//! MCP tool implementations.
//!
//! This module contains all tools exposed by the gsearch server and the
//! registry that describes them to clients.

pub mod add;
pub mod extract_multiple;
pub mod extract_webpage;
pub mod google_search;

#[cfg(test)]
pub(crate) mod fakes;

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DispatchError;

pub use add::AddParams;
pub use extract_multiple::ExtractMultipleParams;
pub use extract_webpage::ExtractWebpageParams;
pub use google_search::GoogleSearchParams;

/// Every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Add,
    GoogleSearch,
    ExtractWebpageContent,
    ExtractMultipleWebpages,
}

impl ToolKind {
    /// Tools in the order they are listed to clients.
    pub const ALL: [ToolKind; 4] =
        [ToolKind::Add, ToolKind::GoogleSearch, ToolKind::ExtractWebpageContent, ToolKind::ExtractMultipleWebpages];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Add => "add",
            ToolKind::GoogleSearch => "google_search",
            ToolKind::ExtractWebpageContent => "extract_webpage_content",
            ToolKind::ExtractMultipleWebpages => "extract_multiple_webpages",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::Add => "Add two numbers together.",
            ToolKind::GoogleSearch => {
                "Search Google and return relevant results from the web. This tool finds web pages, articles, and \
                 information on specific topics using Google's search engine. Results include titles, snippets, and \
                 URLs that can be analyzed further using extract_webpage_content."
            }
            ToolKind::ExtractWebpageContent => {
                "Extract and analyze content from a webpage, converting it to readable text. This tool fetches the \
                 main content while removing ads, navigation elements, and other clutter. Use it to get detailed \
                 information from specific pages found via google_search. Works with most common webpage formats \
                 including articles, blogs, and documentation."
            }
            ToolKind::ExtractMultipleWebpages => {
                "Extract and analyze content from multiple webpages in a single request. This tool is ideal for \
                 comparing information across different sources or gathering comprehensive information on a topic. \
                 Limited to 5 URLs per request to maintain performance."
            }
        }
    }

    /// JSON Schema of the tool's parameter struct, with enum subschemas inlined.
    pub fn input_schema(self) -> Result<Arc<JsonObject>, DispatchError> {
        let schema = match self {
            ToolKind::Add => schema_value::<AddParams>(),
            ToolKind::GoogleSearch => schema_value::<GoogleSearchParams>(),
            ToolKind::ExtractWebpageContent => schema_value::<ExtractWebpageParams>(),
            ToolKind::ExtractMultipleWebpages => schema_value::<ExtractMultipleParams>(),
        };

        match schema {
            Value::Object(object) => Ok(Arc::new(object)),
            _ => Err(DispatchError::InvalidSchema(self.name())),
        }
    }

    pub fn descriptor(self) -> Result<Tool, DispatchError> {
        Ok(Tool::new(self.name(), self.description(), self.input_schema()?))
    }
}

fn schema_value<T: JsonSchema>() -> Value {
    let schema = SchemaSettings::draft07()
        .with(|settings| {
            settings.inline_subschemas = true;
            settings.meta_schema = None;
        })
        .into_generator()
        .into_root_schema_for::<T>();
    schema.to_value()
}

/// Immutable set of tool descriptors, built once at startup.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    pub fn new() -> Result<Self, DispatchError> {
        let tools = ToolKind::ALL.into_iter().map(ToolKind::descriptor).collect::<Result<_, _>>()?;
        Ok(Self { tools })
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Look up a registered tool by name.
    pub fn resolve(&self, name: &str) -> Result<ToolKind, DispatchError> {
        ToolKind::from_name(name)
            .filter(|kind| self.tools.iter().any(|tool| tool.name == kind.name()))
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))
    }
}

/// Deserialize raw call arguments into a tool's parameter struct.
///
/// A missing argument object is treated as `{}` so that required-field errors
/// name the missing field.
pub fn parse_args<T: DeserializeOwned>(tool: ToolKind, arguments: Option<JsonObject>) -> Result<T, DispatchError> {
    let value = Value::Object(arguments.unwrap_or_default());
    serde_json::from_value(value).map_err(|e| DispatchError::InvalidArguments { tool: tool.name(), reason: e.to_string() })
}

pub(crate) fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

pub(crate) fn error_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(text.into())])
}
