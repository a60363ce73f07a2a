//! Structured errors for the gsearch server.
//!
//! Only an unknown tool name is a protocol error. Arguments that do not fit a
//! tool's parameter struct come back as an `isError` tool result whose text
//! starts with `INVALID_ARGUMENTS`, so clients can tell them apart from the
//! failures an adapter reports.

use rmcp::model::{CallToolResult, ErrorCode, ErrorData as McpError};
use serde_json::json;

use crate::tools::error_result;

/// Failures raised while routing a call, before any adapter runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// No tool is registered under the requested name.
    #[error("tool not found: {0}")]
    UnknownTool(String),

    /// Arguments did not match the tool's input schema.
    #[error("INVALID_ARGUMENTS: {tool}: {reason}")]
    InvalidArguments { tool: &'static str, reason: String },

    /// A parameter struct produced a schema that is not a JSON object.
    #[error("tool {0} has a non-object input schema")]
    InvalidSchema(&'static str),
}

impl DispatchError {
    /// Argument errors become `isError` results; everything else stays a
    /// protocol error.
    pub fn into_tool_result(self) -> Result<CallToolResult, McpError> {
        match self {
            err @ DispatchError::InvalidArguments { .. } => Ok(error_result(err.to_string())),
            err => Err(err.into()),
        }
    }
}

impl From<DispatchError> for McpError {
    fn from(err: DispatchError) -> Self {
        let (code, data) = match &err {
            DispatchError::UnknownTool(name) => (ErrorCode::INVALID_PARAMS, json!({ "tool": name })),
            DispatchError::InvalidArguments { tool, reason } => {
                (ErrorCode::INVALID_PARAMS, json!({ "tool": tool, "reason": reason }))
            }
            DispatchError::InvalidSchema(tool) => (ErrorCode::INTERNAL_ERROR, json!({ "tool": tool })),
        };

        McpError { code, message: err.to_string().into(), data: Some(data) }
    }
}
