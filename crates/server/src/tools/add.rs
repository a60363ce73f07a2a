//! add tool implementation.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::text_result;

/// Input parameters for the add tool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct AddParams {
    /// The first number to add
    pub a: f64,

    /// The second number to add
    pub b: f64,
}

/// Add two numbers. `Display` for `f64` already prints `3` rather than `3.0`.
pub fn add_impl(params: AddParams) -> CallToolResult {
    text_result(format!("{}", params.a + params.b))
}
