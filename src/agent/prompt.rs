//! System prompt for the chat agent.

use crate::tools::ToolRegistry;

/// Build the fixed system prompt, listing the available tools.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name(), t.description()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a helpful assistant that performs arithmetic, looks up weather, and summarizes uploaded files.

You have access to the following tools:
{tool_descriptions}

Use a tool whenever it can answer part of the question; do not guess at arithmetic or weather. When a tool result comes back, incorporate it into a clear final answer for the user."#,
        tool_descriptions = tool_descriptions
    )
}
