//! Core turn loop implementation.

use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient, OpenAiClient};
use crate::tools::ToolRegistry;

use super::prompt::build_system_prompt;

/// Phases of a turn. A plain loop over this tag replaces the conditional
/// graph a framework would supply.
enum Phase {
    LlmCall,
    ToolDispatch,
    Done,
}

/// Result of one complete turn.
#[derive(Debug)]
pub struct TurnOutcome {
    /// Final assistant reply text.
    pub response: String,

    /// Prior memory extended with every message this turn produced: the
    /// user message, all assistant messages, and all tool messages.
    pub memory: Vec<ChatMessage>,

    /// How many times the LLM was called during this turn.
    pub llm_calls: usize,
}

/// The chat agent.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    model: String,
    max_llm_calls: usize,
}

impl Agent {
    /// Create an agent with the given configuration.
    pub fn new(config: &Config) -> Self {
        let llm = Arc::new(OpenAiClient::new(
            config.api_key.clone(),
            config.llm_base_url.clone(),
        ));

        Self {
            llm,
            tools: ToolRegistry::new(),
            model: config.default_model.clone(),
            max_llm_calls: config.max_llm_calls,
        }
    }

    /// Create an agent with a custom LLM client (useful for testing).
    pub fn with_client(llm: Arc<dyn LlmClient>, model: String, max_llm_calls: usize) -> Self {
        Self {
            llm,
            tools: ToolRegistry::new(),
            model,
            max_llm_calls,
        }
    }

    /// Run one turn: the new user message against the prior memory.
    ///
    /// The prior memory is never edited or truncated; the returned memory is
    /// a strict extension of it.
    pub async fn run_turn(
        &self,
        query: String,
        memory: Vec<ChatMessage>,
    ) -> anyhow::Result<TurnOutcome> {
        let system = ChatMessage::system(build_system_prompt(&self.tools));
        let tool_schemas = self.tools.schemas();

        // Messages produced this turn, starting with the user's.
        let mut turn: Vec<ChatMessage> = vec![ChatMessage::user(query)];
        let mut llm_calls = 0usize;
        let mut phase = Phase::LlmCall;

        loop {
            match phase {
                Phase::LlmCall => {
                    if llm_calls >= self.max_llm_calls {
                        anyhow::bail!(
                            "Turn aborted: maximum LLM calls ({}) reached",
                            self.max_llm_calls
                        );
                    }
                    llm_calls += 1;
                    tracing::debug!("LLM call {} of this turn", llm_calls);

                    let mut messages = Vec::with_capacity(1 + memory.len() + turn.len());
                    messages.push(system.clone());
                    messages.extend_from_slice(&memory);
                    messages.extend_from_slice(&turn);

                    let assistant = self
                        .llm
                        .chat_completion(&self.model, &messages, Some(&tool_schemas))
                        .await?;

                    let wants_tools = assistant.has_tool_calls();
                    turn.push(assistant);
                    phase = if wants_tools {
                        Phase::ToolDispatch
                    } else {
                        Phase::Done
                    };
                }

                Phase::ToolDispatch => {
                    let calls = turn
                        .last()
                        .and_then(|m| m.tool_calls.clone())
                        .unwrap_or_default();

                    // Sequential, in the order the model requested; each call
                    // yields exactly one tool message tagged with its id.
                    for call in &calls {
                        tracing::debug!(
                            "Calling tool: {} with args: {}",
                            call.function.name,
                            call.function.arguments
                        );

                        let args: Value = serde_json::from_str(&call.function.arguments)
                            .unwrap_or(Value::Null);

                        let result = match self.tools.execute(&call.function.name, args).await {
                            Ok(output) => output,
                            Err(e) => format!("Error: {}", e),
                        };

                        turn.push(ChatMessage::tool(call.id.clone(), result));
                    }

                    phase = Phase::LlmCall;
                }

                Phase::Done => {
                    let response = turn
                        .last()
                        .and_then(|m| m.content.clone())
                        .unwrap_or_else(|| "No response generated".to_string());

                    let mut extended = memory;
                    extended.extend(turn);

                    return Ok(TurnOutcome {
                        response,
                        memory: extended,
                        llm_calls,
                    });
                }
            }
        }
    }
}
