//! End-to-end turn loop tests against a scripted LLM client.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use toolchat::agent::Agent;
use toolchat::llm::{ChatMessage, FunctionCall, LlmClient, Role, ToolCall};

/// LLM stand-in that replays a fixed script of assistant messages and
/// records every request it receives.
struct ScriptedLlm {
    script: Mutex<VecDeque<ChatMessage>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedLlm {
    fn new(script: Vec<ChatMessage>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat_completion(
        &self,
        _model: &str,
        messages: &[ChatMessage],
        _tools: Option<&[Value]>,
    ) -> anyhow::Result<ChatMessage> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }
}

fn assistant_with_calls(calls: Vec<(&str, &str, Value)>) -> ChatMessage {
    ChatMessage {
        role: Role::Assistant,
        content: None,
        tool_calls: Some(
            calls
                .into_iter()
                .map(|(id, name, args)| ToolCall {
                    id: id.to_string(),
                    call_type: "function".to_string(),
                    function: FunctionCall {
                        name: name.to_string(),
                        arguments: args.to_string(),
                    },
                })
                .collect(),
        ),
        tool_call_id: None,
    }
}

fn agent(llm: Arc<ScriptedLlm>) -> Agent {
    Agent::with_client(llm, "test-model".to_string(), 10)
}

#[tokio::test]
async fn plain_turn_extends_memory_by_two() {
    let llm = ScriptedLlm::new(vec![ChatMessage::assistant("Hi there!")]);
    let prior = vec![
        ChatMessage::user("earlier question"),
        ChatMessage::assistant("earlier answer"),
    ];

    let outcome = agent(llm.clone())
        .run_turn("hello".to_string(), prior.clone())
        .await
        .unwrap();

    assert_eq!(outcome.response, "Hi there!");
    assert_eq!(outcome.llm_calls, 1);

    // Strict extension: prior elements unchanged, in order, then the turn's.
    assert_eq!(outcome.memory.len(), prior.len() + 2);
    assert_eq!(&outcome.memory[..prior.len()], &prior[..]);
    assert_eq!(outcome.memory[prior.len()], ChatMessage::user("hello"));
    assert_eq!(outcome.memory[prior.len() + 1].role, Role::Assistant);
}

#[tokio::test]
async fn llm_sees_system_prompt_then_memory_then_turn() {
    let llm = ScriptedLlm::new(vec![ChatMessage::assistant("ok")]);
    let prior = vec![ChatMessage::user("first"), ChatMessage::assistant("second")];

    agent(llm.clone())
        .run_turn("third".to_string(), prior.clone())
        .await
        .unwrap();

    let requests = llm.requests();
    assert_eq!(requests.len(), 1);
    let seen = &requests[0];
    assert_eq!(seen[0].role, Role::System);
    assert_eq!(&seen[1..3], &prior[..]);
    assert_eq!(seen[3], ChatMessage::user("third"));
}

#[tokio::test]
async fn add_scenario_produces_expected_memory_shape() {
    let llm = ScriptedLlm::new(vec![
        assistant_with_calls(vec![(
            "call_1",
            "add",
            serde_json::json!({"a": 50, "b": 50}),
        )]),
        ChatMessage::assistant("50 + 50 = 100"),
    ]);

    let outcome = agent(llm)
        .run_turn("add 50 and 50".to_string(), vec![])
        .await
        .unwrap();

    assert!(outcome.response.contains("100"));
    assert_eq!(outcome.llm_calls, 2);

    assert_eq!(outcome.memory.len(), 4);
    assert_eq!(outcome.memory[0], ChatMessage::user("add 50 and 50"));
    assert!(outcome.memory[1].has_tool_calls());
    assert_eq!(outcome.memory[2].role, Role::Tool);
    assert_eq!(outcome.memory[2].content.as_deref(), Some("100"));
    assert_eq!(outcome.memory[2].tool_call_id.as_deref(), Some("call_1"));
    assert_eq!(outcome.memory[3].content.as_deref(), Some("50 + 50 = 100"));
}

#[tokio::test]
async fn tool_messages_match_calls_pairwise_in_order() {
    let llm = ScriptedLlm::new(vec![
        assistant_with_calls(vec![
            ("call_a", "multiply", serde_json::json!({"a": 6, "b": 7})),
            ("call_b", "divide", serde_json::json!({"a": 1, "b": 0})),
            ("call_c", "subtract", serde_json::json!({"a": 10, "b": 4})),
        ]),
        ChatMessage::assistant("done"),
    ]);

    let outcome = agent(llm)
        .run_turn("do some math".to_string(), vec![])
        .await
        .unwrap();

    let tools: Vec<&ChatMessage> = outcome
        .memory
        .iter()
        .filter(|m| m.role == Role::Tool)
        .collect();

    assert_eq!(tools.len(), 3);
    assert_eq!(tools[0].tool_call_id.as_deref(), Some("call_a"));
    assert_eq!(tools[0].content.as_deref(), Some("42"));
    assert_eq!(tools[1].tool_call_id.as_deref(), Some("call_b"));
    assert!(tools[1].content.as_deref().unwrap().contains("division by zero"));
    assert!(tools[1].content.as_deref().unwrap().starts_with("Error:"));
    assert_eq!(tools[2].tool_call_id.as_deref(), Some("call_c"));
    assert_eq!(tools[2].content.as_deref(), Some("6"));
}

#[tokio::test]
async fn unknown_tool_becomes_readable_error_content() {
    let llm = ScriptedLlm::new(vec![
        assistant_with_calls(vec![("call_x", "teleport", serde_json::json!({}))]),
        ChatMessage::assistant("I cannot do that."),
    ]);

    let outcome = agent(llm)
        .run_turn("teleport me".to_string(), vec![])
        .await
        .unwrap();

    let tool_msg = outcome
        .memory
        .iter()
        .find(|m| m.role == Role::Tool)
        .unwrap();
    assert!(tool_msg.content.as_deref().unwrap().contains("Unknown tool"));
    assert_eq!(outcome.response, "I cannot do that.");
}

#[tokio::test]
async fn llm_call_cap_aborts_a_looping_turn() {
    // Every response requests another tool call; the cap must stop the loop.
    let looping: Vec<ChatMessage> = (0..20)
        .map(|_| {
            assistant_with_calls(vec![(
                "call_again",
                "add",
                serde_json::json!({"a": 1, "b": 1}),
            )])
        })
        .collect();
    let llm = ScriptedLlm::new(looping);

    let err = Agent::with_client(llm.clone(), "test-model".to_string(), 3)
        .run_turn("loop forever".to_string(), vec![])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("maximum LLM calls"));
    assert_eq!(llm.requests().len(), 3);
}

#[tokio::test]
async fn empty_assistant_content_yields_placeholder_response() {
    let llm = ScriptedLlm::new(vec![ChatMessage {
        role: Role::Assistant,
        content: None,
        tool_calls: None,
        tool_call_id: None,
    }]);

    let outcome = agent(llm)
        .run_turn("hello".to_string(), vec![])
        .await
        .unwrap();

    assert_eq!(outcome.response, "No response generated");
}
