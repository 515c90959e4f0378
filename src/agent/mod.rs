//! Agent module - one conversation turn, tools in a loop.
//!
//! A turn alternates between two phases:
//! 1. Call the LLM with the full history and tool schemas
//! 2. If the assistant message carries tool calls, execute them in order
//!    and feed the results back; otherwise the turn is done
//!
//! The turn's output is the final assistant text plus the extended memory
//! the client must send back on its next request.

mod prompt;
mod turn;

pub use prompt::build_system_prompt;
pub use turn::{Agent, TurnOutcome};
