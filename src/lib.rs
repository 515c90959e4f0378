//! # toolchat
//!
//! A small chat agent server backed by a hosted chat-completion model.
//!
//! This library provides:
//! - An HTTP API for chat turns and file uploads
//! - A tool-dispatch loop (arithmetic, weather, file summaries)
//! - Client-held conversation memory round-tripped in every request
//!
//! ## Architecture
//!
//! Each request runs one "turn" of the tools-in-a-loop pattern:
//! 1. Receive the query and prior memory via the API
//! 2. Call the LLM with the full history and available tool schemas
//! 3. If the model requests tool calls, execute them and feed results back
//! 4. Repeat until the model answers without tools, then return the answer
//!    and the extended memory to the client
//!
//! The server keeps no session state; the memory array in the response is
//! the only continuation token.

pub mod api;
pub mod agent;
pub mod config;
pub mod ingest;
pub mod llm;
pub mod tools;

pub use config::Config;
