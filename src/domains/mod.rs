//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: tool registry, argument validation and dispatch
//! - **search**: the upstream web search client the `search` tool calls

pub mod search;
pub mod tools;
