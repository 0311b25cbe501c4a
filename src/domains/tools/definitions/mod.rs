//! Tool definitions module.
//!
//! Each tool is defined in its own file and registered in `registry.rs`.

pub mod search;

pub use search::{SearchParams, SearchTool};
