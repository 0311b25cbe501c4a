//! Upstream web search domain.
//!
//! The tools domain only depends on the [`SearchClient`] trait. The concrete
//! Perplexity implementation is constructed once at startup from
//! [`PerplexityConfig`](crate::core::config::PerplexityConfig) and shared
//! behind an `Arc`, so tests can swap in a stub without touching the network.

mod client;
mod error;
mod perplexity;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{RecencyFilter, SearchAnswer, SearchClient, SearchQuery};
pub use error::UpstreamFailure;
pub use perplexity::PerplexityClient;
