//! In-memory [`SearchClient`] used by tests across the crate.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::{SearchAnswer, SearchClient, SearchQuery, UpstreamFailure};

enum Behaviour {
    Answer(SearchAnswer),
    Echo,
    Fail(UpstreamFailure),
    Panic,
}

/// Scripted search client that records every query it receives.
pub(crate) struct StubSearchClient {
    behaviour: Behaviour,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<SearchQuery>>,
}

impl StubSearchClient {
    fn with_behaviour(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the given content and citations.
    pub fn answering(content: &str, citations: &[&str]) -> Self {
        Self::with_behaviour(Behaviour::Answer(SearchAnswer {
            content: content.to_string(),
            citations: citations.iter().map(|c| c.to_string()).collect(),
        }))
    }

    /// Answer with the query text itself as content.
    pub fn echo() -> Self {
        Self::with_behaviour(Behaviour::Echo)
    }

    /// Always fail with the given failure.
    pub fn failing(failure: UpstreamFailure) -> Self {
        Self::with_behaviour(Behaviour::Fail(failure))
    }

    /// Panic inside the call.
    pub fn panicking() -> Self {
        Self::with_behaviour(Behaviour::Panic)
    }

    /// Sleep before answering this particular query.
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for StubSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchAnswer, UpstreamFailure> {
        self.calls.lock().unwrap().push(query.clone());

        if let Some(delay) = self.delays.get(&query.query) {
            tokio::time::sleep(*delay).await;
        }

        match &self.behaviour {
            Behaviour::Answer(answer) => Ok(answer.clone()),
            Behaviour::Echo => Ok(SearchAnswer {
                content: query.query.clone(),
                citations: Vec::new(),
            }),
            Behaviour::Fail(failure) => Err(failure.clone()),
            Behaviour::Panic => panic!("stub search client panicked"),
        }
    }
}
