//! Hand-written test double for [`SearchBackend`]
//!
//! Lets code that depends on search (like the HTTP listener) be tested
//! without a provider. Responses come from a closure so each test decides
//! what a term maps to, and every term received is recorded.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::SearchBackend;
use crate::error::Result;
use crate::types::SearchResults;

type Responder = dyn Fn(&str) -> Result<SearchResults> + Send + Sync;

/// A [`SearchBackend`] that answers from a closure
#[derive(Clone)]
pub struct MockSearchBackend {
    responder: Arc<Responder>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSearchBackend {
    /// Answer every search with `responder(term)`
    ///
    /// The term is passed through untouched; the mock does no trimming or
    /// validation of its own.
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<SearchResults> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            calls: Arc::default(),
        }
    }

    /// Answer every search with a copy of `results`
    pub fn returning(results: SearchResults) -> Self {
        Self::new(move |_| Ok(results.clone()))
    }

    /// Terms received so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for MockSearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSearchBackend")
            .field("calls", &self.calls())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, term: &str) -> Result<SearchResults> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(term.to_string());
        }
        (self.responder)(term)
    }
}
