//! Search backend implementations
//!
//! This module provides a trait-based abstraction for search backends.
//! Callers and their tests depend on [`SearchBackend`] only, never on the
//! transport behind it.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::SearchResults;

pub mod google;
pub mod mock;

pub use google::GoogleSearchBackend;
pub use mock::MockSearchBackend;

/// Trait for search backends
///
/// Implementations are stateless between calls and safe to share across
/// tasks behind an `Arc<dyn SearchBackend>`.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &str;

    /// Search for `term`
    ///
    /// The term is trimmed first. An empty term fails with
    /// [`SearchError::NoSearchTerm`](crate::SearchError::NoSearchTerm)
    /// without contacting the provider.
    async fn search(&self, term: &str) -> Result<SearchResults>;
}
