//! Web Search Library
//!
//! A provider-agnostic search API backed by Google Custom Search, plus a
//! small HTTP listener that exposes it as `GET /?q=<term>`.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use web_search::{GoogleSearchBackend, SearchBackend};
//!
//! let backend = GoogleSearchBackend::new(key, engine_id);
//! let results = backend.search("mysql").await.unwrap_or_default();
//! for result in &results {
//!     println!("{} - {}", result.title, result.link);
//! }
//! ```
//!
//! Code that consumes search should take an `Arc<dyn SearchBackend>` and use
//! [`MockSearchBackend`] in its tests.
//!
//! # Configuration
//! Set `KEY` and `CX` env vars or configure in `~/.web-search/config.toml`

pub mod backends;
pub mod config;
pub mod error;
pub mod server;
pub mod types;

pub use backends::{GoogleSearchBackend, MockSearchBackend, SearchBackend};
pub use error::{Result, SearchError};
pub use types::{SearchResult, SearchResults};
