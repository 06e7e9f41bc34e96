//! Search Common - Shared utilities for search services
//!
//! - **Initialization**: [`init_tracing`] for consistent log setup across binaries
//!
//! # Example
//!
//! ```rust,ignore
//! search_common::init_tracing("web_search")?;
//! tracing::info!("Starting");
//! ```

pub mod init;

pub use init::{init_tracing, log_filter};
