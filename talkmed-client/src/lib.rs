//! # TalkMED Client
//!
//! Search front end for the TalkMED medical content platform: courses and live sessions.
//!
//! ## Features
//!
//! - **Search API**: async client for `/v1/pc/search` behind the [`SearchProvider`] trait
//! - **Normalization**: raw responses become an immutable [`ResultSummary`]
//! - **Rendering**: plain-text listing and detail views in [`format`]
//! - **Interactive Exploration**: a command loop over one result set ([`InteractiveSession`])
//! - **Orchestration**: one search pipeline with a console adapter and an MCP adapter
//!
//! ## Quick Start
//!
//! ```no_run
//! use talkmed_client::{SearchOptions, SearchOrchestrator, TalkMedClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = SearchOrchestrator::new(TalkMedClient::new()?);
//!     let options = SearchOptions::new().with_content_type("course");
//!
//!     let result = orchestrator.perform_search_for_mcp("diabetes", &options).await;
//!     println!("{}", result.to_json_pretty());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod orchestrator;
pub mod query;
pub mod responses;
pub mod session;
pub mod summary;

// Re-export main types for convenience
pub use client::{ApiInfo, SearchProvider, TalkMedClient};
pub use config::ClientConfig;
pub use error::{Result, TalkMedError};
pub use orchestrator::{SearchOptions, SearchOrchestrator, SearchResultData, StructuredResult};
pub use query::{ContentType, SearchQuery};
pub use responses::SearchResponse;
pub use session::{Command, InteractiveSession, SessionState};
pub use summary::{Course, LiveSession, Price, PriceKind, ResultItem, ResultSummary, normalize};
