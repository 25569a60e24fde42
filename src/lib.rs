//! # Norma Search
//!
//! ## Overview
//! This library implements an interactive browser over collections of structured
//! legal-text documents, combining diacritic-insensitive free-text search with
//! facet filtering and match highlighting.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `corpus`: Document model and JSON corpus loading
//! - `normalize`: Diacritic and case folding for comparisons
//! - `merge`: Flattening selected sources into one ordered article list
//! - `query`: Facet and free-text filtering over merged articles
//! - `highlight`: Splitting display text into plain and matched segments
//! - `session`: Transient browsing state (selections, pins, copy feedback)
//! - `clipboard`: Plain-text article formatting and system clipboard access
//! - `render`: Terminal presentation of articles and search results
//! - `config`: Configuration management and settings
//! - `errors`: Centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: Corpus documents (JSON), search queries (text), facet selections
//! - **Output**: Filtered article lists with provenance and highlighted matches
//! - **Guarantee**: Accent- and case-insensitive matching, deterministic ordering
//!
//! ## Usage
//! ```rust,no_run
//! use norma_search::{corpus, SessionState};
//!
//! fn main() -> norma_search::Result<()> {
//!     let sources = corpus::load_sources(&["data/lead.json".into()])?;
//!     let mut session = SessionState::new(sources);
//!     session.toggle_source("LEAD");
//!     session.set_query("educación");
//!     let view = session.view();
//!     println!("Found {} articles", view.articles.len());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod corpus;
pub mod errors;
pub mod normalize;
pub mod merge;
pub mod query;
pub mod highlight;
pub mod session;
pub mod clipboard;
pub mod render;

// Re-exports for convenience
pub use config::Config;
pub use errors::{NormaError, Result};
pub use highlight::{highlight, Segment};
pub use merge::MergedArticle;
pub use session::{SessionState, SessionView};

// Core types used throughout the system
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an article within the loaded corpus, formed from the
/// owning source acronym and the article number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleId(String);

impl ArticleId {
    /// Build the identifier for `article_number` within `source_name`.
    pub fn new(source_name: &str, article_number: &str) -> Self {
        ArticleId(format!("{source_name}-{article_number}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(raw: &str) -> Self {
        ArticleId(raw.to_string())
    }
}

impl From<String> for ArticleId {
    fn from(raw: String) -> Self {
        ArticleId(raw)
    }
}
