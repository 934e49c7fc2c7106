//! Typed errors for the harvest library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while driving a harvest run.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The current URL path is not the page this pipeline works on.
    /// Reported once, before the poll loop starts.
    #[error("wrong page: expected path matching `{expected}`, found `{found}`")]
    Precondition { expected: String, found: String },

    /// The expected-total counter label was missing or unparseable at start.
    #[error("could not read result counter from `{selector}`")]
    CounterUnreadable { selector: String },

    /// Card extraction failed
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    /// Page source query failed
    #[error("page error: {0}")]
    Page(#[from] PageError),

    /// Payload rendering failed
    #[error("render error: {0}")]
    Render(#[from] serde_json::Error),

    /// Sink delivery failed
    #[error("sink error: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors that can occur while mapping one card to a record.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A mandatory field's underlying element is absent
    #[error("mandatory field `{field}` not found in card")]
    MissingField { field: &'static str },

    /// Page source query failed mid-extraction
    #[error(transparent)]
    Page(#[from] PageError),
}

/// Errors surfaced by a `PageSource` implementation.
#[derive(Debug, Error)]
pub enum PageError {
    /// A card handle was used after the page mutated underneath it.
    /// Avoided by re-resolving all handles at every decision point.
    #[error("stale card handle (held generation {held}, page at {current})")]
    StaleCard { held: u64, current: u64 },

    /// Backend (browser bridge, fixture) failure
    #[error("page backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for harvest operations.
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for page source operations.
pub type PageResult<T> = std::result::Result<T, PageError>;
