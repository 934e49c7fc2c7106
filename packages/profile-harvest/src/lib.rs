//! Poll-Driven Profile Listing Harvester
//!
//! Harvests profile listings from card-based people pages: one pipeline
//! walks a company "People" page (infinite scroll), the other a people
//! "Search results" page (pagination). Both poll the page on a throttled
//! timer, trigger more content until the visible set is complete, map each
//! card to a flat ordered record, and flush the accumulated CSV or JSON
//! text to a sink exactly once.
//!
//! # Design Philosophy
//!
//! - The page is an external, asynchronously mutating collaborator - every
//!   decision re-queries it fresh through the [`PageSource`] capability
//!   trait, and card handles are never retained across decisions.
//! - Extraction and progress detection are pure functions over that
//!   capability, not objects; all run state lives in one explicit struct
//!   owned by the loop.
//! - Library handles mechanics; delivery (clipboard, log, file) lives
//!   behind the [`Sink`] boundary.
//!
//! # Usage
//!
//! ```rust,ignore
//! use profile_harvest::{run_company_people, CompanyPeopleConfig, LogSink};
//!
//! let config = CompanyPeopleConfig::new();
//! let outcome = run_company_people(&page, &LogSink, &config).await?;
//! println!("harvested {} profiles", outcome.records);
//! ```
//!
//! # Modules
//!
//! - [`page`] - the `PageSource` capability trait and card handles
//! - [`selectors`] - the fixed selector contract for both page layouts
//! - [`record`] - the ordered record type and subtitle splitting
//! - [`extractor`] - card-to-record mappers
//! - [`detector`] - progress detection (extract now, or load more?)
//! - [`pagination`] - pagination queries and the page-dedup cursor
//! - [`runner`] - the tick-throttled poll loops
//! - [`sink`] - the delivery boundary and payload rendering
//! - [`testing`] - fixture page source and recording sink

pub mod config;
pub mod detector;
pub mod error;
pub mod extractor;
pub mod page;
pub mod pagination;
pub mod record;
pub mod runner;
pub mod selectors;
pub mod sink;
pub mod testing;

// Re-export core types at crate root
pub use config::{CompanyPeopleConfig, MissingFieldPolicy, PollConfig, SearchResultsConfig};
pub use detector::{
    company_progress, read_expected_total, search_is_loading, search_needs_more, ProgressState,
};
pub use error::{ExtractError, HarvestError, PageError, Result};
pub use extractor::{extract_company_card, extract_search_card};
pub use page::{CardHandle, PageSource};
pub use pagination::PaginationCursor;
pub use record::{split_job_company, Record};
pub use runner::{run_company_people, run_search_results, HarvestOutcome, Phase};
pub use selectors::{CompanySelectors, SearchSelectors};
pub use sink::{render, render_csv, LogSink, OutputFormat, Sink};
