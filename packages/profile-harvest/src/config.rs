//! Run configuration for the two pipelines.

use std::time::Duration;

use crate::selectors::{CompanySelectors, SearchSelectors};
use crate::sink::OutputFormat;

/// What to do when a card is missing a mandatory field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingFieldPolicy {
    /// Drop the bad card with a warning and keep going (the default)
    #[default]
    Skip,
    /// Propagate the failure, ending the whole run
    Abort,
}

/// Timing of the poll loop.
///
/// The loop ticks on a fixed-period timer and only runs its decision logic
/// every `decide_every` ticks - a debounce that gives the page time to
/// render between decisions, standing in for a "DOM settled" signal the
/// page source does not offer.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Timer period (one tick)
    pub tick: Duration,
    /// Run the decision logic once per this many ticks
    pub decide_every: u32,
    /// Warn after this many consecutive decisions without page progress
    pub stuck_warn_after: u32,
}

impl PollConfig {
    /// Poll timing for the company-people pipeline.
    pub fn company() -> Self {
        Self {
            tick: Duration::from_millis(16),
            decide_every: 32,
            stuck_warn_after: 25,
        }
    }

    /// Poll timing for the search-results pipeline - a longer debounce,
    /// since a page advance re-renders the whole result list.
    pub fn search() -> Self {
        Self {
            tick: Duration::from_millis(16),
            decide_every: 128,
            stuck_warn_after: 25,
        }
    }

    /// Set the timer period.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Set the decision throttle.
    pub fn with_decide_every(mut self, decide_every: u32) -> Self {
        self.decide_every = decide_every;
        self
    }
}

/// Configuration for a company "People" page run.
#[derive(Debug, Clone)]
pub struct CompanyPeopleConfig {
    /// Poll loop timing
    pub poll: PollConfig,
    /// Fixed viewport scroll delta per advance, in pixels
    pub scroll_step: i32,
    /// Payload rendering
    pub output: OutputFormat,
    /// Mandatory-field failure handling
    pub missing_fields: MissingFieldPolicy,
    /// Markup contract
    pub selectors: CompanySelectors,
}

impl CompanyPeopleConfig {
    /// Create a config with the standard LinkedIn selectors.
    pub fn new() -> Self {
        Self {
            poll: PollConfig::company(),
            scroll_step: 1000,
            output: OutputFormat::default(),
            missing_fields: MissingFieldPolicy::default(),
            selectors: CompanySelectors::default(),
        }
    }

    /// Set the output format.
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Set the mandatory-field policy.
    pub fn with_missing_fields(mut self, policy: MissingFieldPolicy) -> Self {
        self.missing_fields = policy;
        self
    }

    /// Set the poll timing.
    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Set the selector set.
    pub fn with_selectors(mut self, selectors: CompanySelectors) -> Self {
        self.selectors = selectors;
        self
    }
}

impl Default for CompanyPeopleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for a people "Search results" page run.
#[derive(Debug, Clone)]
pub struct SearchResultsConfig {
    /// Poll loop timing
    pub poll: PollConfig,
    /// Cards on a full result page
    pub page_size: usize,
    /// Viewport scroll used while the pagination control has not rendered
    pub fallback_scroll: i32,
    /// Payload rendering
    pub output: OutputFormat,
    /// Mandatory-field failure handling
    pub missing_fields: MissingFieldPolicy,
    /// Markup contract
    pub selectors: SearchSelectors,
}

impl SearchResultsConfig {
    /// Create a config with the standard LinkedIn selectors.
    pub fn new() -> Self {
        Self {
            poll: PollConfig::search(),
            page_size: 10,
            fallback_scroll: 500,
            output: OutputFormat::default(),
            missing_fields: MissingFieldPolicy::default(),
            selectors: SearchSelectors::default(),
        }
    }

    /// Set the output format.
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Set the mandatory-field policy.
    pub fn with_missing_fields(mut self, policy: MissingFieldPolicy) -> Self {
        self.missing_fields = policy;
        self
    }

    /// Set the poll timing.
    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Set the selector set.
    pub fn with_selectors(mut self, selectors: SearchSelectors) -> Self {
        self.selectors = selectors;
        self
    }
}

impl Default for SearchResultsConfig {
    fn default() -> Self {
        Self::new()
    }
}
