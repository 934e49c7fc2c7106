//! The poll loops driving both pipelines.
//!
//! One logical task per run: a fixed-period timer tick, a decision every
//! Nth tick, and an explicit run-state struct carrying the accumulator and
//! cursor (no globals). The loop is unbounded - there is no attempt ceiling
//! and no timeout; a page that never progresses keeps producing periodic
//! warnings until the caller drops the future.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::{CompanyPeopleConfig, MissingFieldPolicy, SearchResultsConfig};
use crate::detector::{
    company_progress, read_expected_total, search_is_loading, search_needs_more,
};
use crate::error::{ExtractError, HarvestError, Result};
use crate::extractor::{extract_company_card, extract_search_card};
use crate::page::{CardHandle, PageSource};
use crate::pagination::{
    bring_pagination_into_view, can_go_next, current_page, go_next, PaginationCursor,
};
use crate::record::Record;
use crate::sink::{render, Sink};

static COMPANY_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/company/.*/people/").expect("hard-coded pattern compiles"));
static SEARCH_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/search/results/people/").expect("hard-coded pattern compiles"));

/// Where a run currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for content: scrolling or letting the page settle
    Scrolling,
    /// Mapping the currently visible cards to records
    Extracting,
    /// A next-page advance has been triggered (search variant only)
    Advancing,
    /// Terminal: the payload has been flushed
    Done,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct HarvestOutcome {
    /// Records delivered to the sink
    pub records: usize,
    /// Result pages extracted (1 for the company variant)
    pub pages_processed: u32,
    /// Target read from the page's counter label at start
    pub expected_total: usize,
}

impl HarvestOutcome {
    /// Whether the harvested count reached the page's own expectation.
    pub fn is_complete(&self) -> bool {
        self.records >= self.expected_total
    }
}

/// Decision throttle: `ready` is true once per `every` ticks.
struct TickThrottle {
    every: u32,
    tick: u32,
}

impl TickThrottle {
    fn new(every: u32) -> Self {
        Self { every, tick: 0 }
    }

    fn ready(&mut self) -> bool {
        self.tick += 1;
        if self.tick > self.every {
            self.tick = 0;
            true
        } else {
            false
        }
    }
}

/// Warns periodically when consecutive decisions observe no page progress.
struct StuckMonitor {
    warn_after: u32,
    stalled: u32,
    last: Option<u64>,
}

impl StuckMonitor {
    fn new(warn_after: u32) -> Self {
        Self {
            warn_after,
            stalled: 0,
            last: None,
        }
    }

    fn observe(&mut self, signature: u64) {
        if self.last == Some(signature) {
            self.stalled += 1;
            if self.warn_after > 0 && self.stalled % self.warn_after == 0 {
                warn!(
                    stalled_decisions = self.stalled,
                    "no page progress, continuing to poll"
                );
            }
        } else {
            self.last = Some(signature);
            self.stalled = 0;
        }
    }
}

/// Verify the current URL path before any loop starts.
async fn ensure_path<S: PageSource>(source: &S, pattern: &Regex) -> Result<()> {
    let path = source.path().await?;
    if pattern.is_match(&path) {
        Ok(())
    } else {
        Err(HarvestError::Precondition {
            expected: pattern.as_str().to_string(),
            found: path,
        })
    }
}

/// Harvest a company "People" page: scroll until the card count reaches the
/// employee total, extract every card, flush once, stop.
pub async fn run_company_people<S, K>(
    source: &S,
    sink: &K,
    config: &CompanyPeopleConfig,
) -> Result<HarvestOutcome>
where
    S: PageSource,
    K: Sink,
{
    ensure_path(source, &COMPANY_PATH).await?;
    let expected_total =
        read_expected_total(source, &config.selectors.employee_count).await?;
    info!(expected_total, "starting company people harvest");

    let mut interval = tokio::time::interval(config.poll.tick);
    let mut throttle = TickThrottle::new(config.poll.decide_every);
    let mut stuck = StuckMonitor::new(config.poll.stuck_warn_after);
    let mut phase = Phase::Scrolling;

    loop {
        interval.tick().await;
        if !throttle.ready() {
            continue;
        }

        let progress = company_progress(source, &config.selectors, expected_total).await?;
        if progress.needs_more_content {
            debug!(
                ?phase,
                current = progress.current_count,
                expected = progress.expected_total,
                delta = config.scroll_step,
                "scrolling for more cards"
            );
            source.scroll_by(config.scroll_step).await?;
            stuck.observe(progress.current_count as u64);
            continue;
        }

        phase = Phase::Extracting;
        debug!(?phase, count = progress.current_count, "extracting visible cards");
        let records = extract_company_cards(source, config).await?;
        if records.len() < expected_total {
            warn!(
                found = records.len(),
                expected = expected_total,
                "extracted fewer records than the page promised"
            );
        }
        let payload = render(&records, config.output)?;
        sink.deliver(&payload)
            .await
            .map_err(HarvestError::Sink)?;
        phase = Phase::Done;
        info!(
            ?phase,
            records = records.len(),
            expected_total,
            "company people harvest complete"
        );
        return Ok(HarvestOutcome {
            records: records.len(),
            pages_processed: 1,
            expected_total,
        });
    }
}

/// Extract every currently visible company card, honoring the
/// mandatory-field policy. Handles are resolved fresh here and dropped on
/// return - never reused across a decision.
async fn extract_company_cards<S: PageSource>(
    source: &S,
    config: &CompanyPeopleConfig,
) -> Result<Vec<Record>> {
    let handles = source.cards(&config.selectors.card).await?;
    let mut records = Vec::with_capacity(handles.len());
    for (index, card) in handles.iter().enumerate() {
        match extract_company_card(source, card, &config.selectors).await {
            Ok(record) => records.push(record),
            Err(err) => skip_or_abort(config.missing_fields, index, err)?,
        }
    }
    Ok(records)
}

/// Apply the mandatory-field policy to one failed card.
/// Page-source failures always propagate regardless of policy.
fn skip_or_abort(policy: MissingFieldPolicy, index: usize, err: ExtractError) -> Result<()> {
    match (policy, &err) {
        (MissingFieldPolicy::Skip, ExtractError::MissingField { field }) => {
            warn!(card = index, field, "skipping card with missing mandatory field");
            Ok(())
        }
        _ => Err(err.into()),
    }
}

/// Run state for a search-results harvest - the accumulator and cursor live
/// here, owned by one task, never shared.
struct SearchRun {
    cursor: PaginationCursor,
    records: Vec<Record>,
    phase: Phase,
}

impl SearchRun {
    fn new() -> Self {
        Self {
            cursor: PaginationCursor::new(),
            records: Vec::new(),
            phase: Phase::Scrolling,
        }
    }

    /// One decision: wait, extract the current page, or finish.
    /// Returns true when the run is complete.
    async fn decide<S: PageSource>(
        &mut self,
        source: &S,
        config: &SearchResultsConfig,
        stuck: &mut StuckMonitor,
    ) -> Result<bool> {
        // Loading state takes precedence over every count heuristic.
        if search_is_loading(source, &config.selectors).await?
            || search_needs_more(source, &config.selectors, config.page_size).await?
        {
            self.phase = Phase::Scrolling;
            debug!(phase = ?self.phase, "results not settled, bringing pagination into view");
            bring_pagination_into_view(source, &config.selectors, config.fallback_scroll).await?;
            let count = source.count(&config.selectors.card).await? as u64;
            stuck.observe(count);
            return Ok(false);
        }

        let page = current_page(source, &config.selectors).await?;
        if self.cursor.should_process(page) {
            self.phase = Phase::Extracting;
            let page_records =
                extract_search_cards(source, config).await?;
            debug!(page, records = page_records.len(), "processed result page");
            self.records.extend(page_records);
            self.cursor.mark_processed(page);

            // Current page is fully extracted; only now may we advance.
            self.phase = Phase::Advancing;
            if !go_next(source, &config.selectors).await? {
                warn!(page, "next-page control not found after extraction");
            }
            return Ok(false);
        }

        if !can_go_next(source, &config.selectors).await? {
            self.phase = Phase::Done;
            return Ok(true);
        }

        // Already-processed page, advance still pending: keep waiting for
        // the page number to change.
        stuck.observe(u64::from(page));
        Ok(false)
    }
}

/// Harvest a people "Search results" page: extract each result page exactly
/// once, advance until the next control is exhausted, flush once, stop.
pub async fn run_search_results<S, K>(
    source: &S,
    sink: &K,
    config: &SearchResultsConfig,
) -> Result<HarvestOutcome>
where
    S: PageSource,
    K: Sink,
{
    ensure_path(source, &SEARCH_PATH).await?;
    let expected_total =
        read_expected_total(source, &config.selectors.results_total).await?;
    info!(expected_total, "starting search results harvest");

    let mut interval = tokio::time::interval(config.poll.tick);
    let mut throttle = TickThrottle::new(config.poll.decide_every);
    let mut stuck = StuckMonitor::new(config.poll.stuck_warn_after);
    let mut run = SearchRun::new();

    loop {
        interval.tick().await;
        if !throttle.ready() {
            continue;
        }

        if run.decide(source, config, &mut stuck).await? {
            let payload = render(&run.records, config.output)?;
            sink.deliver(&payload)
                .await
                .map_err(HarvestError::Sink)?;
            let pages_processed = run.cursor.last_processed().unwrap_or(0);
            info!(
                records = run.records.len(),
                expected_total,
                pages_processed,
                "search results harvest complete"
            );
            return Ok(HarvestOutcome {
                records: run.records.len(),
                pages_processed,
                expected_total,
            });
        }
    }
}

/// Extract every card on the current result page, honoring the
/// mandatory-field policy.
async fn extract_search_cards<S: PageSource>(
    source: &S,
    config: &SearchResultsConfig,
) -> Result<Vec<Record>> {
    let handles: Vec<CardHandle> = source.cards(&config.selectors.card).await?;
    let mut records = Vec::with_capacity(handles.len());
    for (index, card) in handles.iter().enumerate() {
        match extract_search_card(source, card, &config.selectors).await {
            Ok(record) => records.push(record),
            Err(err) => skip_or_abort(config.missing_fields, index, err)?,
        }
    }
    Ok(records)
}
