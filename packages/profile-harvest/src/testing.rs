//! Testing utilities: a scripted in-memory page source and a recording sink.
//!
//! `FixturePage` stands in for the live document so the pipelines can be
//! exercised without a browser. It models exactly the behaviors the loops
//! depend on: cards revealed by scrolling, a paginated result store, lazy
//! placeholder occlusion, the transient loading banner, and stale-handle
//! enforcement (any mutation invalidates previously resolved card handles).

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{PageError, PageResult};
use crate::page::{CardHandle, PageSource};
use crate::selectors::{CompanySelectors, SearchSelectors};
use crate::sink::{Sink, SinkError};

/// One scripted card: inner texts by locator, attributes by locator + name.
#[derive(Debug, Clone, Default)]
pub struct FixtureCard {
    texts: HashMap<String, String>,
    attrs: HashMap<(String, String), String>,
}

impl FixtureCard {
    /// Create an empty card.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text a locator resolves to.
    pub fn with_text(mut self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts.insert(selector.into(), text.into());
        self
    }

    /// Remove a locator so it resolves to nothing.
    pub fn without_text(mut self, selector: &str) -> Self {
        self.texts.remove(selector);
        self
    }

    /// Set an attribute a locator resolves to.
    pub fn with_attr(
        mut self,
        selector: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attrs.insert((selector.into(), name.into()), value.into());
        self
    }

    /// Register `href` under the profile anchor locators of both layouts.
    pub fn with_link(self, href: impl Into<String>) -> Self {
        let href = href.into();
        let company = CompanySelectors::default();
        let search = SearchSelectors::default();
        self.with_attr(company.link_anchor, "href", href.clone())
            .with_attr(search.link_anchor, "href", href)
    }

    /// Set the connection-degree badge text (company layout).
    pub fn with_badge(self, text: impl Into<String>) -> Self {
        let selectors = CompanySelectors::default();
        self.with_text(selectors.connection_badge, text)
    }

    /// Set the shared-connections text (company layout).
    pub fn with_shared(self, text: impl Into<String>) -> Self {
        let selectors = CompanySelectors::default();
        self.with_text(selectors.shared_connections, text)
    }
}

/// A company-people card with the standard locators filled in.
pub fn company_card(name: &str, subtitle: &str) -> FixtureCard {
    let selectors = CompanySelectors::default();
    FixtureCard::new()
        .with_text(selectors.name_primary, name)
        .with_text(selectors.subtitle, subtitle)
}

/// A search-result card with the standard locators filled in.
pub fn search_card(name: &str, subtitle: &str, location: &str) -> FixtureCard {
    let selectors = SearchSelectors::default();
    FixtureCard::new()
        .with_text(selectors.name, name)
        .with_text(selectors.subtitle, subtitle)
        .with_text(selectors.location, location)
}

#[derive(Debug)]
struct FixtureState {
    origin: String,
    path: String,
    card_selector: String,
    labels: HashMap<String, String>,
    // Company mode: visible cards plus a scroll-revealed backlog.
    visible: Vec<FixtureCard>,
    pending: VecDeque<FixtureCard>,
    reveal_per_scroll: usize,
    // Search mode: a page store; present iff the pagination control exists.
    pages: Option<Vec<Vec<FixtureCard>>>,
    page_index: usize,
    occluded: usize,
    loading: bool,
    generation: u64,
    scrolls: Vec<i32>,
    scrolled_to: Vec<String>,
    clicks: Vec<String>,
}

/// Scripted page source. Cloning shares the underlying state, so a test can
/// keep a handle for assertions while a run owns another.
#[derive(Debug, Clone)]
pub struct FixturePage {
    state: Arc<RwLock<FixtureState>>,
    search: SearchSelectors,
}

impl FixturePage {
    /// Create a page at `origin` + `path` with no content.
    pub fn new(origin: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(FixtureState {
                origin: origin.into(),
                path: path.into(),
                card_selector: String::new(),
                labels: HashMap::new(),
                visible: Vec::new(),
                pending: VecDeque::new(),
                reveal_per_scroll: 0,
                pages: None,
                page_index: 0,
                occluded: 0,
                loading: false,
                generation: 0,
                scrolls: Vec::new(),
                scrolled_to: Vec::new(),
                clicks: Vec::new(),
            })),
            search: SearchSelectors::default(),
        }
    }

    /// Set the selector card queries are answered for.
    pub fn with_card_selector(self, selector: &str) -> Self {
        self.state.write().unwrap().card_selector = selector.to_string();
        self
    }

    /// Set the cards visible right now (company mode).
    pub fn with_visible_cards(self, cards: Vec<FixtureCard>) -> Self {
        self.state.write().unwrap().visible = cards;
        self
    }

    /// Queue cards that scrolling reveals, `reveal_per_scroll` at a time.
    pub fn with_pending_cards(self, cards: Vec<FixtureCard>, reveal_per_scroll: usize) -> Self {
        {
            let mut state = self.state.write().unwrap();
            state.pending = cards.into();
            state.reveal_per_scroll = reveal_per_scroll;
        }
        self
    }

    /// Install a paginated result store (search mode). The pagination
    /// control exists, the next button disables on the last page, and a
    /// click on it advances the store.
    pub fn with_search_pages(self, pages: Vec<Vec<FixtureCard>>) -> Self {
        self.state.write().unwrap().pages = Some(pages);
        self
    }

    /// Set the text of a document-level label, e.g. the results counter.
    pub fn with_label(self, selector: &str, text: &str) -> Self {
        self.state
            .write()
            .unwrap()
            .labels
            .insert(selector.to_string(), text.to_string());
        self
    }

    /// Set how many lazy-load placeholders still occupy list slots.
    /// Any scroll action settles them.
    pub fn with_occluded(self, count: usize) -> Self {
        self.state.write().unwrap().occluded = count;
        self
    }

    /// Set the loading banner state.
    pub fn with_loading(self, loading: bool) -> Self {
        self.state.write().unwrap().loading = loading;
        self
    }

    /// Flip the loading banner mid-run.
    pub fn set_loading(&self, loading: bool) {
        self.state.write().unwrap().loading = loading;
    }

    /// Number of viewport scrolls performed so far.
    pub fn scroll_count(&self) -> usize {
        self.state.read().unwrap().scrolls.len()
    }

    /// Number of scroll-into-view calls performed so far.
    pub fn scroll_into_view_count(&self) -> usize {
        self.state.read().unwrap().scrolled_to.len()
    }

    /// Number of clicks performed so far.
    pub fn click_count(&self) -> usize {
        self.state.read().unwrap().clicks.len()
    }

    /// Selectors clicked, in order.
    pub fn clicks(&self) -> Vec<String> {
        self.state.read().unwrap().clicks.clone()
    }

    /// Current page generation (bumps on every content mutation).
    pub fn generation(&self) -> u64 {
        self.state.read().unwrap().generation
    }
}

impl FixtureState {
    fn current_cards(&self) -> &[FixtureCard] {
        match (&self.pages, self.page_index) {
            (Some(pages), index) => pages.get(index).map(Vec::as_slice).unwrap_or(&[]),
            (None, _) => &self.visible,
        }
    }

    fn card(&self, handle: &CardHandle) -> PageResult<&FixtureCard> {
        if handle.generation() != self.generation {
            return Err(PageError::StaleCard {
                held: handle.generation(),
                current: self.generation,
            });
        }
        self.current_cards()
            .get(handle.index())
            .ok_or(PageError::StaleCard {
                held: handle.generation(),
                current: self.generation,
            })
    }

    fn settle_occlusion(&mut self) {
        self.occluded = 0;
    }
}

#[async_trait]
impl PageSource for FixturePage {
    async fn origin(&self) -> PageResult<String> {
        Ok(self.state.read().unwrap().origin.clone())
    }

    async fn path(&self) -> PageResult<String> {
        Ok(self.state.read().unwrap().path.clone())
    }

    async fn text(&self, selector: &str) -> PageResult<Option<String>> {
        Ok(self.state.read().unwrap().labels.get(selector).cloned())
    }

    async fn attr(&self, selector: &str, name: &str) -> PageResult<Option<String>> {
        let state = self.state.read().unwrap();
        if selector == self.search.page_indicator_selected
            && name == self.search.page_number_attr
            && state.pages.is_some()
        {
            return Ok(Some((state.page_index + 1).to_string()));
        }
        Ok(None)
    }

    async fn count(&self, selector: &str) -> PageResult<usize> {
        let state = self.state.read().unwrap();
        if selector == state.card_selector {
            return Ok(state.current_cards().len());
        }
        if selector == self.search.occlusion_hint {
            return Ok(state.occluded);
        }
        if selector == self.search.pagination {
            return Ok(usize::from(state.pages.is_some()));
        }
        if selector == self.search.loading_indicator {
            return Ok(usize::from(state.loading));
        }
        Ok(usize::from(state.labels.contains_key(selector)))
    }

    async fn has_class(&self, selector: &str, class: &str) -> PageResult<Option<bool>> {
        let state = self.state.read().unwrap();
        if selector == self.search.next_button {
            return Ok(state.pages.as_ref().map(|pages| {
                // The next button is disabled on the last page.
                class == self.search.next_disabled_class && state.page_index + 1 >= pages.len()
            }));
        }
        Ok(None)
    }

    async fn cards(&self, selector: &str) -> PageResult<Vec<CardHandle>> {
        let state = self.state.read().unwrap();
        if selector != state.card_selector {
            return Ok(Vec::new());
        }
        Ok((0..state.current_cards().len())
            .map(|index| CardHandle::new(index, state.generation))
            .collect())
    }

    async fn card_text(&self, card: &CardHandle, selector: &str) -> PageResult<Option<String>> {
        let state = self.state.read().unwrap();
        Ok(state.card(card)?.texts.get(selector).cloned())
    }

    async fn card_attr(
        &self,
        card: &CardHandle,
        selector: &str,
        name: &str,
    ) -> PageResult<Option<String>> {
        let state = self.state.read().unwrap();
        Ok(state
            .card(card)?
            .attrs
            .get(&(selector.to_string(), name.to_string()))
            .cloned())
    }

    async fn scroll_by(&self, delta_y: i32) -> PageResult<()> {
        let mut state = self.state.write().unwrap();
        state.scrolls.push(delta_y);
        state.settle_occlusion();
        let reveal = state.reveal_per_scroll.min(state.pending.len());
        if reveal > 0 {
            for _ in 0..reveal {
                if let Some(card) = state.pending.pop_front() {
                    state.visible.push(card);
                }
            }
            state.generation += 1;
        }
        Ok(())
    }

    async fn scroll_into_view(&self, selector: &str) -> PageResult<()> {
        let mut state = self.state.write().unwrap();
        state.scrolled_to.push(selector.to_string());
        state.settle_occlusion();
        Ok(())
    }

    async fn click(&self, selector: &str) -> PageResult<bool> {
        let mut state = self.state.write().unwrap();
        state.clicks.push(selector.to_string());
        if selector == self.search.next_button {
            let page_count = match &state.pages {
                Some(pages) => pages.len(),
                None => return Ok(false),
            };
            if state.page_index + 1 < page_count {
                state.page_index += 1;
                state.generation += 1;
            }
            return Ok(true);
        }
        Ok(false)
    }
}

/// A sink that records every delivery for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    deliveries: Arc<RwLock<Vec<String>>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads delivered so far, in order.
    pub fn deliveries(&self) -> Vec<String> {
        self.deliveries.read().unwrap().clone()
    }

    /// Number of deliveries so far.
    pub fn delivery_count(&self) -> usize {
        self.deliveries.read().unwrap().len()
    }
}

#[async_trait]
impl Sink for RecordingSink {
    async fn deliver(&self, payload: &str) -> Result<(), SinkError> {
        self.deliveries.write().unwrap().push(payload.to_string());
        Ok(())
    }
}
