//! The `PageSource` capability trait - a read-only query surface over the
//! live document, plus the two side-effecting primitives (scroll, click)
//! the pipelines need to trigger more content.
//!
//! The document mutates asynchronously outside this library's control
//! (lazy rendering, network activity), so every query must answer from the
//! page as it is *now*. Callers never cache query results across decision
//! points, and card handles are re-resolved every time.
//!
//! Implementations: a browser bridge in production, [`FixturePage`] in tests.
//!
//! [`FixturePage`]: crate::testing::FixturePage

use async_trait::async_trait;

use crate::error::PageResult;

/// Opaque handle to one card's DOM region.
///
/// A handle is only valid for the page generation it was resolved against.
/// Using it after the page mutated yields `PageError::StaleCard`, so handles
/// must not be retained across a scroll or page-advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardHandle {
    index: usize,
    generation: u64,
}

impl CardHandle {
    /// Create a handle for the card at `index` under page `generation`.
    pub fn new(index: usize, generation: u64) -> Self {
        Self { index, generation }
    }

    /// Position of the card in document order at resolution time.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Page generation this handle was resolved against.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Read-only query-by-selector capability over the current document.
///
/// All selector parameters are CSS selector strings; the selector contract
/// itself lives in [`crate::selectors`]. Queries are cheap and safe to call
/// on every poll tick - implementations must not cache stale answers.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Origin of the current document, e.g. `https://www.example.com`.
    async fn origin(&self) -> PageResult<String>;

    /// Path portion of the current URL, e.g. `/company/acme/people/`.
    async fn path(&self) -> PageResult<String>;

    /// Inner text of the first element matching `selector`, if any.
    async fn text(&self, selector: &str) -> PageResult<Option<String>>;

    /// Attribute value of the first element matching `selector`, if any.
    async fn attr(&self, selector: &str, name: &str) -> PageResult<Option<String>>;

    /// Number of elements currently matching `selector`.
    async fn count(&self, selector: &str) -> PageResult<usize>;

    /// Whether the first element matching `selector` carries `class`.
    /// `None` when no element matches at all.
    async fn has_class(&self, selector: &str, class: &str) -> PageResult<Option<bool>>;

    /// Handles for every element matching `selector`, in document order.
    /// Valid only until the page next mutates.
    async fn cards(&self, selector: &str) -> PageResult<Vec<CardHandle>>;

    /// Inner text of the first descendant of `card` matching `selector`.
    async fn card_text(&self, card: &CardHandle, selector: &str) -> PageResult<Option<String>>;

    /// Attribute value of the first descendant of `card` matching `selector`.
    async fn card_attr(
        &self,
        card: &CardHandle,
        selector: &str,
        name: &str,
    ) -> PageResult<Option<String>>;

    /// Scroll the viewport down by `delta_y` pixels.
    async fn scroll_by(&self, delta_y: i32) -> PageResult<()>;

    /// Scroll the first element matching `selector` into view.
    /// No-op when nothing matches.
    async fn scroll_into_view(&self, selector: &str) -> PageResult<()>;

    /// Click the first element matching `selector`.
    /// Returns `false` when nothing matched.
    async fn click(&self, selector: &str) -> PageResult<bool>;
}
