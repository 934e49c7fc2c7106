//! Pagination queries and the at-most-once page extraction gate
//! (search-results variant).

use tracing::debug;

use crate::error::PageResult;
use crate::page::PageSource;
use crate::selectors::SearchSelectors;

/// Tracks which result page was last extracted.
///
/// Extraction for a page is gated on the current page number differing from
/// the last processed one, so a page is extracted at most once even though
/// the loop keeps re-polling while the next page renders.
#[derive(Debug, Clone, Default)]
pub struct PaginationCursor {
    last_processed: Option<u32>,
}

impl PaginationCursor {
    /// Create a cursor that has processed nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `current` still needs extracting.
    pub fn should_process(&self, current: u32) -> bool {
        self.last_processed != Some(current)
    }

    /// Record that `page` has been extracted.
    pub fn mark_processed(&mut self, page: u32) {
        self.last_processed = Some(page);
    }

    /// The last extracted page, if any.
    pub fn last_processed(&self) -> Option<u32> {
        self.last_processed
    }
}

/// Current page number, read from the selected indicator's data attribute.
/// Defaults to 1 when no indicator is selected.
pub async fn current_page<S: PageSource>(
    source: &S,
    selectors: &SearchSelectors,
) -> PageResult<u32> {
    let page = source
        .attr(
            &selectors.page_indicator_selected,
            &selectors.page_number_attr,
        )
        .await?
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(1);
    Ok(page)
}

/// Whether a further page can be advanced to.
/// False when the next control is absent or carries its disabled class.
pub async fn can_go_next<S: PageSource>(
    source: &S,
    selectors: &SearchSelectors,
) -> PageResult<bool> {
    Ok(matches!(
        source
            .has_class(&selectors.next_button, &selectors.next_disabled_class)
            .await?,
        Some(false)
    ))
}

/// Click the next-page control. Returns whether a control was found.
pub async fn go_next<S: PageSource>(source: &S, selectors: &SearchSelectors) -> PageResult<bool> {
    source.click(&selectors.next_button).await
}

/// Bring the pagination control into view so lazily-rendered results load.
///
/// When the control has not rendered yet, falls back to a fixed viewport
/// scroll to nudge rendering along.
pub async fn bring_pagination_into_view<S: PageSource>(
    source: &S,
    selectors: &SearchSelectors,
    fallback_scroll: i32,
) -> PageResult<()> {
    if source.count(&selectors.pagination).await? > 0 {
        source.scroll_into_view(&selectors.pagination).await?;
    } else {
        debug!(
            delta = fallback_scroll,
            "pagination not rendered yet, scrolling viewport"
        );
        source.scroll_by(fallback_scroll).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{search_card, FixturePage};

    #[test]
    fn cursor_processes_each_page_once() {
        let mut cursor = PaginationCursor::new();
        assert!(cursor.should_process(1));
        cursor.mark_processed(1);
        assert!(!cursor.should_process(1));
        assert!(cursor.should_process(2));
        cursor.mark_processed(2);
        assert_eq!(cursor.last_processed(), Some(2));
    }

    #[tokio::test]
    async fn current_page_defaults_to_one_without_indicator() {
        let selectors = SearchSelectors::default();
        let page = FixturePage::new("https://www.example.com", "/search/results/people/")
            .with_card_selector(&selectors.card);
        assert_eq!(current_page(&page, &selectors).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn can_go_next_only_when_control_is_enabled() {
        let selectors = SearchSelectors::default();

        // Absent control: cannot advance.
        let absent = FixturePage::new("https://www.example.com", "/search/results/people/")
            .with_card_selector(&selectors.card);
        assert!(!can_go_next(&absent, &selectors).await.unwrap());

        // Two pages, on the first: enabled.
        let first = FixturePage::new("https://www.example.com", "/search/results/people/")
            .with_card_selector(&selectors.card)
            .with_search_pages(vec![
                vec![search_card("A", "X at Y", "Z"); 10],
                vec![search_card("B", "X at Y", "Z"); 3],
            ]);
        assert!(can_go_next(&first, &selectors).await.unwrap());

        // Advance to the last page: disabled.
        go_next(&first, &selectors).await.unwrap();
        assert!(!can_go_next(&first, &selectors).await.unwrap());
    }

    #[tokio::test]
    async fn go_next_reports_missing_control() {
        let selectors = SearchSelectors::default();
        let page = FixturePage::new("https://www.example.com", "/search/results/people/")
            .with_card_selector(&selectors.card);
        assert!(!go_next(&page, &selectors).await.unwrap());
    }
}
