//! Progress detection - is the currently loaded content sufficient to
//! extract, or must more be triggered first?
//!
//! Every function here is a pure read of the page source, recomputed fresh
//! at each decision point. Nothing is cached: the page mutates outside this
//! library's control between polls.

use crate::error::{HarvestError, PageResult, Result};
use crate::page::PageSource;
use crate::pagination::can_go_next;
use crate::selectors::{CompanySelectors, SearchSelectors};

/// Derived progress booleans, recomputed every decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    /// Target count, read once at run start from the header counter
    pub expected_total: usize,
    /// Cards currently queryable on the page
    pub current_count: usize,
    /// More content must be triggered before extraction is safe
    pub needs_more_content: bool,
    /// The visible set has reached the target
    pub is_complete: bool,
}

/// Assess a company-people page against the expected employee total.
pub async fn company_progress<S: PageSource>(
    source: &S,
    selectors: &CompanySelectors,
    expected_total: usize,
) -> PageResult<ProgressState> {
    let current_count = source.count(&selectors.card).await?;
    Ok(ProgressState {
        expected_total,
        current_count,
        needs_more_content: current_count < expected_total,
        is_complete: current_count >= expected_total,
    })
}

/// Whether a search-results page needs more loading before its current page
/// can be extracted.
///
/// True when lazy-load placeholders still occupy list slots, when the
/// pagination control has not rendered yet, or when a non-final page shows
/// fewer cards than a full page holds.
pub async fn search_needs_more<S: PageSource>(
    source: &S,
    selectors: &SearchSelectors,
    page_size: usize,
) -> PageResult<bool> {
    if source.count(&selectors.occlusion_hint).await? > 0 {
        return Ok(true);
    }
    if source.count(&selectors.pagination).await? == 0 {
        return Ok(true);
    }
    if can_go_next(source, selectors).await? && source.count(&selectors.card).await? < page_size {
        return Ok(true);
    }
    Ok(false)
}

/// Whether the transient results-loading banner is up.
///
/// While it is, the loop must keep waiting rather than extracting, even if
/// the count heuristics look satisfied - loading state takes precedence.
pub async fn search_is_loading<S: PageSource>(
    source: &S,
    selectors: &SearchSelectors,
) -> PageResult<bool> {
    Ok(source.count(&selectors.loading_indicator).await? > 0)
}

/// Read the expected-total counter label and parse its leading integer.
///
/// Read once at run start; the label is never re-read afterwards.
pub async fn read_expected_total<S: PageSource>(source: &S, selector: &str) -> Result<usize> {
    let text = source
        .text(selector)
        .await?
        .ok_or_else(|| HarvestError::CounterUnreadable {
            selector: selector.to_string(),
        })?;
    leading_int(&text).ok_or_else(|| HarvestError::CounterUnreadable {
        selector: selector.to_string(),
    })
}

/// Parse the leading unsigned integer of a label such as "312 employees".
fn leading_int(text: &str) -> Option<usize> {
    let trimmed = text.trim_start();
    let digits: &str = trimmed
        .split_once(|c: char| !c.is_ascii_digit())
        .map(|(head, _)| head)
        .unwrap_or(trimmed);
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{company_card, search_card, FixturePage};

    #[test]
    fn leading_int_parses_counter_labels() {
        assert_eq!(leading_int("312 employees"), Some(312));
        assert_eq!(leading_int("  998 results"), Some(998));
        assert_eq!(leading_int("5"), Some(5));
        assert_eq!(leading_int("about 300"), None);
        assert_eq!(leading_int(""), None);
    }

    #[tokio::test]
    async fn company_needs_more_boundary() {
        let selectors = CompanySelectors::default();
        let expected = 3;
        for (count, needs_more) in [(0, true), (2, true), (3, false), (4, false)] {
            let cards = (0..count)
                .map(|i| company_card(&format!("Person {i}"), "Job at Co"))
                .collect();
            let page = FixturePage::new("https://www.example.com", "/company/acme/people/")
                .with_card_selector(&selectors.card)
                .with_visible_cards(cards);
            let progress = company_progress(&page, &selectors, expected).await.unwrap();
            assert_eq!(progress.needs_more_content, needs_more, "count {count}");
            assert_eq!(progress.is_complete, !needs_more, "count {count}");
        }
    }

    #[tokio::test]
    async fn search_needs_more_while_occluded() {
        let selectors = SearchSelectors::default();
        let page = FixturePage::new("https://www.example.com", "/search/results/people/")
            .with_card_selector(&selectors.card)
            .with_search_pages(vec![vec![search_card("A", "X at Y", "Z"); 10]])
            .with_occluded(3);
        assert!(search_needs_more(&page, &selectors, 10).await.unwrap());
    }

    #[tokio::test]
    async fn search_needs_more_without_pagination_control() {
        let selectors = SearchSelectors::default();
        // No search pages configured: the fixture has no pagination control.
        let page = FixturePage::new("https://www.example.com", "/search/results/people/")
            .with_card_selector(&selectors.card);
        assert!(search_needs_more(&page, &selectors, 10).await.unwrap());
    }

    #[tokio::test]
    async fn search_needs_more_on_short_non_final_page() {
        let selectors = SearchSelectors::default();
        let page = FixturePage::new("https://www.example.com", "/search/results/people/")
            .with_card_selector(&selectors.card)
            .with_search_pages(vec![
                vec![search_card("A", "X at Y", "Z"); 4],
                vec![search_card("B", "X at Y", "Z"); 10],
            ]);
        assert!(search_needs_more(&page, &selectors, 10).await.unwrap());
    }

    #[tokio::test]
    async fn search_settled_on_full_page_and_on_last_page() {
        let selectors = SearchSelectors::default();
        let full = FixturePage::new("https://www.example.com", "/search/results/people/")
            .with_card_selector(&selectors.card)
            .with_search_pages(vec![
                vec![search_card("A", "X at Y", "Z"); 10],
                vec![search_card("B", "X at Y", "Z"); 5],
            ]);
        assert!(!search_needs_more(&full, &selectors, 10).await.unwrap());

        // A short final page is settled: the next control is disabled.
        let last = FixturePage::new("https://www.example.com", "/search/results/people/")
            .with_card_selector(&selectors.card)
            .with_search_pages(vec![vec![search_card("A", "X at Y", "Z"); 5]]);
        assert!(!search_needs_more(&last, &selectors, 10).await.unwrap());
    }

    #[tokio::test]
    async fn loading_indicator_detected() {
        let selectors = SearchSelectors::default();
        let page = FixturePage::new("https://www.example.com", "/search/results/people/")
            .with_card_selector(&selectors.card)
            .with_search_pages(vec![vec![search_card("A", "X at Y", "Z"); 10]])
            .with_loading(true);
        assert!(search_is_loading(&page, &selectors).await.unwrap());
        page.set_loading(false);
        assert!(!search_is_loading(&page, &selectors).await.unwrap());
    }

    #[tokio::test]
    async fn expected_total_reads_counter_once() {
        let selectors = CompanySelectors::default();
        let page = FixturePage::new("https://www.example.com", "/company/acme/people/")
            .with_card_selector(&selectors.card)
            .with_label(&selectors.employee_count, "312 employees");
        assert_eq!(
            read_expected_total(&page, &selectors.employee_count)
                .await
                .unwrap(),
            312
        );
    }

    #[tokio::test]
    async fn missing_counter_is_an_error() {
        let selectors = CompanySelectors::default();
        let page = FixturePage::new("https://www.example.com", "/company/acme/people/")
            .with_card_selector(&selectors.card);
        let err = read_expected_total(&page, &selectors.employee_count)
            .await
            .unwrap_err();
        assert!(matches!(err, HarvestError::CounterUnreadable { .. }));
    }
}
