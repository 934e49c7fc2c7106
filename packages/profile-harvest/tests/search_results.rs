//! End-to-end runs of the search-results pipeline against a fixture page.

use std::time::Duration;

use profile_harvest::testing::{search_card, FixturePage, RecordingSink};
use profile_harvest::{run_search_results, HarvestError, SearchResultsConfig};

fn result_page(prefix: &str, count: usize) -> Vec<profile_harvest::testing::FixtureCard> {
    (0..count)
        .map(|i| {
            search_card(
                &format!("{prefix} {i}"),
                &format!("Consultant {i} at Firm {i}"),
                "Bucharest, Romania",
            )
            .with_link(&format!("/in/{prefix}-{i}/"))
        })
        .collect()
}

fn fixture(path: &str, total_label: &str, pages: Vec<Vec<profile_harvest::testing::FixtureCard>>) -> FixturePage {
    let selectors = SearchResultsConfig::new().selectors;
    FixturePage::new("https://www.example.com", path)
        .with_card_selector(&selectors.card)
        .with_label(&selectors.results_total, total_label)
        .with_search_pages(pages)
}

#[tokio::test(start_paused = true)]
async fn walks_both_pages_and_flushes_once() {
    let page = fixture(
        "/search/results/people/",
        "15 results",
        vec![result_page("alice", 10), result_page("bob", 5)],
    );
    let sink = RecordingSink::new();
    let config = SearchResultsConfig::new();

    let outcome = run_search_results(&page, &sink, &config).await.unwrap();

    assert_eq!(outcome.records, 15);
    assert_eq!(outcome.pages_processed, 2);
    assert_eq!(outcome.expected_total, 15);
    assert!(outcome.is_complete());
    assert_eq!(sink.delivery_count(), 1);
    assert_eq!(sink.deliveries()[0].lines().count(), 15);

    // One advance into page two, one no-op click on the exhausted control.
    assert_eq!(page.click_count(), 2);

    // Nothing more is scheduled after the flush.
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(sink.delivery_count(), 1);
    assert_eq!(page.click_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn single_short_page_is_extracted_and_finished() {
    let page = fixture(
        "/search/results/people/",
        "3 results",
        vec![result_page("carol", 3)],
    );
    let sink = RecordingSink::new();
    let config = SearchResultsConfig::new();

    let outcome = run_search_results(&page, &sink, &config).await.unwrap();

    assert_eq!(outcome.records, 3);
    assert_eq!(outcome.pages_processed, 1);
    assert_eq!(sink.delivery_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn loading_banner_defers_extraction_until_it_clears() {
    let page = fixture(
        "/search/results/people/",
        "10 results",
        vec![result_page("dave", 10)],
    )
    .with_loading(true);
    let sink = RecordingSink::new();
    let config = SearchResultsConfig::new();

    let run = {
        let page = page.clone();
        let sink = sink.clone();
        let config = config.clone();
        tokio::spawn(async move { run_search_results(&page, &sink, &config).await })
    };

    // Several decision windows pass; the loop only waits and nudges the
    // page, even though the card count heuristic is already satisfied.
    tokio::time::sleep(Duration::from_secs(15)).await;
    assert_eq!(sink.delivery_count(), 0);
    assert!(page.scroll_into_view_count() > 0);
    assert_eq!(page.click_count(), 0);

    page.set_loading(false);
    let outcome = run.await.unwrap().unwrap();
    assert_eq!(outcome.records, 10);
    assert_eq!(sink.delivery_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn occluded_placeholders_force_a_settle_before_extraction() {
    let page = fixture(
        "/search/results/people/",
        "10 results",
        vec![result_page("erin", 10)],
    )
    .with_occluded(3);
    let sink = RecordingSink::new();
    let config = SearchResultsConfig::new();

    let outcome = run_search_results(&page, &sink, &config).await.unwrap();

    // The first decision scrolled the placeholders away instead of extracting.
    assert!(page.scroll_into_view_count() >= 1);
    assert_eq!(outcome.records, 10);
    assert_eq!(sink.delivery_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn wrong_page_fails_the_precondition_without_polling() {
    let page = fixture(
        "/search/results/content/",
        "10 results",
        vec![result_page("frank", 10)],
    );
    let sink = RecordingSink::new();
    let config = SearchResultsConfig::new();

    let err = run_search_results(&page, &sink, &config).await.unwrap_err();

    assert!(matches!(err, HarvestError::Precondition { .. }));
    assert_eq!(sink.delivery_count(), 0);
    assert_eq!(page.click_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn each_result_page_is_extracted_at_most_once() {
    let page = fixture(
        "/search/results/people/",
        "12 results",
        vec![result_page("gina", 10), result_page("hank", 2)],
    );
    let sink = RecordingSink::new();
    let config = SearchResultsConfig::new();

    let outcome = run_search_results(&page, &sink, &config).await.unwrap();

    // Ten from page one, two from page two - page two's short count never
    // triggers a re-extraction of page one, and no page is counted twice.
    assert_eq!(outcome.records, 12);
    let payload = &sink.deliveries()[0];
    assert_eq!(payload.lines().filter(|l| l.contains("gina")).count(), 10);
    assert_eq!(payload.lines().filter(|l| l.contains("hank")).count(), 2);
}
