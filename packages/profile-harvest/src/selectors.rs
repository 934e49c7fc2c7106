//! Selector sets for the two supported page layouts.
//!
//! The selector strings are a fixed external contract with the page markup;
//! the library makes no attempt to survive markup changes. They are grouped
//! into config structs so a fixture (or a future layout revision) can swap
//! a whole set at once.

use serde::{Deserialize, Serialize};

/// CSS selectors for a company "People" page (infinite scroll).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySelectors {
    /// One profile card in the people list
    pub card: String,
    /// Header label carrying the employee count, e.g. "312 employees"
    pub employee_count: String,
    /// Anchor holding the profile link (href relative to the origin)
    pub link_anchor: String,
    /// Primary name locator inside a card
    pub name_primary: String,
    /// Fallback name locator when the primary is absent
    pub name_fallback: String,
    /// Connection-degree badge text
    pub connection_badge: String,
    /// "Job at Company" subtitle line
    pub subtitle: String,
    /// Shared-connections count text
    pub shared_connections: String,
}

impl CompanySelectors {
    /// Selectors for the LinkedIn organization people module.
    pub fn linkedin_org() -> Self {
        Self {
            card: ".org-people-profiles-module__profile-list .org-people-profile-card"
                .to_string(),
            employee_count:
                ".org-organization-page__container .artdeco-card > div:first-child > span"
                    .to_string(),
            link_anchor: "[data-control-name=\"people_profile_card_name_link\"]".to_string(),
            name_primary: ".artdeco-entity-lockup__title .org-people-profile-card__profile-title"
                .to_string(),
            name_fallback: ".artdeco-entity-lockup__title".to_string(),
            connection_badge: ".artdeco-entity-lockup__badge span.a11y-text".to_string(),
            subtitle: ".artdeco-entity-lockup__subtitle .lt-line-clamp".to_string(),
            shared_connections: ".org-people-profile-card__profile-info > span span".to_string(),
        }
    }
}

impl Default for CompanySelectors {
    fn default() -> Self {
        Self::linkedin_org()
    }
}

/// CSS selectors for a people "Search results" page (paginated).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSelectors {
    /// One person result card
    pub card: String,
    /// Header label carrying the result count, e.g. "998 results"
    pub results_total: String,
    /// Anchor holding the profile link (href relative to the origin)
    pub link_anchor: String,
    /// Display name inside a card
    pub name: String,
    /// "Job at Company" subtitle line
    pub subtitle: String,
    /// Location line
    pub location: String,
    /// Lazy-load placeholder still occupying a list slot
    pub occlusion_hint: String,
    /// The pagination control
    pub pagination: String,
    /// "Next page" button inside the pagination control
    pub next_button: String,
    /// Class the next button carries when disabled (last page)
    pub next_disabled_class: String,
    /// The currently selected page-number indicator
    pub page_indicator_selected: String,
    /// Data attribute on the indicator holding the page number
    pub page_number_attr: String,
    /// Transient loading banner shown while results re-render
    pub loading_indicator: String,
}

impl SearchSelectors {
    /// Selectors for the LinkedIn people search results layout.
    pub fn linkedin_search() -> Self {
        Self {
            card: ".search-results-page .search-result--person .search-result__info".to_string(),
            results_total: ".search-results .search-results__total".to_string(),
            link_anchor: ".search-result__result-link".to_string(),
            name: ".actor-name".to_string(),
            subtitle: ".subline-level-1".to_string(),
            location: ".subline-level-2".to_string(),
            occlusion_hint: ".search-results__list .search-result__occlusion-hint".to_string(),
            pagination: ".artdeco-pagination".to_string(),
            next_button: ".artdeco-pagination__button--next".to_string(),
            next_disabled_class: "artdeco-button--disabled".to_string(),
            page_indicator_selected: ".artdeco-pagination__indicator--number.selected".to_string(),
            page_number_attr: "data-test-pagination-page-btn".to_string(),
            loading_indicator: ".search-is-loading".to_string(),
        }
    }
}

impl Default for SearchSelectors {
    fn default() -> Self {
        Self::linkedin_search()
    }
}
