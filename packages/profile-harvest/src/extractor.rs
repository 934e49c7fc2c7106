//! Card-to-record mappers for both page variants.
//!
//! Each mapper is a pure read of one card's subtree: it never mutates the
//! page and never retains the handle. Mandatory fields (name, subtitle) fail
//! with [`ExtractError::MissingField`] when their element is absent; optional
//! fields degrade to the empty string.

use url::Url;

use crate::error::{ExtractError, ExtractResult};
use crate::page::{CardHandle, PageSource};
use crate::record::{split_job_company, Record};
use crate::selectors::{CompanySelectors, SearchSelectors};

/// Output field names, shared by both variants where they overlap.
pub mod fields {
    pub const PROFILE_LINK: &str = "profileLink";
    pub const NAME: &str = "name";
    pub const SUBTITLE: &str = "subtitle";
    pub const JOB: &str = "job";
    pub const COMPANY: &str = "company";
    pub const CONNECTION_TYPE: &str = "connectionType";
    pub const SHARED_CONNECTIONS: &str = "sharedConnections";
    pub const LOCATION: &str = "location";
}

/// Map one company-people card to a record.
///
/// Field order: profileLink, name, subtitle, job, company, connectionType,
/// sharedConnections.
pub async fn extract_company_card<S: PageSource>(
    source: &S,
    card: &CardHandle,
    selectors: &CompanySelectors,
) -> ExtractResult<Record> {
    let mut record = Record::new();

    let link = resolve_profile_link(source, card, &selectors.link_anchor).await?;
    record.push(fields::PROFILE_LINK, link);

    let name = mandatory_text(
        source,
        card,
        &selectors.name_primary,
        Some(&selectors.name_fallback),
        fields::NAME,
    )
    .await?;
    record.push(fields::NAME, name);

    let subtitle = mandatory_text(source, card, &selectors.subtitle, None, fields::SUBTITLE).await?;
    let (job, company) = split_job_company(&subtitle);
    record.push(fields::SUBTITLE, subtitle);
    record.push(fields::JOB, job);
    record.push(fields::COMPANY, company);

    let badge = optional_text(source, card, &selectors.connection_badge).await?;
    record.push(fields::CONNECTION_TYPE, badge);

    let shared = optional_text(source, card, &selectors.shared_connections).await?;
    record.push(fields::SHARED_CONNECTIONS, shared);

    Ok(record)
}

/// Map one search-result card to a record.
///
/// Field order: profileLink, name, subtitle, job, company, location.
pub async fn extract_search_card<S: PageSource>(
    source: &S,
    card: &CardHandle,
    selectors: &SearchSelectors,
) -> ExtractResult<Record> {
    let mut record = Record::new();

    let link = resolve_profile_link(source, card, &selectors.link_anchor).await?;
    record.push(fields::PROFILE_LINK, link);

    let name = mandatory_text(source, card, &selectors.name, None, fields::NAME).await?;
    record.push(fields::NAME, name);

    let subtitle = mandatory_text(source, card, &selectors.subtitle, None, fields::SUBTITLE).await?;
    let (job, company) = split_job_company(&subtitle);
    record.push(fields::SUBTITLE, subtitle);
    record.push(fields::JOB, job);
    record.push(fields::COMPANY, company);

    let location = optional_text(source, card, &selectors.location).await?;
    record.push(fields::LOCATION, location);

    Ok(record)
}

/// Read the profile anchor's href and resolve it against the page origin.
///
/// Profile hrefs are relative to the origin; an absent anchor or href yields
/// the empty string rather than a failure.
async fn resolve_profile_link<S: PageSource>(
    source: &S,
    card: &CardHandle,
    anchor_selector: &str,
) -> ExtractResult<String> {
    let href = match source.card_attr(card, anchor_selector, "href").await? {
        Some(href) if !href.is_empty() => href,
        _ => return Ok(String::new()),
    };

    let origin = source.origin().await?;
    let resolved = Url::parse(&origin)
        .and_then(|base| base.join(&href))
        .map(String::from)
        .unwrap_or_else(|_| format!("{origin}{href}"));
    Ok(resolved)
}

/// Trimmed text of a mandatory locator, trying `fallback` when the primary
/// is absent.
async fn mandatory_text<S: PageSource>(
    source: &S,
    card: &CardHandle,
    primary: &str,
    fallback: Option<&str>,
    field: &'static str,
) -> ExtractResult<String> {
    if let Some(text) = source.card_text(card, primary).await? {
        return Ok(text.trim().to_string());
    }
    if let Some(fallback) = fallback {
        if let Some(text) = source.card_text(card, fallback).await? {
            return Ok(text.trim().to_string());
        }
    }
    Err(ExtractError::MissingField { field })
}

/// Trimmed text of an optional locator, empty string when absent.
async fn optional_text<S: PageSource>(
    source: &S,
    card: &CardHandle,
    selector: &str,
) -> ExtractResult<String> {
    Ok(source
        .card_text(card, selector)
        .await?
        .map(|text| text.trim().to_string())
        .unwrap_or_default())
}
