//! Fixture Run - drive the company-people pipeline without a browser.
//!
//! Wires the poll loop to a scripted [`FixturePage`] so the whole
//! scroll-wait-extract-flush cycle can be watched from the log output.
//! Useful as a wiring reference for a real page-source backend.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p profile-harvest --example fixture_run
//! ```

use profile_harvest::testing::{company_card, FixturePage, RecordingSink};
use profile_harvest::{CompanyPeopleConfig, OutputFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = CompanyPeopleConfig::new().with_output(OutputFormat::Csv);

    // Five employees, two visible up front, the rest revealed by scrolling.
    let page = FixturePage::new("https://www.example.com", "/company/acme/people/")
        .with_card_selector(&config.selectors.card)
        .with_label(&config.selectors.employee_count, "5 employees")
        .with_visible_cards(vec![
            company_card("Ada Example", "Staff Engineer at Acme").with_link("/in/ada-example/"),
            company_card("Ben Sample", "Designer at Acme").with_link("/in/ben-sample/"),
        ])
        .with_pending_cards(
            vec![
                company_card("Cara Test", "Analyst at Acme"),
                company_card("Dan Mock", "Recruiter at Acme"),
                company_card("Eve Fixture", "Head of People at Acme"),
            ],
            2,
        );

    let sink = RecordingSink::new();
    let outcome = profile_harvest::run_company_people(&page, &sink, &config).await?;

    println!(
        "harvested {} of {} expected profiles in {} scroll(s)",
        outcome.records,
        outcome.expected_total,
        page.scroll_count()
    );
    print!("{}", sink.deliveries()[0]);
    Ok(())
}
