//! The flat record produced for each card, and its CSV rendering.

use indexmap::IndexMap;
use serde::Serialize;

/// The literal separator between job title and company in a subtitle line.
pub const SUBTITLE_SEPARATOR: &str = " at ";

/// One harvested profile: an ordered mapping of field name to string value.
///
/// Insertion order is load-bearing - it determines CSV column order and JSON
/// key order, and must match the extractor's field-resolution order.
/// Values are always strings; absent optional fields are empty strings,
/// never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Fields render in the order they were pushed.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Field names in render order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Field values in render order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.values().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render as one header-less CSV line: every value surrounded by double
    /// quotes, comma-joined, no trailing newline.
    ///
    /// Values are not escaped beyond the surrounding quotes; embedded quotes
    /// or commas in source text will corrupt the line (known limitation of
    /// the output contract).
    pub fn csv_line(&self) -> String {
        let mut line = String::new();
        for (i, value) in self.fields.values().enumerate() {
            if i > 0 {
                line.push(',');
            }
            line.push('"');
            line.push_str(value);
            line.push('"');
        }
        line
    }
}

/// Split a subtitle of the shape `"Job at Company"` into its two parts.
///
/// Splits on the FIRST occurrence of [`SUBTITLE_SEPARATOR`]; everything after
/// it (including further `" at "` occurrences) belongs to the company.
/// A subtitle without the separator is all job, empty company.
pub fn split_job_company(subtitle: &str) -> (String, String) {
    match subtitle.split_once(SUBTITLE_SEPARATOR) {
        Some((job, company)) => (job.to_string(), company.to_string()),
        None => (subtitle.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn split_with_separator() {
        let (job, company) = split_job_company("Head of Talent Development at Permira");
        assert_eq!(job, "Head of Talent Development");
        assert_eq!(company, "Permira");
    }

    #[test]
    fn split_without_separator() {
        let (job, company) = split_job_company("Freelance Designer");
        assert_eq!(job, "Freelance Designer");
        assert_eq!(company, "");
    }

    #[test]
    fn split_keeps_remainder_on_company_side() {
        let (job, company) = split_job_company("Barista at Coffee at Night");
        assert_eq!(job, "Barista");
        assert_eq!(company, "Coffee at Night");
    }

    #[test]
    fn csv_line_quotes_in_field_order() {
        let mut record = Record::new();
        record.push("profileLink", "https://example.com/in/jane");
        record.push("name", "Jane Doe");
        record.push("subtitle", "CTO at Acme");
        assert_eq!(
            record.csv_line(),
            r#""https://example.com/in/jane","Jane Doe","CTO at Acme""#
        );
    }

    #[test]
    fn json_preserves_field_order() {
        let mut record = Record::new();
        record.push("profileLink", "");
        record.push("name", "Jane");
        record.push("subtitle", "CTO at Acme");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"profileLink":"","name":"Jane","subtitle":"CTO at Acme"}"#
        );
    }

    proptest! {
        // "X at Y" always splits into job="X", company="Y". X is kept
        // space-free so the constructed separator is the first one.
        #[test]
        fn split_round_trips(job in "[A-Za-z]{0,20}", company in "[A-Za-z ]{0,20}") {
            let subtitle = format!("{job} at {company}");
            let (j, c) = split_job_company(&subtitle);
            prop_assert_eq!(j, job);
            prop_assert_eq!(c, company);
        }

        // A CSV line splits back into the same ordered value list when the
        // values carry no quotes or commas.
        #[test]
        fn csv_line_round_trips(values in proptest::collection::vec("[A-Za-z0-9 ]{0,12}", 1..6)) {
            let mut record = Record::new();
            for (i, v) in values.iter().enumerate() {
                record.push(format!("f{i}"), v.clone());
            }
            let line = record.csv_line();
            let stripped = line
                .strip_prefix('"')
                .and_then(|l| l.strip_suffix('"'))
                .unwrap();
            let parsed: Vec<&str> = stripped.split("\",\"").collect();
            prop_assert_eq!(parsed, values.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
