//! The sink boundary - where the accumulated records leave the library -
//! and the two payload renderings (CSV, JSON).

use async_trait::async_trait;
use tracing::info;

use crate::record::Record;

/// Boxed error type sinks may fail with.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Final destination for one harvested text blob.
///
/// A sink receives the payload exactly once, at run completion. Delivery
/// (clipboard, log, file) is the implementation's concern.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Deliver the final payload.
    async fn deliver(&self, payload: &str) -> Result<(), SinkError>;
}

/// Output rendering for the accumulated records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Header-less quoted CSV, one line per record (the default)
    #[default]
    Csv,
    /// Ordered JSON array of record mappings
    Json,
}

/// Render records into the final payload text.
pub fn render(records: &[Record], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Csv => Ok(render_csv(records)),
        OutputFormat::Json => serde_json::to_string(records),
    }
}

/// Render records as newline-joined CSV lines with a trailing newline.
pub fn render_csv(records: &[Record]) -> String {
    if records.is_empty() {
        return String::new();
    }
    let mut out = records
        .iter()
        .map(Record::csv_line)
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

/// A sink that emits the payload as a tracing event - the console-log
/// analogue, useful when a host clipboard is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl Sink for LogSink {
    async fn deliver(&self, payload: &str) -> Result<(), SinkError> {
        info!(
            bytes = payload.len(),
            lines = payload.lines().count(),
            "harvest payload:\n{payload}"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: &[(&str, &str)]) -> Record {
        let mut r = Record::new();
        for (name, value) in values {
            r.push(*name, *value);
        }
        r
    }

    #[test]
    fn csv_rendering_joins_lines_with_trailing_newline() {
        let records = vec![
            record(&[("name", "Jane"), ("job", "CTO")]),
            record(&[("name", "John"), ("job", "CFO")]),
        ];
        assert_eq!(render_csv(&records), "\"Jane\",\"CTO\"\n\"John\",\"CFO\"\n");
    }

    #[test]
    fn csv_rendering_of_nothing_is_empty() {
        assert_eq!(render_csv(&[]), "");
    }

    #[test]
    fn json_rendering_is_an_ordered_array() {
        let records = vec![record(&[("name", "Jane"), ("job", "CTO")])];
        assert_eq!(
            render(&records, OutputFormat::Json).unwrap(),
            r#"[{"name":"Jane","job":"CTO"}]"#
        );
    }
}
