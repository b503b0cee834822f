use anyhow::anyhow;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

/// Pretty table formatter using the tabled library
pub struct PrettyFormatter;

impl PrettyFormatter {
    pub fn format<T: Tabled>(items: &[T]) -> String {
        if items.is_empty() {
            return String::new();
        }

        let mut table = Table::new(items);
        table.with(Style::rounded());

        table.to_string()
    }
}

/// CSV formatter. Headers are taken from the serialized field names.
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn format<T: Serialize>(items: &[T]) -> anyhow::Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for item in items {
            writer.serialize(item)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| anyhow!("flushing CSV output: {}", err.error()))?;
        Ok(String::from_utf8(bytes)?)
    }
}
