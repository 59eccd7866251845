// ⚙️ Loader Configuration
// Controls how the two register CSVs are read.

use serde::{Deserialize, Serialize};

/// Formats tried in order when parsing a last-update date
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%Y-%m-%d"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Field separator, the federal registers ship with ';'
    pub delimiter: u8,

    /// chrono format strings for the last-update column
    pub date_formats: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            delimiter: b';',
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl LoaderConfig {
    /// Builder pattern: override the delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: replace the accepted date formats
    pub fn with_date_formats(mut self, formats: &[&str]) -> Self {
        self.date_formats = formats.iter().map(|f| f.to_string()).collect();
        self
    }
}
