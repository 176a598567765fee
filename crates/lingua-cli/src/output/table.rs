//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use serde::Serialize;

/// Coverage data for a single language.
#[derive(Debug, Serialize)]
pub struct LanguageCoverage {
    /// Language identifier (e.g., "nl", "en-GB").
    pub language: String,
    /// Number of source keys present in this language.
    pub translated: usize,
    /// Number of keys in the source language.
    pub total: usize,
    /// Source keys missing from this language, sorted.
    pub missing: Vec<String>,
    /// Keys this language has that the source does not, sorted.
    pub extra: Vec<String>,
}

impl LanguageCoverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(coverage: &[LanguageCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Language", "Coverage", "Missing", "Extra"]);

    for lang in coverage {
        table.add_row(vec![
            lang.language.clone(),
            format!("{}/{}", lang.translated, lang.total),
            lang.missing.len().to_string(),
            lang.extra.len().to_string(),
        ]);
    }

    table
}
