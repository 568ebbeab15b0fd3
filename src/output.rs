//! Rendering parsed status for stdout or a file.

use std::path::Path;

use anyhow::{Context, Result};
use dsl_status::{extract_record, DataKey, FieldDictionary, PortTable, Section, SectionMap};
use serde::Serialize;

/// What to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// The router's own text for each section, in request order.
    Text(Vec<Section>),
    /// A colon-separated record of numeric values.
    Data(Vec<DataKey>),
}

impl Report {
    /// Produce the output for this report.
    ///
    /// The port table is only parsed when values are requested.
    pub fn render(&self, sections: &SectionMap) -> Result<String> {
        match self {
            Report::Text(requested) => Ok(render_text(sections, requested)),
            Report::Data(keys) => {
                let table = PortTable::parse(&sections.port)?;
                Ok(extract_record(&table, &FieldDictionary::standard(), keys)?)
            }
        }
    }
}

/// Each section's lines joined with newlines, each followed by a newline.
pub fn render_text(sections: &SectionMap, requested: &[Section]) -> String {
    let mut out = String::new();
    for section in requested {
        out.push_str(&sections.text(*section));
        out.push('\n');
    }
    out
}

#[derive(Debug, Serialize)]
struct Export<'a> {
    sections: &'a SectionMap,
    port: PortTable,
}

/// Serialize the sections and the parsed port table as pretty JSON.
pub fn export_json(sections: &SectionMap) -> Result<String> {
    let port = PortTable::parse(&sections.port)?;
    let export = Export { sections, port };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Write the JSON export to a file.
pub fn export_to_file(sections: &SectionMap, export_path: &Path) -> Result<()> {
    let json = export_json(sections)?;
    std::fs::write(export_path, json)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;
    Ok(())
}
