use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::model::MetadataField;

/// The document-specific tables that tune the parser to one checklist layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    #[serde(default)]
    pub boilerplate: BoilerplateDef,
    /// Heading prefixes in priority order. The first match wins.
    pub sections: Vec<SectionPattern>,
    /// Uppercase tokens of stray column headers. A line made only of these is dropped.
    #[serde(default)]
    pub skip_tokens: BTreeSet<String>,
    /// Lowercase words that, ending a line, mean the item wraps onto the next line.
    #[serde(default)]
    pub continuation_suffixes: BTreeSet<String>,
    pub bundle: BundleDef,
}

impl LayoutProfile {
    /// Canonical title for a heading line, if the line is one.
    pub fn section_title(&self, line: &str) -> Option<&str> {
        let upper = line.to_uppercase();
        self.sections
            .iter()
            .find(|p| upper.starts_with(p.prefix.as_str()))
            .map(|p| p.title.as_str())
    }
}

/// Lines dropped during extraction (page furniture, banners, stamps).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoilerplateDef {
    /// Pattern matched against the uppercased line.
    #[serde(default = "default_page_marker")]
    pub page_marker: String,
    /// Uppercase prefixes of banner and label lines.
    #[serde(default)]
    pub prefixes: Vec<String>,
    /// Lines dropped only on an exact match.
    #[serde(default)]
    pub exact_lines: Vec<String>,
}

impl Default for BoilerplateDef {
    fn default() -> Self {
        BoilerplateDef {
            page_marker: default_page_marker(),
            prefixes: Vec::new(),
            exact_lines: Vec::new(),
        }
    }
}

fn default_page_marker() -> String {
    r"^\d+\s*\|\s*P A G E$".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPattern {
    pub prefix: String,
    pub title: String,
}

/// Envelope constants written around the parsed sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleDef {
    pub name: String,
    pub template: TemplateDef,
    pub dataset: DatasetDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDef {
    pub title: String,
    pub version: String,
    pub status_options: Vec<String>,
    pub default_status: String,
    #[serde(default)]
    pub metadata_fields: Vec<MetadataField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDef {
    pub template_version: String,
    pub updated: String,
    #[serde(default)]
    pub defaults: Map<String, Value>,
}
