use std::collections::HashMap;

use crate::model::TemplateSection;

pub const PRIMARY_TITLE_COLOUR: &str = "0B1E3F";
pub const SECONDARY_TEXT_COLOUR: &str = "3D4A5C";
pub const OVERVIEW_HEADER_FILL: &str = "E9F2FF";
pub const MILESTONE_HEADER_FILL: &str = "0B3D91";
pub const MILESTONE_TEXT_COLOUR: &str = "FFFFFF";
pub const NEUTRAL_FILL: &str = "F8FAFC";

/// Fill and text colour for a section, both `RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionColours {
    pub fill: &'static str,
    pub text: &'static str,
}

impl SectionColours {
    const fn new(fill: &'static str, text: &'static str) -> Self {
        SectionColours { fill, text }
    }
}

const KNOWN_SECTION_COLOURS: &[(&str, SectionColours)] = &[
    ("Orientation & Foundations", SectionColours::new("EDF2FB", "1B4F72")),
    ("Outlet Competencies", SectionColours::new("E8F5E9", "1B5E20")),
    ("Compliance & Guest Care", SectionColours::new("FFF4E6", "E65100")),
];

const SECTION_COLOUR_FALLBACKS: &[SectionColours] = &[
    SectionColours::new("E8ECFF", "1F3B70"),
    SectionColours::new("E8F5E9", "1B5E20"),
    SectionColours::new("FFF4E5", "8E4B10"),
    SectionColours::new("FCE4EC", "6A1B4D"),
    SectionColours::new("F1F8E9", "33691E"),
];

const STATUS_COLOUR_PRESETS: &[(&str, &str)] = &[
    ("Not Started", "E0E0E0"),
    ("In Progress", "FFF3CD"),
    ("Complete", "D4EDDA"),
];

const STATUS_COLOUR_FALLBACKS: &[&str] = &["E2E8F0", "FFEFD5", "E3F2FD", "F8D7DA"];

/// Status options used when a template lists none.
pub fn preset_status_options() -> Vec<String> {
    STATUS_COLOUR_PRESETS
        .iter()
        .map(|(status, _)| status.to_string())
        .collect()
}

/// Colours per section title.
///
/// Known titles keep their fixed colours. Every other distinct title takes
/// the next entry of the fallback cycle in template order. Untitled sections
/// are skipped and do not advance the cycle.
#[derive(Debug, Clone, Default)]
pub struct SectionPalette {
    colours: HashMap<String, SectionColours>,
    order: Vec<String>,
}

impl SectionPalette {
    pub fn from_sections(sections: &[TemplateSection]) -> Self {
        let mut palette = SectionPalette::default();
        let mut fallbacks = SECTION_COLOUR_FALLBACKS.iter().cycle();

        for section in sections {
            let title = section.title.as_str();
            if title.is_empty() || palette.colours.contains_key(title) {
                continue;
            }
            let colours = match KNOWN_SECTION_COLOURS.iter().find(|(known, _)| *known == title) {
                Some((_, colours)) => *colours,
                None => fallbacks
                    .next()
                    .copied()
                    .unwrap_or(SectionColours::new(NEUTRAL_FILL, PRIMARY_TITLE_COLOUR)),
            };
            palette.colours.insert(title.to_string(), colours);
            palette.order.push(title.to_string());
        }
        palette
    }

    pub fn get(&self, title: &str) -> Option<SectionColours> {
        self.colours.get(title).copied()
    }

    /// Colours for `title`, or `default` when the title has none.
    pub fn get_or(&self, title: &str, default: SectionColours) -> SectionColours {
        self.get(title).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

pub(crate) const fn neutral(text: &'static str) -> SectionColours {
    SectionColours::new(NEUTRAL_FILL, text)
}

pub(crate) const fn colours(fill: &'static str, text: &'static str) -> SectionColours {
    SectionColours::new(fill, text)
}

/// Fill colour per status option: presets first, then the fallback cycle.
pub fn status_fills(options: &[String]) -> Vec<(String, &'static str)> {
    let mut fallbacks = STATUS_COLOUR_FALLBACKS.iter().cycle();
    options
        .iter()
        .map(|option| {
            let colour = STATUS_COLOUR_PRESETS
                .iter()
                .find(|(status, _)| *status == option.as_str())
                .map(|(_, colour)| *colour)
                .or_else(|| fallbacks.next().copied())
                .unwrap_or("FFFFFF");
            (option.clone(), colour)
        })
        .collect()
}
