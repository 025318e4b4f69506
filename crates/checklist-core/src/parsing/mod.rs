pub mod continuation;
pub mod normalize;

use crate::layout::schema::LayoutProfile;
use crate::model::Section;
use continuation::{is_skip_line, should_continue};
use normalize::normalize_item_text;

/// Rebuild the section/item hierarchy from normalized checklist lines.
///
/// Headings open (or reopen) a section, empty lines end the current item, and
/// wrapped item lines are stitched together using the continuation heuristic.
/// Lines before the first heading have no section to land in and are dropped.
pub fn parse_sections<S: AsRef<str>>(lines: &[S], layout: &LayoutProfile) -> Vec<Section> {
    let mut parser = SectionParser::new(layout);
    for line in lines {
        parser.push_line(line.as_ref());
    }
    parser.finish()
}

struct SectionParser<'a> {
    layout: &'a LayoutProfile,
    sections: Vec<Section>,
    current: Option<usize>,
    buffer: Vec<String>,
    dropped_items: usize,
}

impl<'a> SectionParser<'a> {
    fn new(layout: &'a LayoutProfile) -> Self {
        SectionParser {
            layout,
            sections: Vec::new(),
            current: None,
            buffer: Vec::new(),
            dropped_items: 0,
        }
    }

    fn push_line(&mut self, line: &str) {
        if line.is_empty() {
            self.flush();
            return;
        }

        if let Some(title) = self.layout.section_title(line) {
            self.flush();
            self.open_section(title);
            return;
        }

        if is_skip_line(line, &self.layout.skip_tokens) {
            return;
        }

        let cleaned = normalize_item_text(line);
        if cleaned.is_empty() {
            self.flush();
            return;
        }

        if let Some(previous) = self.buffer.last() {
            if should_continue(previous, &cleaned, &self.layout.continuation_suffixes) {
                self.buffer.push(cleaned);
                return;
            }
            self.flush();
        }
        self.buffer.push(cleaned);
    }

    /// Switch to the section with this title, creating it on first sight.
    ///
    /// A heading repeated after a page break continues the earlier section.
    fn open_section(&mut self, title: &str) {
        if let Some(idx) = self.sections.iter().position(|s| s.title == title) {
            self.current = Some(idx);
            return;
        }
        self.sections.push(Section {
            title: title.to_string(),
            items: Vec::new(),
        });
        self.current = Some(self.sections.len() - 1);
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let joined = self.buffer.join(" ");
        self.buffer.clear();

        let Some(idx) = self.current else {
            self.dropped_items += 1;
            return;
        };
        let text = normalize_item_text(&joined);
        if !text.is_empty() {
            self.sections[idx].items.push(text);
        }
    }

    fn finish(mut self) -> Vec<Section> {
        self.flush();
        tracing::debug!(
            sections = self.sections.len(),
            items = self.sections.iter().map(|s| s.items.len()).sum::<usize>(),
            dropped_before_heading = self.dropped_items,
            "parsed checklist sections"
        );
        self.sections
    }
}
