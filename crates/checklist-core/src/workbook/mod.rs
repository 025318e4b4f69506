//! Renders a bundle into the sign-off workbook.
//!
//! The xlsx package is assembled in memory (`xlsx`), styled through a
//! deduplicating style table (`style`) and written out by the caller.

pub mod palette;
pub mod sheets;
pub mod style;
pub mod summary;
pub mod xlsx;
mod xml;

use crate::error::ChecklistError;
use crate::model::Bundle;
use sheets::RenderContext;
use xlsx::Workbook;

/// Sheet names in workbook order.
pub const SHEET_NAMES: &[&str] = &[
    sheets::overview::SHEET_NAME,
    sheets::matrix::SHEET_NAME,
    sheets::progress::SHEET_NAME,
    sheets::status_board::SHEET_NAME,
];

/// Lay out all four sheets for a bundle.
pub fn build_workbook(bundle: &Bundle) -> Workbook {
    let ctx = RenderContext::new(bundle);
    let mut workbook = Workbook::new();
    workbook.push_worksheet(sheets::overview::build(&ctx));
    workbook.push_worksheet(sheets::matrix::build(&ctx));
    workbook.push_worksheet(sheets::progress::build(&ctx));
    workbook.push_worksheet(sheets::status_board::build(&ctx));

    tracing::debug!(
        people = bundle.dataset.people.len(),
        sections = bundle.template.sections.len(),
        statuses = ctx.status_options.len(),
        "laid out workbook"
    );
    workbook
}

/// Render a bundle to xlsx bytes.
pub fn render_workbook(bundle: &Bundle) -> Result<Vec<u8>, ChecklistError> {
    build_workbook(bundle).save_to_buffer()
}

/// Number of checklist items across all template sections.
pub fn competency_count(bundle: &Bundle) -> usize {
    bundle.template.sections.iter().map(|s| s.items.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_order() {
        let workbook = build_workbook(&Bundle::default());
        let names: Vec<&str> = workbook.worksheets().iter().map(|s| s.name()).collect();
        assert_eq!(names, SHEET_NAMES);
    }

    #[test]
    fn test_empty_bundle_renders() {
        let bytes = render_workbook(&Bundle::default()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
