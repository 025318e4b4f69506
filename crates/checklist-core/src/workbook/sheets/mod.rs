pub mod matrix;
pub mod overview;
pub mod progress;
pub mod status_board;

use crate::model::Bundle;
use crate::workbook::palette::{self, SectionPalette};
use crate::workbook::style::Style;
use crate::workbook::summary;
use crate::workbook::xlsx::Worksheet;

/// Everything the sheet builders share for one bundle.
pub struct RenderContext<'a> {
    pub bundle: &'a Bundle,
    pub sections: SectionPalette,
    pub status_options: Vec<String>,
    pub status_fills: Vec<(String, &'static str)>,
    /// Status for unrecorded items without their own default.
    pub fallback_status: String,
}

impl<'a> RenderContext<'a> {
    pub fn new(bundle: &'a Bundle) -> Self {
        let status_options = summary::effective_status_options(bundle);
        let status_fills = palette::status_fills(&status_options);
        let fallback_status = summary::fallback_status(bundle, &status_options);
        RenderContext {
            bundle,
            sections: SectionPalette::from_sections(&bundle.template.sections),
            status_options,
            status_fills,
            fallback_status,
        }
    }
}

/// Column widths in order, starting at column A.
pub(crate) fn set_widths(sheet: &mut Worksheet, widths: &[f64]) {
    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, *width);
    }
}

/// Write `text`, or just the style when it is empty.
pub(crate) fn write_text(sheet: &mut Worksheet, row: u32, col: u16, text: &str, style: &Style) {
    if text.is_empty() {
        sheet.write_blank(row, col, style);
    } else {
        sheet.write_string(row, col, text, style);
    }
}
