use crate::workbook::palette::{neutral, PRIMARY_TITLE_COLOUR};
use crate::workbook::sheets::{set_widths, write_text, RenderContext};
use crate::workbook::style::{Horizontal, Style, Vertical};
use crate::workbook::summary::area_tallies;
use crate::workbook::xlsx::{CellRange, Worksheet};

pub const SHEET_NAME: &str = "Area Status Board";

const HEADERS: &[&str] = &[
    "Area",
    "Total Items",
    "Not Started",
    "In Progress",
    "Complete",
    "Other",
    "Completion %",
    "Colour",
];

/// Per-section status counts with defaults resolved as on the matrix.
pub fn build(ctx: &RenderContext) -> Worksheet {
    let mut sheet = Worksheet::new(SHEET_NAME);
    sheet.hide_gridlines();

    let banner = Style::new()
        .font_size(18)
        .bold()
        .font_color(PRIMARY_TITLE_COLOUR)
        .align(Horizontal::Center)
        .fill("EFF6FF");
    sheet.merge_range(CellRange::new(0, 0, 0, 7));
    sheet.write_string(0, 0, "Area status board", &banner);

    let header = Style::new()
        .bold()
        .font_color(PRIMARY_TITLE_COLOUR)
        .align(Horizontal::Center)
        .valign(Vertical::Center)
        .fill("E5ECF8")
        .border();
    for (col, label) in HEADERS.iter().enumerate() {
        sheet.write_string(1, col as u16, label, &header);
    }

    let centered = Style::new().border().align(Horizontal::Center);
    let tallies = area_tallies(ctx.bundle, &ctx.fallback_status);
    let mut row: u32 = 2;
    for tally in &tallies {
        let area = ctx.sections.get_or(&tally.title, neutral(PRIMARY_TITLE_COLOUR));
        let title_style = Style::new()
            .bold()
            .font_color(area.text)
            .fill(area.fill)
            .border()
            .align(Horizontal::Left);
        write_text(&mut sheet, row, 0, &tally.title, &title_style);

        let counts = [
            tally.total,
            tally.not_started,
            tally.in_progress,
            tally.complete,
            tally.other(),
        ];
        for (i, count) in counts.iter().enumerate() {
            sheet.write_number(row, 1 + i as u16, *count as f64, &centered);
        }
        sheet.write_string(row, 6, &format!("{}%", tally.percent()), &centered);
        sheet.write_blank(row, 7, &centered.clone().fill(area.fill));

        sheet.set_row_height(row, 22.0);
        row += 1;
    }

    sheet.freeze_panes(2, 0);
    if tallies.is_empty() {
        return sheet;
    }

    sheet.autofilter(CellRange::new(1, 0, row - 1, 7));
    set_widths(&mut sheet, &[30.0, 14.0, 16.0, 16.0, 16.0, 14.0, 16.0, 12.0]);
    sheet
}
