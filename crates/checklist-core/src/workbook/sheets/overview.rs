use crate::workbook::palette::{
    neutral, MILESTONE_HEADER_FILL, MILESTONE_TEXT_COLOUR, OVERVIEW_HEADER_FILL,
    PRIMARY_TITLE_COLOUR, SECONDARY_TEXT_COLOUR,
};
use crate::workbook::sheets::{set_widths, write_text, RenderContext};
use crate::workbook::style::{Horizontal, Style, Vertical};
use crate::workbook::xlsx::{CellRange, Worksheet};

pub const SHEET_NAME: &str = "Overview";

const INSTRUCTIONS: &[&str] = &[
    "Review the Competency Matrix tab to track each team member's progress.",
    "Update the Status column using the drop-down menu for each competency.",
    "Record completion dates and any coaching notes for full transparency.",
    "Use the TM checklist and sign-off columns to capture verification at key milestones.",
    "Refer to the Progress Summary and Area Status Board tabs for at-a-glance completion metrics.",
];

const DEFAULT_FOCUS: &str = "Capture notes about where this training happens and who supports it.";
const CUSTOM_STATUS_MEANING: &str = "Custom status used by your venue.";

const STATUS_MEANINGS: &[(&str, &str)] = &[
    ("Not Started", "Training not yet scheduled."),
    ("In Progress", "Shadowing, buddy shifts or partial completion."),
    ("Complete", "TM demonstrated competency and has been signed off."),
];

const MILESTONES: &[[&str; 4]] = &[
    ["First shift", "Buddy shift, venue tour and basics", "Trainer", "TM checklist updated"],
    ["Week 2", "Core tasks performed with supervision", "Mentor", "Coaching notes captured"],
    ["30 days", "Confident in primary outlet", "Venue Manager", "TM sign-off"],
    ["60 days", "Cross-trained in secondary areas", "Venue Manager", "Manager sign-off"],
    ["90 days", "Ready for independent shifts", "Leadership", "Celebration + follow-up"],
];

/// Row (zero-based) of the area palette header.
const PALETTE_HEADER_ROW: u32 = 10;

pub fn build(ctx: &RenderContext) -> Worksheet {
    let mut sheet = Worksheet::new(SHEET_NAME);
    sheet.hide_gridlines();
    let template = &ctx.bundle.template;

    let banner = Style::new()
        .font_size(22)
        .bold()
        .font_color(PRIMARY_TITLE_COLOUR)
        .align(Horizontal::Center)
        .fill(OVERVIEW_HEADER_FILL);
    sheet.merge_range(CellRange::new(0, 0, 0, 6));
    sheet.write_string(0, 0, &template.title, &banner);

    let subtitle = Style::new()
        .font_size(11)
        .font_color(SECONDARY_TEXT_COLOUR)
        .align(Horizontal::Center);
    sheet.merge_range(CellRange::new(1, 0, 1, 6));
    sheet.write_string(
        1,
        0,
        &format!(
            "Version {} | Dataset updated {}",
            template.version, ctx.bundle.dataset.updated
        ),
        &subtitle,
    );

    sheet.write_string(3, 0, "How to use this workbook", &heading());
    let bullet = Style::new().font_size(11).align(Horizontal::Left);
    for (i, line) in INSTRUCTIONS.iter().enumerate() {
        sheet.write_string(4 + i as u32, 0, &format!("• {line}"), &bullet);
    }

    write_area_palette(&mut sheet, ctx, PALETTE_HEADER_ROW);

    let legend_row = PALETTE_HEADER_ROW + template.sections.len() as u32 + 4;
    write_status_legend(&mut sheet, ctx, legend_row);

    let timeline_row = legend_row + ctx.status_options.len() as u32 + 4;
    write_milestone_timeline(&mut sheet, timeline_row);

    set_widths(&mut sheet, &[32.0, 42.0, 26.0, 22.0, 22.0, 18.0, 18.0]);
    sheet
}

fn heading() -> Style {
    Style::new()
        .font_size(14)
        .bold()
        .font_color(PRIMARY_TITLE_COLOUR)
}

fn table_header(fill: &str) -> Style {
    Style::new()
        .bold()
        .font_color(PRIMARY_TITLE_COLOUR)
        .align(Horizontal::Center)
        .valign(Vertical::Center)
        .fill(fill)
        .border()
}

fn write_area_palette(sheet: &mut Worksheet, ctx: &RenderContext, header_row: u32) {
    sheet.write_string(header_row - 1, 0, "Area colour palette", &heading());

    let header = table_header("EDF2FF");
    for (col, label) in ["Area", "Focus", "Colour"].iter().enumerate() {
        sheet.write_string(header_row, col as u16, label, &header);
    }

    let title_style = Style::new().bold().font_color(PRIMARY_TITLE_COLOUR).border();
    let focus_style = Style::new().wrap().valign(Vertical::Top).border();

    let mut row = header_row + 1;
    for section in &ctx.bundle.template.sections {
        if section.title.is_empty() {
            continue;
        }
        let colours = ctx
            .sections
            .get_or(&section.title, neutral(PRIMARY_TITLE_COLOUR));
        let focus = section.description.as_deref().unwrap_or(DEFAULT_FOCUS);

        sheet.write_string(row, 0, &section.title, &title_style);
        write_text(sheet, row, 1, focus, &focus_style);
        sheet.write_blank(row, 2, &Style::new().fill(colours.fill).border());
        row += 1;
    }
}

fn write_status_legend(sheet: &mut Worksheet, ctx: &RenderContext, header_row: u32) {
    sheet.write_string(header_row - 1, 0, "Status legend", &heading());

    let header = table_header("E9EDF5");
    sheet.write_string(header_row, 0, "Status", &header);
    sheet.write_string(header_row, 1, "Meaning", &header);

    let meaning_style = Style::new().border().wrap();
    for (i, (status, fill)) in ctx.status_fills.iter().enumerate() {
        let row = header_row + 1 + i as u32;
        let meaning = STATUS_MEANINGS
            .iter()
            .find(|(known, _)| *known == status.as_str())
            .map(|(_, meaning)| *meaning)
            .unwrap_or(CUSTOM_STATUS_MEANING);
        sheet.write_string(row, 0, status, &Style::new().border().fill(fill));
        sheet.write_string(row, 1, meaning, &meaning_style);
    }
}

fn write_milestone_timeline(sheet: &mut Worksheet, header_row: u32) {
    sheet.write_string(header_row - 1, 0, "Milestone timeline", &heading());

    let header = Style::new()
        .bold()
        .font_color(MILESTONE_TEXT_COLOUR)
        .align(Horizontal::Center)
        .valign(Vertical::Center)
        .fill(MILESTONE_HEADER_FILL)
        .border();
    for (col, label) in ["Milestone", "Focus", "Owner", "Evidence"].iter().enumerate() {
        sheet.write_string(header_row, col as u16, label, &header);
    }

    let cell = Style::new().border().wrap().valign(Vertical::Top);
    for (i, milestone) in MILESTONES.iter().enumerate() {
        let row = header_row + 1 + i as u32;
        for (col, text) in milestone.iter().enumerate() {
            sheet.write_string(row, col as u16, text, &cell);
        }
    }
}
