use crate::workbook::palette::colours;
use crate::workbook::sheets::{set_widths, write_text, RenderContext};
use crate::workbook::style::{Horizontal, Style, Vertical};
use crate::workbook::summary::person_progress;
use crate::workbook::xlsx::{CellRange, CellRule, ConditionalFormat, Worksheet};

pub const SHEET_NAME: &str = "Progress Summary";

const TRAILING_HEADERS: &[&str] = &["Not Started", "In Progress", "Complete", "Overall %", "Last Updated"];
const SUMMARY_FILL: &str = "334155";

pub fn build(ctx: &RenderContext) -> Worksheet {
    let mut sheet = Worksheet::new(SHEET_NAME);
    sheet.hide_gridlines();
    let sections = &ctx.bundle.template.sections;

    let mut headers: Vec<(&str, Style)> = Vec::with_capacity(sections.len() + 6);
    let summary_header = Style::new().bold().font_color("FFFFFF").fill(SUMMARY_FILL);
    headers.push(("Team Member", summary_header.clone()));
    for section in sections {
        let area = ctx.sections.get_or(&section.title, colours("1F2933", "FFFFFF"));
        headers.push((section.title.as_str(), Style::new().bold().font_color(area.text).fill(area.fill)));
    }
    for label in TRAILING_HEADERS {
        headers.push((*label, summary_header.clone()));
    }
    for (col, (label, style)) in headers.iter().enumerate() {
        let style = style
            .clone()
            .align(Horizontal::Center)
            .valign(Vertical::Center)
            .border();
        write_text(&mut sheet, 0, col as u16, label, &style);
    }

    let name_style = Style::new().border().align(Horizontal::Left).valign(Vertical::Center);
    let cell_style = Style::new().border().align(Horizontal::Center).valign(Vertical::Center);
    let updated = &ctx.bundle.dataset.updated;

    for (i, person) in ctx.bundle.dataset.people.iter().enumerate() {
        let row = 1 + i as u32;
        let progress = person_progress(person, sections);

        write_text(&mut sheet, row, 0, &progress.name, &name_style);
        let mut col: u16 = 1;
        for ratio in &progress.sections {
            sheet.write_string(row, col, &ratio.to_string(), &cell_style);
            col += 1;
        }
        for count in [progress.not_started, progress.in_progress, progress.complete] {
            sheet.write_number(row, col, count as f64, &cell_style);
            col += 1;
        }
        sheet.write_string(row, col, &format!("{}%", progress.percent), &cell_style);
        write_text(&mut sheet, row, col + 1, updated, &cell_style);
    }

    sheet.freeze_panes(1, 0);

    let people = ctx.bundle.dataset.people.len() as u32;
    if people > 0 {
        let percent_col = headers.len() as u16 - 2;
        let range = CellRange::column(percent_col, 1, people);
        for (rule, fill) in [
            (CellRule::GreaterThanOrEqual("90".into()), "D4EDDA"),
            (CellRule::Between("60".into(), "89".into()), "FFF3CD"),
            (CellRule::LessThan("60".into()), "F8D7DA"),
        ] {
            sheet.add_conditional_format(ConditionalFormat {
                range,
                rule,
                fill: fill.to_string(),
            });
        }
    }

    set_widths(&mut sheet, &[26.0, 22.0, 22.0, 22.0, 16.0, 16.0, 16.0, 16.0]);
    sheet
}
