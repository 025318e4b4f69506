use crate::workbook::palette::colours;
use crate::workbook::sheets::{set_widths, write_text, RenderContext};
use crate::workbook::style::{Horizontal, Style, Vertical};
use crate::workbook::summary::resolve_status;
use crate::workbook::xlsx::{CellRange, CellRule, ConditionalFormat, DataValidation, Worksheet};

pub const SHEET_NAME: &str = "Competency Matrix";

pub const HEADERS: &[&str] = &[
    "Team Member",
    "Staff ID",
    "Role",
    "Assigned Mentor",
    "Start Date",
    "Area",
    "Competency",
    "Details",
    "Status",
    "TM Checklist",
    "Completed On",
    "Coaching Notes",
    "Trainer",
    "TM Sign-Off",
    "Manager Sign-Off",
    "Follow-up Date",
];

const WIDTHS: &[f64] = &[
    22.0, 12.0, 20.0, 20.0, 14.0, 24.0, 34.0, 48.0, 16.0, 14.0, 16.0, 32.0, 18.0, 18.0, 18.0, 16.0,
];

pub const CHECKBOX_OPTIONS: &[&str] = &["☐ Pending", "☑ Complete"];
pub const SIGN_OFF_OPTIONS: &[&str] = &["☐ Awaiting", "☑ Signed"];

const HEADER_FILL: &str = "1F2933";
const DATE_FORMAT: &str = "dd mmm yyyy";
const ROW_HEIGHT: f64 = 24.0;

const COL_AREA: u16 = 5;
const COL_DETAILS: u16 = 7;
const COL_STATUS: u16 = 8;
const COL_CHECKLIST: u16 = 9;
const COL_COMPLETED_ON: u16 = 10;
const COL_NOTES: u16 = 11;
const COL_TRAINER: u16 = 12;
const COL_TM_SIGN_OFF: u16 = 13;
const COL_MANAGER_SIGN_OFF: u16 = 14;
const COL_FOLLOW_UP: u16 = 15;

/// One row per (person, section, item).
pub fn build(ctx: &RenderContext) -> Worksheet {
    let mut sheet = Worksheet::new(SHEET_NAME);
    sheet.hide_gridlines();

    let header = Style::new()
        .bold()
        .font_color("FFFFFF")
        .fill(HEADER_FILL)
        .align(Horizontal::Center)
        .valign(Vertical::Center)
        .border();
    for (col, label) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, label, &header);
    }

    let dataset = &ctx.bundle.dataset;
    let mut row: u32 = 1;
    for person in &dataset.people {
        let person_notes = person.notes.as_deref().unwrap_or_default();
        let identity = [
            person.name.clone().unwrap_or_default(),
            person.staff_id.clone().unwrap_or_default(),
            with_default(&person.role, ctx, "role"),
            with_default(&person.mentor, ctx, "mentor"),
            with_default(&person.start_date_display, ctx, "startDateDisplay"),
        ];

        for section in &ctx.bundle.template.sections {
            let area = ctx.sections.get_or(&section.title, colours("F8FAFC", HEADER_FILL));
            let area_style = column_style(COL_AREA)
                .fill(area.fill)
                .bold()
                .font_color(area.text);

            for item in &section.items {
                let record = person.competency(&item.id);
                let status = resolve_status(person, item, &ctx.fallback_status);
                let completed_on = record.and_then(|r| r.completed_on.as_deref()).unwrap_or_default();
                let item_notes = record.and_then(|r| r.notes.as_deref()).unwrap_or_default();
                let trainer = record.and_then(|r| r.trainer.as_deref()).unwrap_or_default();
                let notes = join_notes(person_notes, item_notes);

                let values: [&str; 16] = [
                    &identity[0],
                    &identity[1],
                    &identity[2],
                    &identity[3],
                    &identity[4],
                    &section.title,
                    &item.label,
                    item.description.as_deref().unwrap_or_default(),
                    status,
                    CHECKBOX_OPTIONS[0],
                    completed_on,
                    &notes,
                    trainer,
                    "",
                    "",
                    "",
                ];
                for (col, value) in values.iter().enumerate() {
                    let col = col as u16;
                    let style = if col == COL_AREA {
                        area_style.clone()
                    } else {
                        column_style(col)
                    };
                    write_text(&mut sheet, row, col, value, &style);
                }
                sheet.set_row_height(row, ROW_HEIGHT);
                row += 1;
            }
        }
    }

    set_widths(&mut sheet, WIDTHS);
    sheet.freeze_panes(1, 0);

    let last_col = HEADERS.len() as u16 - 1;
    let last_row = row.saturating_sub(1);
    sheet.autofilter(CellRange::new(0, 0, last_row, last_col));

    if row > 1 {
        add_validations(&mut sheet, ctx, last_row);
    }
    sheet
}

fn add_validations(sheet: &mut Worksheet, ctx: &RenderContext, last_row: u32) {
    let column = |col| CellRange::column(col, 1, last_row);
    let status_range = column(COL_STATUS);

    sheet.add_data_validation(DataValidation::list(ctx.status_options.as_slice(), vec![status_range]));
    sheet.add_data_validation(DataValidation::list(
        CHECKBOX_OPTIONS,
        vec![column(COL_CHECKLIST)],
    ));
    sheet.add_data_validation(DataValidation::list(
        SIGN_OFF_OPTIONS,
        vec![column(COL_TM_SIGN_OFF), column(COL_MANAGER_SIGN_OFF)],
    ));
    for col in [COL_COMPLETED_ON, COL_FOLLOW_UP] {
        sheet.add_data_validation(DataValidation::date_after(2020, 1, 1, vec![column(col)]));
    }

    for (status, fill) in &ctx.status_fills {
        sheet.add_conditional_format(ConditionalFormat {
            range: status_range,
            rule: CellRule::equal_text(status),
            fill: fill.to_string(),
        });
    }
}

fn column_style(col: u16) -> Style {
    let base = Style::new().border();
    match col {
        COL_AREA => base.align(Horizontal::Center).valign(Vertical::Center),
        COL_DETAILS | COL_NOTES => base.wrap().valign(Vertical::Top),
        COL_STATUS => base.align(Horizontal::Center),
        COL_COMPLETED_ON | COL_FOLLOW_UP => base
            .number_format(DATE_FORMAT)
            .align(Horizontal::Center)
            .valign(Vertical::Center),
        COL_CHECKLIST | COL_TRAINER | COL_TM_SIGN_OFF | COL_MANAGER_SIGN_OFF => {
            base.align(Horizontal::Center).valign(Vertical::Center)
        }
        _ => base.valign(Vertical::Center),
    }
}

fn with_default(value: &Option<String>, ctx: &RenderContext, key: &str) -> String {
    match value {
        Some(value) => value.clone(),
        None => ctx
            .bundle
            .dataset
            .default_str(key)
            .unwrap_or_default()
            .to_string(),
    }
}

/// Person-level notes then item notes, separated by a blank line.
pub fn join_notes(person_notes: &str, item_notes: &str) -> String {
    [person_notes, item_notes]
        .iter()
        .filter(|n| !n.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bundle, ChecklistItem, CompetencyRecord, Person, TemplateSection};
    use crate::workbook::xlsx::{CellValue, ValidationRule};
    use serde_json::json;

    fn text(sheet: &Worksheet, row: u32, col: u16) -> String {
        match sheet.cell(row, col).map(|c| &c.value) {
            Some(CellValue::Text(t)) => t.clone(),
            _ => String::new(),
        }
    }

    fn bundle() -> Bundle {
        let mut bundle = Bundle::default();
        bundle.template.status_options =
            vec!["Not Started".into(), "In Progress".into(), "Complete".into()];
        bundle.template.sections = vec![TemplateSection {
            title: "Bars".into(),
            description: Some(String::new()),
            items: vec![
                ChecklistItem {
                    id: "stock-fridge".into(),
                    label: "Stock the fridge".into(),
                    default_status: Some("Not Started".into()),
                    description: None,
                },
                ChecklistItem {
                    id: "close-bar".into(),
                    label: "Close the bar".into(),
                    default_status: None,
                    description: Some("End of night".into()),
                },
            ],
        }];
        bundle.dataset.defaults.insert("role".into(), json!("Private Gaming Host"));
        bundle.dataset.defaults.insert("defaultStatus".into(), json!("In Progress"));

        let mut sam = Person {
            name: Some("Sam".into()),
            notes: Some("Prefers late shifts".into()),
            ..Default::default()
        };
        sam.competencies.insert(
            "stock-fridge".into(),
            CompetencyRecord {
                status: Some("Complete".into()),
                completed_on: Some("2024-11-20".into()),
                notes: Some("Quick learner".into()),
                trainer: Some("Alex".into()),
            },
        );
        bundle.dataset.people = vec![sam];
        bundle
    }

    #[test]
    fn test_header_row() {
        let bundle = bundle();
        let sheet = build(&RenderContext::new(&bundle));
        assert_eq!(text(&sheet, 0, 0), "Team Member");
        assert_eq!(text(&sheet, 0, 15), "Follow-up Date");
    }

    #[test]
    fn test_rows_resolve_status_and_defaults() {
        let bundle = bundle();
        let sheet = build(&RenderContext::new(&bundle));

        assert_eq!(text(&sheet, 1, 0), "Sam");
        assert_eq!(text(&sheet, 1, 2), "Private Gaming Host");
        assert_eq!(text(&sheet, 1, COL_AREA), "Bars");
        assert_eq!(text(&sheet, 1, COL_STATUS), "Complete");
        assert_eq!(text(&sheet, 1, COL_CHECKLIST), "☐ Pending");
        assert_eq!(text(&sheet, 1, COL_COMPLETED_ON), "2024-11-20");
        assert_eq!(text(&sheet, 1, COL_NOTES), "Prefers late shifts\n\nQuick learner");
        assert_eq!(text(&sheet, 1, COL_TRAINER), "Alex");

        // No recorded status and no item default: dataset default applies.
        assert_eq!(text(&sheet, 2, COL_STATUS), "In Progress");
        assert_eq!(text(&sheet, 2, COL_DETAILS), "End of night");
        assert_eq!(text(&sheet, 2, COL_NOTES), "Prefers late shifts");
        assert_eq!(sheet.last_row(), Some(2));
    }

    #[test]
    fn test_validations_when_rows_exist() {
        let bundle = bundle();
        let sheet = build(&RenderContext::new(&bundle));
        let validations = sheet.data_validations();
        assert_eq!(validations.len(), 5);
        assert_eq!(validations[0].ranges[0].to_string(), "I2:I3");
        assert!(matches!(&validations[1].rule, ValidationRule::List(o) if o[1] == "☑ Complete"));
        assert_eq!(validations[2].ranges.len(), 2);
        assert!(matches!(validations[3].rule, ValidationRule::DateAfter { year: 2020, .. }));
        assert_eq!(sheet.conditional_formats().len(), 3);
    }

    #[test]
    fn test_no_people_no_validations() {
        let mut bundle = bundle();
        bundle.dataset.people.clear();
        let sheet = build(&RenderContext::new(&bundle));
        assert!(sheet.data_validations().is_empty());
        assert!(sheet.conditional_formats().is_empty());
        assert_eq!(sheet.last_row(), Some(0));
    }

    #[test]
    fn test_join_notes() {
        assert_eq!(join_notes("", ""), "");
        assert_eq!(join_notes("a", ""), "a");
        assert_eq!(join_notes("", "b"), "b");
        assert_eq!(join_notes("a", "b"), "a\n\nb");
    }
}
