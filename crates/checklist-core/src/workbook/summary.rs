//! Per-person and per-area tallies shown on the summary sheets.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::{Bundle, ChecklistItem, Person, TemplateSection};
use crate::workbook::palette::preset_status_options;

pub const NOT_STARTED: &str = "Not Started";
pub const IN_PROGRESS: &str = "In Progress";
pub const COMPLETE: &str = "Complete";

/// `round(100 * completed / total)` with ties to even; 0 when `total` is 0.
pub fn completion_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let ratio = Decimal::from(completed as u64) * Decimal::ONE_HUNDRED / Decimal::from(total as u64);
    ratio
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_u32()
        .unwrap_or(0)
}

/// The template's status options, or the preset trio when it lists none.
pub fn effective_status_options(bundle: &Bundle) -> Vec<String> {
    if bundle.template.status_options.is_empty() {
        preset_status_options()
    } else {
        bundle.template.status_options.clone()
    }
}

/// Status shown for items nobody has recorded and that carry no default.
pub fn fallback_status(bundle: &Bundle, status_options: &[String]) -> String {
    bundle
        .dataset
        .default_str("defaultStatus")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| status_options.first().cloned())
        .unwrap_or_else(|| NOT_STARTED.to_string())
}

/// Recorded status, else the item's default, else `fallback`.
pub fn resolve_status<'a>(person: &'a Person, item: &'a ChecklistItem, fallback: &'a str) -> &'a str {
    person
        .recorded_status(&item.id)
        .or_else(|| item.default_status.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or(fallback)
}

/// Completed items out of the section total, displayed as `"c / t"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRatio {
    pub completed: usize,
    pub total: usize,
}

impl fmt::Display for SectionRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.completed, self.total)
    }
}

/// One row of the Progress Summary sheet.
///
/// Only explicitly recorded statuses are counted; defaults are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonProgress {
    pub name: String,
    pub sections: Vec<SectionRatio>,
    pub not_started: usize,
    pub in_progress: usize,
    pub complete: usize,
    pub percent: u32,
}

pub fn person_progress(person: &Person, sections: &[TemplateSection]) -> PersonProgress {
    let mut recorded: HashMap<&str, usize> = HashMap::new();
    let mut ratios = Vec::with_capacity(sections.len());
    let mut total_items = 0;
    let mut total_completed = 0;

    for section in sections {
        let mut completed = 0;
        for item in &section.items {
            if let Some(status) = person.recorded_status(&item.id) {
                *recorded.entry(status).or_default() += 1;
                if status == COMPLETE {
                    completed += 1;
                }
            }
        }
        total_items += section.items.len();
        total_completed += completed;
        ratios.push(SectionRatio {
            completed,
            total: section.items.len(),
        });
    }

    let count = |status: &str| recorded.get(status).copied().unwrap_or(0);
    PersonProgress {
        name: person.name.clone().unwrap_or_default(),
        not_started: count(NOT_STARTED),
        in_progress: count(IN_PROGRESS),
        complete: count(COMPLETE),
        percent: completion_percent(total_completed, total_items),
        sections: ratios,
    }
}

/// Resolved status counts for one section across every person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaTally {
    pub title: String,
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub complete: usize,
}

impl AreaTally {
    /// Statuses outside the preset trio.
    pub fn other(&self) -> usize {
        self.total - (self.not_started + self.in_progress + self.complete)
    }

    pub fn percent(&self) -> u32 {
        completion_percent(self.complete, self.total)
    }
}

pub fn area_tallies(bundle: &Bundle, fallback: &str) -> Vec<AreaTally> {
    bundle
        .template
        .sections
        .iter()
        .map(|section| {
            let mut tally = AreaTally {
                title: section.title.clone(),
                total: 0,
                not_started: 0,
                in_progress: 0,
                complete: 0,
            };
            for person in &bundle.dataset.people {
                for item in &section.items {
                    tally.total += 1;
                    match resolve_status(person, item, fallback) {
                        NOT_STARTED => tally.not_started += 1,
                        IN_PROGRESS => tally.in_progress += 1,
                        COMPLETE => tally.complete += 1,
                        _ => {}
                    }
                }
            }
            tally
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CompetencyRecord;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn item(id: &str, default_status: Option<&str>) -> ChecklistItem {
        ChecklistItem {
            id: id.into(),
            label: id.into(),
            default_status: default_status.map(str::to_string),
            description: None,
        }
    }

    fn person(statuses: &[(&str, &str)]) -> Person {
        let mut person = Person {
            name: Some("Sam".into()),
            ..Default::default()
        };
        for (id, status) in statuses {
            person.competencies.insert(
                id.to_string(),
                CompetencyRecord {
                    status: Some(status.to_string()),
                    ..Default::default()
                },
            );
        }
        person
    }

    #[test]
    fn test_completion_percent() {
        assert_eq!(completion_percent(3, 4), 75);
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(4, 4), 100);
        assert_eq!(completion_percent(2, 3), 67);
    }

    #[test]
    fn test_completion_percent_ties_round_to_even() {
        // 12.5 -> 12, 37.5 -> 38
        assert_eq!(completion_percent(1, 8), 12);
        assert_eq!(completion_percent(3, 8), 38);
        // 0.5 -> 0
        assert_eq!(completion_percent(1, 200), 0);
    }

    #[test]
    fn test_person_progress_three_of_four() {
        let sections = vec![TemplateSection {
            title: "Bars".into(),
            description: None,
            items: vec![item("a", None), item("b", None), item("c", None), item("d", None)],
        }];
        let sam = person(&[("a", COMPLETE), ("b", COMPLETE), ("c", COMPLETE), ("d", IN_PROGRESS)]);
        let progress = person_progress(&sam, &sections);
        assert_eq!(progress.sections[0].to_string(), "3 / 4");
        assert_eq!(progress.percent, 75);
        assert_eq!(progress.complete, 3);
        assert_eq!(progress.in_progress, 1);
        assert_eq!(progress.not_started, 0);
    }

    #[test]
    fn test_person_progress_ignores_defaults() {
        let sections = vec![TemplateSection {
            title: "Floor".into(),
            description: None,
            items: vec![item("a", Some(NOT_STARTED)), item("b", Some(NOT_STARTED))],
        }];
        let progress = person_progress(&person(&[("a", "")]), &sections);
        assert_eq!(progress.not_started, 0);
        assert_eq!(progress.sections[0], SectionRatio { completed: 0, total: 2 });
    }

    #[test]
    fn test_resolve_status_chain() {
        let sam = person(&[("a", COMPLETE)]);
        assert_eq!(resolve_status(&sam, &item("a", Some(NOT_STARTED)), "X"), COMPLETE);
        assert_eq!(resolve_status(&sam, &item("b", Some(IN_PROGRESS)), "X"), IN_PROGRESS);
        assert_eq!(resolve_status(&sam, &item("c", None), "X"), "X");
    }

    #[test]
    fn test_fallback_status_sources() {
        let mut bundle = Bundle::default();
        let options = effective_status_options(&bundle);
        assert_eq!(options, vec![NOT_STARTED, IN_PROGRESS, COMPLETE]);
        assert_eq!(fallback_status(&bundle, &options), NOT_STARTED);

        let custom = vec!["Pending".to_string()];
        assert_eq!(fallback_status(&bundle, &custom), "Pending");

        bundle.dataset.defaults.insert("defaultStatus".into(), json!("In Progress"));
        assert_eq!(fallback_status(&bundle, &custom), IN_PROGRESS);
    }

    #[test]
    fn test_area_tallies() {
        let mut bundle = Bundle::default();
        bundle.template.sections = vec![TemplateSection {
            title: "Bars".into(),
            description: None,
            items: vec![item("a", None), item("b", Some(IN_PROGRESS)), item("c", None)],
        }];
        bundle.dataset.people = vec![
            person(&[("a", COMPLETE), ("c", "Waived")]),
            person(&[("a", COMPLETE)]),
        ];
        let tallies = area_tallies(&bundle, NOT_STARTED);
        let bars = &tallies[0];
        assert_eq!(bars.total, 6);
        assert_eq!(bars.complete, 2);
        assert_eq!(bars.in_progress, 2);
        assert_eq!(bars.not_started, 1);
        assert_eq!(bars.other(), 1);
        assert_eq!(bars.percent(), 33);
    }

    #[test]
    fn test_area_tallies_without_people() {
        let mut bundle = Bundle::default();
        bundle.template.sections = vec![TemplateSection {
            title: "Floor".into(),
            description: None,
            items: vec![item("a", None)],
        }];
        let tallies = area_tallies(&bundle, NOT_STARTED);
        assert_eq!(tallies[0].total, 0);
        assert_eq!(tallies[0].percent(), 0);
    }
}
