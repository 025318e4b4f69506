use regex::Regex;

use crate::error::ChecklistError;
use crate::extraction::PageContent;
use crate::layout::schema::BoilerplateDef;

/// Flatten extracted pages into normalized lines, dropping boilerplate.
///
/// Every line is trimmed and its whitespace runs collapsed. Empty lines are
/// kept as boundary markers, and a page with no text contributes a single
/// empty line.
pub fn clean_lines(
    pages: &[PageContent],
    boilerplate: &BoilerplateDef,
) -> Result<Vec<String>, ChecklistError> {
    let page_marker = Regex::new(&boilerplate.page_marker).map_err(|e| {
        ChecklistError::LayoutInvalid(format!("page_marker is not a valid pattern: {e}"))
    })?;

    let mut cleaned = Vec::new();
    let mut dropped = 0usize;

    for page in pages {
        if page.lines.is_empty() {
            cleaned.push(String::new());
            continue;
        }

        for raw in &page.lines {
            let line = collapse_whitespace(raw);
            if line.is_empty() {
                cleaned.push(line);
                continue;
            }
            if is_boilerplate(&line, &page_marker, boilerplate) {
                dropped += 1;
                continue;
            }
            cleaned.push(line);
        }
    }

    tracing::debug!(
        lines = cleaned.len(),
        dropped,
        "normalized extracted lines"
    );

    Ok(cleaned)
}

fn is_boilerplate(line: &str, page_marker: &Regex, boilerplate: &BoilerplateDef) -> bool {
    let upper = line.to_uppercase();
    if page_marker.is_match(&upper) {
        return true;
    }
    if boilerplate
        .prefixes
        .iter()
        .any(|prefix| upper.starts_with(prefix.as_str()))
    {
        return true;
    }
    boilerplate.exact_lines.iter().any(|exact| exact == line)
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::builtin::default_layout;

    fn page(number: usize, lines: &[&str]) -> PageContent {
        PageContent {
            page_number: number,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        let layout = default_layout().unwrap();
        let lines = clean_lines(
            &[page(1, &["   Clock   on \t at the  kiosk  "])],
            &layout.boilerplate,
        )
        .unwrap();
        assert_eq!(lines, vec!["Clock on at the kiosk"]);
    }

    #[test]
    fn test_boilerplate_dropped() {
        let layout = default_layout().unwrap();
        let lines = clean_lines(
            &[page(
                1,
                &[
                    "Welcome to PGR",
                    "PGR Competency Checklist",
                    "NAME: ____________",
                    "Date: ____",
                    "3 | P A G E",
                    "12 | p a g e",
                    "09/11/24 PP",
                    "BARS",
                ],
            )],
            &layout.boilerplate,
        )
        .unwrap();
        assert_eq!(lines, vec!["BARS"]);
    }

    #[test]
    fn test_empty_lines_preserved() {
        let layout = default_layout().unwrap();
        let lines = clean_lines(
            &[page(1, &["FLOOR", "   ", "Greet guests"])],
            &layout.boilerplate,
        )
        .unwrap();
        assert_eq!(lines, vec!["FLOOR", "", "Greet guests"]);
    }

    #[test]
    fn test_blank_page_contributes_boundary() {
        let layout = default_layout().unwrap();
        let lines = clean_lines(
            &[page(1, &["FLOOR"]), page(2, &[]), page(3, &["Greet guests"])],
            &layout.boilerplate,
        )
        .unwrap();
        assert_eq!(lines, vec!["FLOOR", "", "Greet guests"]);
    }

    #[test]
    fn test_revision_stamp_requires_exact_match() {
        let layout = default_layout().unwrap();
        let lines = clean_lines(
            &[page(1, &["09/11/24 PP review"])],
            &layout.boilerplate,
        )
        .unwrap();
        assert_eq!(lines, vec!["09/11/24 PP review"]);
    }
}
