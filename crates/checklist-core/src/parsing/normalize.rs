use regex::Regex;
use std::sync::LazyLock;

static TRAILING_NA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+NA$").expect("static pattern"));
static EN_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*–\s*").expect("static pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Normalize checklist item text.
///
/// Steps:
/// 1. Trim
/// 2. Drop a trailing " NA" column marker (any case)
/// 3. Replace en-dashes with " - "
/// 4. Collapse whitespace runs
/// 5. Trim again
pub fn normalize_item_text(text: &str) -> String {
    let text = text.trim();
    let text = TRAILING_NA.replace(text, "");
    let text = EN_DASH.replace_all(&text, " - ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(normalize_item_text("Greet guests"), "Greet guests");
    }

    #[test]
    fn test_trailing_na_stripped() {
        assert_eq!(normalize_item_text("Restock ice NA"), "Restock ice");
        assert_eq!(normalize_item_text("Restock ice   na"), "Restock ice");
    }

    #[test]
    fn test_na_inside_word_kept() {
        assert_eq!(normalize_item_text("Check the banana"), "Check the banana");
        assert_eq!(normalize_item_text("NA"), "NA");
    }

    #[test]
    fn test_en_dash_normalized() {
        assert_eq!(
            normalize_item_text("Bepoz Cash Handling–Till Reconciliation"),
            "Bepoz Cash Handling - Till Reconciliation"
        );
        assert_eq!(
            normalize_item_text("Floor  –  sections"),
            "Floor - sections"
        );
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(
            normalize_item_text("  Maintain   cleanliness\tof areas  "),
            "Maintain cleanliness of areas"
        );
    }
}
