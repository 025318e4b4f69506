use std::collections::BTreeSet;

/// Decide whether `current` continues the buffered item line `previous`.
///
/// Both lines are already normalized and non-empty; empty lines never reach
/// here because they always end the item.
pub fn should_continue(previous: &str, current: &str, suffixes: &BTreeSet<String>) -> bool {
    if previous.is_empty() {
        return false;
    }
    let Some(first) = current.chars().next() else {
        return false;
    };

    // Wrapped sentence or a bracketed aside.
    if first == '(' || first.is_lowercase() {
        return true;
    }

    let words: Vec<&str> = previous.split_whitespace().collect();
    if let Some(last) = words.last() {
        if suffixes.contains(&last.to_lowercase()) {
            return true;
        }
    }

    let current_words = current.split_whitespace().count();

    // "between X and Y" pairs wrap their tail onto a short line.
    if words.iter().any(|w| w.to_lowercase() == "between") && current_words <= 2 {
        return true;
    }

    // A lone uppercase word is a wrapped acronym or tag.
    current_words == 1 && current.to_uppercase() == current
}

/// True when every token of the line is a stray column header or venue tag.
pub fn is_skip_line(line: &str, skip_tokens: &BTreeSet<String>) -> bool {
    let upper = line.to_uppercase();
    let mut tokens = upper.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return false;
    }
    tokens.all(|t| skip_tokens.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffixes() -> BTreeSet<String> {
        ["and", "of", "the", "for", "to", "with", "on", "into", "between", "from", "all"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn skip_tokens() -> BTreeSet<String> {
        ["TRAINER", "SUPERVISOR", "OASIS", "S"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_lowercase_start_continues() {
        assert!(should_continue("Check the float", "before opening", &suffixes()));
    }

    #[test]
    fn test_bracket_start_continues() {
        assert!(should_continue("Know the tills", "(main and side bar)", &suffixes()));
    }

    #[test]
    fn test_trailing_function_word_continues() {
        assert!(should_continue("Set up the bar and", "Stock the fridge", &suffixes()));
        assert!(should_continue("Clean all surfaces WITH", "Sanitiser spray", &suffixes()));
    }

    #[test]
    fn test_between_short_tail_continues() {
        assert!(should_continue(
            "Know the difference between Red",
            "Bull drinks",
            &suffixes()
        ));
        assert!(!should_continue(
            "Know the difference between Red",
            "Serve guests at tables",
            &suffixes()
        ));
    }

    #[test]
    fn test_single_uppercase_word_continues() {
        assert!(should_continue("Log in to", "BEPOZ", &suffixes()));
        assert!(should_continue("Use the tablet for the", "POS", &suffixes()));
        assert!(should_continue("Check fridge temperature", "RSA", &suffixes()));
    }

    #[test]
    fn test_new_sentence_does_not_continue() {
        assert!(!should_continue("Greet guests at the door", "Maintain cleanliness", &suffixes()));
        assert!(!should_continue("Greet guests at the door", "Bepoz", &suffixes()));
    }

    #[test]
    fn test_empty_previous_never_continues() {
        assert!(!should_continue("", "continued text", &suffixes()));
    }

    #[test]
    fn test_skip_line_all_tokens() {
        assert!(is_skip_line("TRAINER SUPERVISOR", &skip_tokens()));
        assert!(is_skip_line("Trainer   supervisor", &skip_tokens()));
        assert!(is_skip_line("OASIS S", &skip_tokens()));
    }

    #[test]
    fn test_skip_line_mixed_tokens() {
        assert!(!is_skip_line("TRAINER sign here", &skip_tokens()));
        assert!(!is_skip_line("", &skip_tokens()));
    }
}
