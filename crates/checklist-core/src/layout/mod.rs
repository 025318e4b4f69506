pub mod builtin;
pub mod schema;

use crate::error::ChecklistError;
use regex::Regex;
use schema::LayoutProfile;
use std::path::Path;

/// Load a layout profile from a JSON file.
pub fn load_layout(path: &Path) -> Result<LayoutProfile, ChecklistError> {
    let content = std::fs::read_to_string(path).map_err(|e| ChecklistError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_layout(&content, path)
}

/// Parse a layout profile from a JSON string.
pub fn parse_layout(json: &str, source: &Path) -> Result<LayoutProfile, ChecklistError> {
    let layout: LayoutProfile =
        serde_json::from_str(json).map_err(|e| ChecklistError::LayoutLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a layout profile from a JSON string (no file path context).
pub fn parse_layout_str(json: &str) -> Result<LayoutProfile, ChecklistError> {
    let layout: LayoutProfile = serde_json::from_str(json).map_err(ChecklistError::Json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout profile is well-formed.
///
/// Headings and skip tokens are compared against uppercased text and
/// continuation suffixes against lowercased text, so tables written in the
/// wrong case would silently never match.
pub fn validate_layout(layout: &LayoutProfile) -> Result<(), ChecklistError> {
    if layout.sections.is_empty() {
        return Err(ChecklistError::LayoutInvalid(
            "sections must not be empty".into(),
        ));
    }

    for pattern in &layout.sections {
        if pattern.prefix.trim().is_empty() {
            return Err(ChecklistError::LayoutInvalid(
                "section prefix must not be empty".into(),
            ));
        }
        if pattern.title.trim().is_empty() {
            return Err(ChecklistError::LayoutInvalid(format!(
                "section '{}' has an empty title",
                pattern.prefix
            )));
        }
        if pattern.prefix != pattern.prefix.to_uppercase() {
            return Err(ChecklistError::LayoutInvalid(format!(
                "section prefix '{}' must be uppercase",
                pattern.prefix
            )));
        }
    }

    for token in &layout.skip_tokens {
        if token.is_empty() || token.contains(char::is_whitespace) {
            return Err(ChecklistError::LayoutInvalid(format!(
                "skip token '{}' must be a single word",
                token
            )));
        }
        if *token != token.to_uppercase() {
            return Err(ChecklistError::LayoutInvalid(format!(
                "skip token '{}' must be uppercase",
                token
            )));
        }
    }

    for suffix in &layout.continuation_suffixes {
        if *suffix != suffix.to_lowercase() {
            return Err(ChecklistError::LayoutInvalid(format!(
                "continuation suffix '{}' must be lowercase",
                suffix
            )));
        }
    }

    for prefix in &layout.boilerplate.prefixes {
        if *prefix != prefix.to_uppercase() {
            return Err(ChecklistError::LayoutInvalid(format!(
                "boilerplate prefix '{}' must be uppercase",
                prefix
            )));
        }
    }

    if let Err(e) = Regex::new(&layout.boilerplate.page_marker) {
        return Err(ChecklistError::LayoutInvalid(format!(
            "page_marker is not a valid pattern: {e}"
        )));
    }

    let template = &layout.bundle.template;
    if template.status_options.is_empty() {
        return Err(ChecklistError::LayoutInvalid(
            "status_options must not be empty".into(),
        ));
    }
    if !template.status_options.contains(&template.default_status) {
        return Err(ChecklistError::LayoutInvalid(format!(
            "default_status '{}' is not one of the status options ({})",
            template.default_status,
            template.status_options.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_json(sections: &str, extra: &str) -> String {
        format!(
            r#"{{
                "name": "Test",
                "version": "1.0",
                "sections": {sections},
                {extra}
                "bundle": {{
                    "name": "Test bundle",
                    "template": {{
                        "title": "Test",
                        "version": "1.0",
                        "status_options": ["Not Started", "Complete"],
                        "default_status": "Not Started"
                    }},
                    "dataset": {{ "template_version": "1.0", "updated": "2024-01-01" }}
                }}
            }}"#
        )
    }

    #[test]
    fn test_parse_valid_layout() {
        let json = layout_json(
            r#"[{ "prefix": "FLOOR", "title": "Floor" }]"#,
            r#""skip_tokens": ["TRAINER"], "continuation_suffixes": ["and"],"#,
        );
        let layout = parse_layout_str(&json).unwrap();
        assert_eq!(layout.name, "Test");
        assert_eq!(layout.sections.len(), 1);
        assert_eq!(layout.boilerplate.page_marker, r"^\d+\s*\|\s*P A G E$");
        assert!(layout.bundle.dataset.defaults.is_empty());
    }

    #[test]
    fn test_empty_sections_rejected() {
        let json = layout_json("[]", "");
        assert!(parse_layout_str(&json).is_err());
    }

    #[test]
    fn test_lowercase_prefix_rejected() {
        let json = layout_json(r#"[{ "prefix": "Floor", "title": "Floor" }]"#, "");
        assert!(parse_layout_str(&json).is_err());
    }

    #[test]
    fn test_uppercase_suffix_rejected() {
        let json = layout_json(
            r#"[{ "prefix": "FLOOR", "title": "Floor" }]"#,
            r#""continuation_suffixes": ["AND"],"#,
        );
        assert!(parse_layout_str(&json).is_err());
    }

    #[test]
    fn test_invalid_page_marker_rejected() {
        let json = layout_json(
            r#"[{ "prefix": "FLOOR", "title": "Floor" }]"#,
            r#""boilerplate": { "page_marker": "(unclosed" },"#,
        );
        assert!(parse_layout_str(&json).is_err());
    }

    #[test]
    fn test_default_status_must_be_an_option() {
        let json = layout_json(r#"[{ "prefix": "FLOOR", "title": "Floor" }]"#, "")
            .replace(r#""default_status": "Not Started""#, r#""default_status": "Pending""#);
        let err = parse_layout_str(&json).unwrap_err();
        assert!(err.to_string().contains("Pending"));
    }

    #[test]
    fn test_load_layout_missing_file() {
        let err = load_layout(Path::new("/nonexistent/layout.json")).unwrap_err();
        assert!(matches!(err, ChecklistError::LayoutLoad { .. }));
    }
}
