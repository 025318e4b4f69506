use crate::error::ChecklistError;
use crate::layout::schema::LayoutProfile;
use crate::layout::validate_layout;

pub const PGR_CHECKLIST_JSON: &str = include_str!("../../../../layouts/pgr-checklist.json");

/// Available predefined layouts.
pub const PRESETS: &[&str] = &["pgr"];

/// Load a predefined layout by name.
pub fn load_preset(name: &str) -> Result<LayoutProfile, ChecklistError> {
    match name {
        "pgr" => {
            let layout: LayoutProfile = serde_json::from_str(PGR_CHECKLIST_JSON)?;
            validate_layout(&layout)?;
            Ok(layout)
        }
        _ => Err(ChecklistError::LayoutInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// Raw JSON of a predefined layout, for printing and as a starting point
/// for custom layouts.
pub fn preset_json(name: &str) -> Option<&'static str> {
    match name {
        "pgr" => Some(PGR_CHECKLIST_JSON),
        _ => None,
    }
}

/// The layout used when none is given.
pub fn default_layout() -> Result<LayoutProfile, ChecklistError> {
    load_preset("pgr")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_pgr_preset() {
        let layout = load_preset("pgr").unwrap();
        assert_eq!(layout.sections.len(), 8);
        assert_eq!(layout.sections[0].title, "Starting Shift");
        assert!(layout.skip_tokens.contains("TRAINER"));
        assert!(layout.continuation_suffixes.contains("between"));
        assert_eq!(layout.bundle.template.default_status, "Not Started");
    }

    #[test]
    fn test_heading_order_preserved() {
        let layout = default_layout().unwrap();
        let prefixes: Vec<&str> = layout.sections.iter().map(|s| s.prefix.as_str()).collect();
        assert_eq!(
            prefixes,
            vec![
                "STARTING SHIFT",
                "IMPORTANT LOCATIONS",
                "BEPOZ/CASH HANDLING",
                "BARS",
                "BAR KNOWLEDGE",
                "FOOD OFFERINGS",
                "FLOOR",
                "BOH CLEANING/DUTIES",
            ]
        );
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
        assert!(preset_json("xyz").is_none());
    }
}
