pub mod slug;

use serde_json::Value;
use std::path::Path;

use crate::error::ChecklistError;
use crate::layout::schema::BundleDef;
use crate::model::{Bundle, ChecklistItem, Dataset, Section, Template, TemplateSection};
use slug::SlugRegistry;

/// Top-level keys every bundle must carry.
pub const REQUIRED_KEYS: &[&str] = &["dataset", "template"];

/// Wrap parsed sections in the bundle envelope.
///
/// Items get bundle-unique slug ids and the template default status. The
/// dataset starts with no people; the roster tool fills those in later.
pub fn build_bundle(sections: &[Section], envelope: &BundleDef, source: &str) -> Bundle {
    let mut slugs = SlugRegistry::new();
    let default_status = &envelope.template.default_status;

    let template_sections = sections
        .iter()
        .map(|section| TemplateSection {
            title: section.title.clone(),
            description: Some(String::new()),
            items: section
                .items
                .iter()
                .map(|label| ChecklistItem {
                    id: slugs.assign(label),
                    label: label.clone(),
                    default_status: Some(default_status.clone()),
                    description: None,
                })
                .collect(),
        })
        .collect();

    Bundle {
        bundle: envelope.name.clone(),
        source: source.to_string(),
        generated: true,
        template: Template {
            title: envelope.template.title.clone(),
            version: envelope.template.version.clone(),
            status_options: envelope.template.status_options.clone(),
            default_status: Some(default_status.clone()),
            metadata_fields: envelope.template.metadata_fields.clone(),
            sections: template_sections,
        },
        dataset: Dataset {
            template_version: Some(envelope.dataset.template_version.clone()),
            updated: envelope.dataset.updated.clone(),
            defaults: envelope.dataset.defaults.clone(),
            people: Vec::new(),
        },
    }
}

/// Carry operator-set defaults forward from a legacy bundle.
///
/// Legacy keys override generated ones in place and new keys are appended.
/// Anything that is not a JSON object with an object at `dataset.defaults`
/// leaves the bundle untouched. Returns the number of keys merged.
pub fn merge_legacy_defaults(bundle: &mut Bundle, legacy_text: &str) -> usize {
    let legacy: Value = match serde_json::from_str(legacy_text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "legacy bundle is not valid JSON, skipping defaults merge");
            return 0;
        }
    };

    let Some(defaults) = legacy
        .get("dataset")
        .and_then(|d| d.get("defaults"))
        .and_then(Value::as_object)
    else {
        tracing::debug!("legacy bundle has no dataset.defaults object");
        return 0;
    };

    for (key, value) in defaults {
        bundle.dataset.defaults.insert(key.clone(), value.clone());
    }
    tracing::debug!(keys = defaults.len(), "merged legacy defaults");
    defaults.len()
}

/// Serialize a bundle the way it is stored on disk: two-space indent,
/// non-ASCII kept literal, no trailing newline.
pub fn to_json(bundle: &Bundle) -> Result<String, ChecklistError> {
    Ok(serde_json::to_string_pretty(bundle)?)
}

/// Parse a bundle for rendering, checking the required top-level keys first.
pub fn load_bundle(json: &str, source: &Path) -> Result<Bundle, ChecklistError> {
    let value: Value = serde_json::from_str(json).map_err(|e| ChecklistError::MalformedBundle {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;

    let missing: Vec<&str> = match value.as_object() {
        Some(map) => REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !map.contains_key(*key))
            .collect(),
        None => REQUIRED_KEYS.to_vec(),
    };
    if !missing.is_empty() {
        return Err(ChecklistError::MissingBundleKeys {
            path: source.to_path_buf(),
            keys: missing.join(", "),
        });
    }

    serde_json::from_value(value).map_err(|e| ChecklistError::BundleFieldType {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })
}
