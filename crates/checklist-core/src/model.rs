use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A section recovered from the PDF: a heading and its stitched item labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub items: Vec<String>,
}

/// The combined template + dataset document consumed by the roster tool.
///
/// Field order is the serialized order. Every field defaults on read so that
/// hand-edited and legacy bundles still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default)]
    pub bundle: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub generated: bool,
    pub template: Template,
    pub dataset: Dataset,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub status_options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_status: Option<String>,
    #[serde(default)]
    pub metadata_fields: Vec<MetadataField>,
    #[serde(default)]
    pub sections: Vec<TemplateSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateSection {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_version: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub updated: String,
    #[serde(default)]
    pub defaults: Map<String, Value>,
    #[serde(default)]
    pub people: Vec<Person>,
}

impl Dataset {
    /// A string-valued entry from `defaults`, if present.
    pub fn default_str(&self, key: &str) -> Option<&str> {
        self.defaults.get(key).and_then(Value::as_str)
    }
}

/// A team member tracked by the roster tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub staff_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub mentor: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date_display: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    #[serde(default)]
    pub competencies: BTreeMap<String, CompetencyRecord>,
}

impl Person {
    pub fn competency(&self, item_id: &str) -> Option<&CompetencyRecord> {
        self.competencies.get(item_id)
    }

    /// The explicitly recorded status for an item. Blank statuses count as
    /// unrecorded.
    pub fn recorded_status(&self, item_id: &str) -> Option<&str> {
        self.competency(item_id)
            .and_then(|c| c.status.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Progress recorded against one checklist item for one person.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyRecord {
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_on: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub trainer: Option<String>,
}

/// Text fields written by other tools may hold numbers or booleans; they are
/// read back as their JSON text. `null` reads as absent.
fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected text, found {}",
            json_kind(&other)
        ))),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_text(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_person_scalars_read_as_text() {
        let person: Person = serde_json::from_value(json!({
            "name": "Sam",
            "staffId": 1042,
            "role": null,
            "notes": true,
            "competencies": {"greet": {"status": "Complete", "trainer": 7}}
        }))
        .unwrap();
        assert_eq!(person.staff_id.as_deref(), Some("1042"));
        assert_eq!(person.role, None);
        assert_eq!(person.notes.as_deref(), Some("true"));
        assert_eq!(person.competency("greet").unwrap().trainer.as_deref(), Some("7"));
    }

    #[test]
    fn test_null_updated_reads_as_empty() {
        let dataset: Dataset = serde_json::from_value(json!({"updated": null})).unwrap();
        assert_eq!(dataset.updated, "");
        let dataset: Dataset = serde_json::from_value(json!({"updated": 20241109})).unwrap();
        assert_eq!(dataset.updated, "20241109");
    }

    #[test]
    fn test_structured_value_in_text_field_rejected() {
        let err = serde_json::from_value::<Person>(json!({"staffId": [1, 2]})).unwrap_err();
        assert!(err.to_string().contains("expected text, found an array"));
    }
}
