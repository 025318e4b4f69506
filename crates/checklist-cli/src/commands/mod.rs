pub mod convert;
pub mod layout;
pub mod parse;
pub mod workbook;

use checklist_core::error::ChecklistError;
use checklist_core::layout::schema::LayoutProfile;
use checklist_core::layout::{builtin, load_layout};
use std::path::Path;

/// Hand-maintained bundle from before the PDF converter existed.
pub const LEGACY_BUNDLE: &str = "data/(5) PGR Competency Checklist.txt";

/// A custom layout file if given, otherwise the built-in profile.
fn resolve_layout(path: Option<&Path>) -> Result<LayoutProfile, ChecklistError> {
    match path {
        Some(path) => load_layout(path),
        None => builtin::default_layout(),
    }
}

/// Create the parent directory of `path` if it has one.
fn ensure_parent(path: &Path) -> Result<(), ChecklistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
