use checklist_core::bundle::load_bundle;
use checklist_core::error::ChecklistError;
use checklist_core::workbook::{competency_count, render_workbook};
use std::path::{Path, PathBuf};

use super::convert;

pub const DEFAULT_OUTPUT: &str = "data/PGR_Competency_Checklist.xlsx";

pub fn run(input: &Path, output: &Path) -> Result<(), ChecklistError> {
    let bundle_path = locate_bundle(
        input,
        Path::new(convert::DEFAULT_OUTPUT),
        Path::new(super::LEGACY_BUNDLE),
    )?;

    let text = std::fs::read_to_string(&bundle_path)?;
    let bundle = load_bundle(&text, &bundle_path)?;
    tracing::debug!(path = %bundle_path.display(), "loaded bundle");

    let bytes = render_workbook(&bundle)?;
    super::ensure_parent(output)?;
    std::fs::write(output, bytes)?;

    println!(
        "Workbook written to {} ({} people, {} competencies)",
        output.display(),
        bundle.dataset.people.len(),
        competency_count(&bundle)
    );
    Ok(())
}

/// The bundle to render. Falls back to `legacy` only when `input` is the
/// default path, that path is missing, and the legacy file exists.
fn locate_bundle(input: &Path, default: &Path, legacy: &Path) -> Result<PathBuf, ChecklistError> {
    let path = if input == default && !input.exists() && legacy.exists() {
        tracing::info!(path = %legacy.display(), "default bundle missing, using legacy bundle");
        legacy.to_path_buf()
    } else {
        input.to_path_buf()
    };

    if !path.exists() {
        return Err(ChecklistError::MissingInput {
            what: "competency bundle",
            path,
        });
    }
    Ok(path)
}
