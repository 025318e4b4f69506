use checklist_core::bundle::{merge_legacy_defaults, to_json};
use checklist_core::error::ChecklistError;
use checklist_core::extraction::pdftotext::PdftotextExtractor;
use std::path::Path;

pub const DEFAULT_PDF: &str = "(5) PGR Competancy Checklist.pdf";
pub const DEFAULT_OUTPUT: &str = "data/pgr_competency_checklist_bundle.json";

pub fn run(
    pdf_file: &Path,
    out: &Path,
    legacy: &Path,
    layout_file: Option<&Path>,
) -> Result<(), ChecklistError> {
    if !pdf_file.exists() {
        return Err(ChecklistError::MissingInput {
            what: "PDF",
            path: pdf_file.to_path_buf(),
        });
    }

    let layout = super::resolve_layout(layout_file)?;
    let pdf_bytes = std::fs::read(pdf_file)?;
    let source = pdf_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| pdf_file.display().to_string());

    let extractor = PdftotextExtractor::new();
    let mut conversion = checklist_core::convert_pdf(&pdf_bytes, &extractor, &layout, &source)?;

    if legacy.exists() {
        match std::fs::read_to_string(legacy) {
            Ok(text) => {
                merge_legacy_defaults(&mut conversion.bundle, &text);
            }
            Err(e) => tracing::warn!(
                path = %legacy.display(),
                error = %e,
                "could not read legacy bundle, skipping defaults merge"
            ),
        }
    }

    let json = to_json(&conversion.bundle)?;
    super::ensure_parent(out)?;
    std::fs::write(out, json)?;

    println!(
        "Wrote {} with {} sections",
        out.display(),
        conversion.sections.len()
    );
    Ok(())
}
