use checklist_core::error::ChecklistError;
use checklist_core::extraction::pdftotext::PdftotextExtractor;
use std::path::Path;

use crate::output;

pub fn run(
    pdf_file: &Path,
    output_format: &str,
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
    let extractor = PdftotextExtractor::new();
    let sections = checklist_core::parse_pdf(&pdf_bytes, &extractor, &layout)?;

    match output_format {
        "json" => output::json::print(&sections)?,
        _ => print!("{}", output::table::format_sections(&sections)),
    }
    Ok(())
}
