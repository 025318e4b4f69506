pub mod bundle;
pub mod error;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod parsing;
pub mod workbook;

use error::ChecklistError;
use extraction::PdfExtractor;
use layout::schema::LayoutProfile;
use model::{Bundle, Section};

/// Result of converting one checklist PDF.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub sections: Vec<Section>,
    pub bundle: Bundle,
}

/// Extract, clean and parse a checklist PDF into sections.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    layout: &LayoutProfile,
) -> Result<Vec<Section>, ChecklistError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted pages"
    );

    let lines = extraction::clean::clean_lines(&pages, &layout.boilerplate)?;
    Ok(parsing::parse_sections(&lines, layout))
}

/// Main API entry point: turn a checklist PDF into a bundle.
///
/// `source` is recorded in the bundle as the originating file name. Legacy
/// defaults are merged separately with [`bundle::merge_legacy_defaults`].
pub fn convert_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    layout: &LayoutProfile,
    source: &str,
) -> Result<Conversion, ChecklistError> {
    let sections = parse_pdf(pdf_bytes, extractor, layout)?;
    let bundle = bundle::build_bundle(&sections, &layout.bundle, source);
    Ok(Conversion { sections, bundle })
}
