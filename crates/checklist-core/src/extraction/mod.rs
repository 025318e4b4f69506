pub mod clean;
pub mod pdftotext;

use crate::error::ChecklistError;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    ///
    /// A page without extractable text yields an empty `lines` vector rather
    /// than an error.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ChecklistError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
