use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ChecklistError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("{what} not found at {}", path.display())]
    MissingInput { what: &'static str, path: PathBuf },

    #[error("{} is not valid JSON: {reason}", path.display())]
    MalformedBundle { path: PathBuf, reason: String },

    #[error("Bundle at {} is missing required keys: {keys}", path.display())]
    MissingBundleKeys { path: PathBuf, keys: String },

    #[error("Bundle at {} has a field of the wrong type: {reason}", path.display())]
    BundleFieldType { path: PathBuf, reason: String },

    #[error("failed to load layout from {}: {reason}", path.display())]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("invalid layout: {0}")]
    LayoutInvalid(String),

    #[error("workbook generation failed: {0}")]
    Workbook(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
