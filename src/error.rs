/// Error type shared by the store, the editor and the import/export code
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShortcutError {
    /// Title or path empty after trimming
    #[error("{0}")]
    MissingFields(String),

    #[error("{0}")]
    DuplicateTitle(String),

    #[error("Invalid file format")]
    InvalidFormat,

    #[error("Invalid shortcut format: missing required fields")]
    InvalidEntry,

    #[error("Invalid shortcut format: duplicate id \"{0}\"")]
    DuplicateImportId(String),

    #[error("Invalid shortcut format: duplicate title \"{0}\"")]
    DuplicateImportTitle(String),

    #[error("Invalid JSON: {0}")]
    Json(String),

    #[error("No shortcut at index {0}")]
    IndexOutOfRange(usize),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Browser API error: {0}")]
    Bridge(String),

    #[error("Could not determine SharePoint site URL")]
    NoSiteUrl,
}

impl From<serde_json::Error> for ShortcutError {
    fn from(e: serde_json::Error) -> Self {
        ShortcutError::Json(e.to_string())
    }
}
