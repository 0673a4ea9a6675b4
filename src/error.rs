//! Error types for the artwork catalog.

use thiserror::Error;

/// Main error type for catalog operations.
///
/// The selection engine never produces one of these: it clamps instead of
/// failing. Errors only come from the page source boundary and from loading
/// configuration.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{message}")]
    Fetch { page: u32, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Build a fetch failure for `page` with the standard message.
    pub fn fetch(page: u32, cause: impl std::fmt::Display) -> Self {
        CatalogError::Fetch {
            page,
            message: format!("Failed to load artworks page {page}: {cause}"),
        }
    }

    /// Text surfaced to the user when this error ends a page load.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Fetch { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Decode(e.to_string())
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
