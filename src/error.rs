use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tilecut operations.
#[derive(Debug, Error)]
pub enum TilecutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid cell size {width}x{height}: width and height must be greater than 0")]
    InvalidCellSize { width: u32, height: u32 },

    #[error("Invalid arguments: {0}")]
    Config(String),

    #[error("File not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to decode image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to create export directory {}: {source}", path.display())]
    CreateExportDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save tile {}: {source}", path.display())]
    TileSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to serialize report as JSON: {0}")]
    ReportJson(#[from] serde_json::Error),
}

impl TilecutError {
    /// Returns true for errors that must stop the whole run before any file
    /// is processed.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            TilecutError::Config(_) | TilecutError::InvalidCellSize { .. }
        )
    }
}
