//! Error types for the revpdf library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for revpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating review documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading the tabular data source.
    #[error("Spreadsheet read error: {0}")]
    Table(#[from] csv::Error),

    /// Required data columns are missing from the source table.
    #[error("Missing expected columns: {0:?}")]
    MissingColumns(Vec<String>),

    /// The requested font preset does not exist.
    #[error("Unknown font preset '{requested}'. Available: {available:?}")]
    UnknownFontPreset {
        /// The preset key that was asked for.
        requested: String,
        /// The preset keys that exist.
        available: Vec<&'static str>,
    },

    /// A font file required by the selected preset is not on disk.
    #[error("Font file '{file}' not found (expected at: {expected_at})")]
    FontFileMissing {
        /// File name of the missing style variant.
        file: String,
        /// Absolute path where the file was expected.
        expected_at: PathBuf,
    },

    /// Font data could not be loaded or registered.
    #[error("Font loading error for '{file}': {source}")]
    FontLoad {
        /// File the font data came from.
        file: String,
        /// Underlying PDF backend error.
        source: genpdf::error::Error,
    },

    /// Error parsing the response markup.
    #[error("Markup parsing error: {0}")]
    Markup(String),

    /// The output canvas rejected a text payload.
    #[error("Rendering error on text block {payload:?}: {message}")]
    Render {
        /// Salient portion of the offending text.
        payload: String,
        /// Description from the canvas backend.
        message: String,
    },

    /// Writing a finished document to disk failed.
    #[error("Failed to write document to {path}: {message}")]
    OutputWrite {
        /// Destination the document was being finalized to.
        path: PathBuf,
        /// Description from the canvas backend.
        message: String,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Markup(err.to_string())
    }
}
