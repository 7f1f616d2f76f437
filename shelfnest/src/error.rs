use thiserror::Error;

/// Result type alias used throughout `shelfnest`.
pub type Result<T> = std::result::Result<T, NestError>;

/// Errors raised while extracting shapes, validating configurations or reading documents.
#[derive(Debug, Error)]
pub enum NestError {
    /// None of the shape resolution rules applied to the document.
    #[error("cannot determine bounds for document: {document}")]
    BoundsUndeterminable { document: String },

    /// A configuration value is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A polygon could not be constructed from the given vertices.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The document could not be parsed.
    #[error("failed to parse document {document}: {message}")]
    Parse { document: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
