use thiserror::Error;

/// Errors surfaced by the sketchpad outside of painting itself.
///
/// Painting never fails: degenerate geometry renders as a no-op. These cover
/// the edges of the system (palette input, configuration, export).
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("invalid color `{0}`: expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sketchpad operations
pub type SketchResult<T> = Result<T, SketchError>;
