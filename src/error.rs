//! Editor error taxonomy.
//!
//! Every engine operation returns [`EditorError`]. The UI catches these at the
//! boundary of the triggering action and turns them into a blocking notice;
//! none of them end the session.

use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds surfaced by the document, session and export layers.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Malformed document text (open, save, text-editor save)
    #[error("parse error: {0}")]
    Parse(String),

    /// Missing texture file, missing document, or no matching keyframe structure
    #[error("not found: {0}")]
    NotFound(String),

    /// GIF export failed (no frames resolved, encoder failure)
    #[error("export failed: {0}")]
    Export(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image error on {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl EditorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EditorError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        EditorError::Image {
            path: path.into(),
            source,
        }
    }

    /// Short title for the notice dialog
    pub fn title(&self) -> &'static str {
        match self {
            EditorError::Parse(_) => "Parse Error",
            EditorError::NotFound(_) => "Not Found",
            EditorError::Export(_) => "Export Error",
            EditorError::Io { .. } => "File Error",
            EditorError::Image { .. } => "Image Error",
        }
    }
}

impl From<serde_yaml::Error> for EditorError {
    fn from(e: serde_yaml::Error) -> Self {
        EditorError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_error_maps_to_parse() {
        let err: EditorError = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2")
            .unwrap_err()
            .into();
        assert!(matches!(err, EditorError::Parse(_)));
        assert_eq!(err.title(), "Parse Error");
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = EditorError::io(
            "/tmp/missing.yaml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/tmp/missing.yaml"));
    }
}
