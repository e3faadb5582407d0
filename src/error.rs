//! Error type shared by every fallible operation in the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while generating, composing or saving QR code images.
#[derive(Error, Debug)]
pub enum QrError {
    /// The overlay image path does not exist.
    #[error("Logo file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The payload could not be encoded, usually because it exceeds the
    /// capacity of the requested version and error correction level.
    #[error("Encoding error: {0}")]
    Encoding(#[from] qrcode::types::QrError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding the overlay or encoding the output failed.
    #[error("Image error: {0}")]
    Image(image::ImageError),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid overlay: {0}")]
    InvalidOverlay(String),
}

impl From<image::ImageError> for QrError {
    fn from(error: image::ImageError) -> Self {
        match error {
            image::ImageError::IoError(io) => QrError::Io(io),
            other => QrError::Image(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, QrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_io_errors_become_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: QrError = image::ImageError::IoError(io).into();
        assert!(matches!(err, QrError::Io(ref e) if e.kind() == std::io::ErrorKind::PermissionDenied));
    }

    #[test]
    fn not_found_mentions_path() {
        let err = QrError::NotFound(PathBuf::from("missing/logo.png"));
        assert_eq!(err.to_string(), "Logo file not found: missing/logo.png");
    }
}
