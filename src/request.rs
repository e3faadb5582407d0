//! The per-symbol settings of a generation call.

use crate::color::Color;
use crate::encoder::{QrCodeEcc, Version};
use crate::error::{QrError, Result};

/// Pixels per module when none is given.
pub const DEFAULT_BOX_SIZE: u32 = 10;

/// What to encode and how the symbol should look.
///
/// Built with a consuming builder and immutable afterwards:
///
/// ```rust
/// use qrtint::{QrCodeEcc, QrRequest};
///
/// let request = QrRequest::new("https://example.com")
///     .fill_color_str("#1f77b4")?
///     .back_color_str("white")?
///     .box_size(8)?
///     .error_correction(QrCodeEcc::High);
/// assert_eq!(request.box_size_px(), 8);
/// # Ok::<(), qrtint::QrError>(())
/// ```
#[derive(Clone, Debug)]
pub struct QrRequest {
    data: String,
    fill_color: Color,
    back_color: Color,
    box_size: u32,
    ecc: QrCodeEcc,
    version: Version,
    fit: bool,
}

impl QrRequest {
    /// Black on white, 10 pixels per module, error correction High, smallest fitting version.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            fill_color: Color::BLACK,
            back_color: Color::WHITE,
            box_size: DEFAULT_BOX_SIZE,
            ecc: QrCodeEcc::High,
            version: Version::MIN,
            fit: true,
        }
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn back_color(mut self, color: Color) -> Self {
        self.back_color = color;
        self
    }

    /// Sets the dark module color from a color code such as `#1f77b4` or `navy`.
    pub fn fill_color_str(self, code: &str) -> Result<Self> {
        Ok(self.fill_color(code.parse()?))
    }

    /// Sets the light module and border color from a color code.
    pub fn back_color_str(self, code: &str) -> Result<Self> {
        Ok(self.back_color(code.parse()?))
    }

    /// Sets the number of pixels per module edge. Zero is rejected.
    pub fn box_size(mut self, pixels: u32) -> Result<Self> {
        if pixels == 0 {
            return Err(QrError::InvalidConfig("box size must be at least 1 pixel".to_string()));
        }
        self.box_size = pixels;
        Ok(self)
    }

    pub fn error_correction(mut self, ecc: QrCodeEcc) -> Self {
        self.ecc = ecc;
        self
    }

    /// Sets the smallest symbol version to try.
    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// When `false`, the payload must fit the configured version exactly.
    pub fn fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn fill(&self) -> Color {
        self.fill_color
    }

    pub fn back(&self) -> Color {
        self.back_color
    }

    pub fn box_size_px(&self) -> u32 {
        self.box_size
    }

    pub fn ecc(&self) -> QrCodeEcc {
        self.ecc
    }

    pub fn min_version(&self) -> Version {
        self.version
    }

    pub fn fits(&self) -> bool {
        self.fit
    }
}
