//! Sequencing of encode, rasterize, overlay and save.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::DynamicImage;

use crate::color::Color;
use crate::encoder::{self, QrSymbol};
use crate::error::Result;
use crate::helper;
use crate::overlay::{self, OverlaySpec};
use crate::request::QrRequest;

/// Quiet zone width in modules.
pub const DEFAULT_BORDER: u32 = 4;

/// Extra pixels around a logo, split evenly between both sides of the padding frame.
pub const DEFAULT_FRAME_MARGIN: u32 = 20;

/// Generates QR code images and composes logos onto them.
///
/// The composer holds only rendering settings; every call is independent.
///
/// ```rust
/// use qrtint::{QrComposer, QrRequest};
///
/// let composer = QrComposer::new();
/// let img = composer.generate(&QrRequest::new("Hello"))?;
/// assert_eq!(img.width(), (21 + 2 * 4) * 10);
/// # Ok::<(), qrtint::QrError>(())
/// ```
#[derive(Clone, Debug)]
pub struct QrComposer {
    border: u32,
    frame_margin: u32,
    resize_filter: FilterType,
}

impl Default for QrComposer {
    fn default() -> Self {
        Self {
            border: DEFAULT_BORDER,
            frame_margin: DEFAULT_FRAME_MARGIN,
            resize_filter: FilterType::Lanczos3,
        }
    }
}

/// One entry of [`QrComposer::generate_batch`].
#[derive(Clone, Debug)]
pub struct BatchJob {
    pub request: QrRequest,
    pub output_path: PathBuf,
    pub overlay: Option<OverlaySpec>,
}

impl BatchJob {
    pub fn new(request: QrRequest, output_path: impl Into<PathBuf>) -> Self {
        Self {
            request,
            output_path: output_path.into(),
            overlay: None,
        }
    }

    pub fn with_overlay(mut self, overlay: OverlaySpec) -> Self {
        self.overlay = Some(overlay);
        self
    }
}

impl QrComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_border(mut self, modules: u32) -> Self {
        self.border = modules;
        self
    }

    pub fn with_frame_margin(mut self, pixels: u32) -> Self {
        self.frame_margin = pixels;
        self
    }

    pub fn with_resize_filter(mut self, filter: FilterType) -> Self {
        self.resize_filter = filter;
        self
    }

    pub fn border(&self) -> u32 {
        self.border
    }

    pub fn frame_margin(&self) -> u32 {
        self.frame_margin
    }

    /// Encodes the request's payload into a module matrix.
    pub fn encode(&self, request: &QrRequest) -> Result<QrSymbol> {
        encoder::encode(
            request.data().as_bytes(),
            request.ecc(),
            request.min_version(),
            request.fits(),
        )
    }

    /// Generates an opaque RGB image of the request.
    ///
    /// Each side is `(version * 4 + 17 + 2 * border) * box_size` pixels.
    ///
    /// # Errors
    ///
    /// [`QrError::Encoding`](crate::QrError::Encoding) when the payload does not fit, and
    /// [`QrError::InvalidConfig`](crate::QrError::InvalidConfig) when the image would be wider
    /// than [`helper::MAX_IMAGE_SIDE`].
    pub fn generate(&self, request: &QrRequest) -> Result<DynamicImage> {
        let symbol = self.encode(request)?;
        log::debug!(
            "Encoded {} bytes as version {} ({:?})",
            request.data().len(),
            symbol.version().value(),
            symbol.error_correction_level()
        );
        let img = helper::render_symbol(
            &symbol,
            self.border,
            request.box_size_px(),
            request.fill(),
            request.back(),
        )?;
        Ok(DynamicImage::ImageRgb8(img))
    }

    /// Renders the request as SVG text with the same colors and proportions as [`generate`].
    ///
    /// [`generate`]: QrComposer::generate
    pub fn generate_svg(&self, request: &QrRequest) -> Result<String> {
        let symbol = self.encode(request)?;
        helper::to_svg_string(
            &symbol,
            self.border,
            request.box_size_px(),
            request.fill(),
            request.back(),
        )
    }

    /// Embeds a logo at the center of `qr` on a `frame_color` padding frame.
    ///
    /// `qr` is left untouched; the result is an RGB copy with the same dimensions.
    ///
    /// # Errors
    ///
    /// [`QrError::NotFound`](crate::QrError::NotFound) when the logo file is missing, in which
    /// case nothing is read or written.
    pub fn embed_overlay(
        &self,
        qr: &DynamicImage,
        overlay: &OverlaySpec,
        frame_color: Color,
    ) -> Result<DynamicImage> {
        overlay::embed(qr, overlay, frame_color, self.frame_margin, self.resize_filter)
    }

    /// Saves `image` in the format implied by the extension of `path`.
    pub fn save(&self, image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        helper::save_image(image, path)?;
        log::info!("QR code saved as: {}", path.display());
        Ok(())
    }

    /// Generates, optionally embeds a logo framed in the request's background color, and saves.
    pub fn generate_and_save(
        &self,
        request: &QrRequest,
        output_path: impl AsRef<Path>,
        overlay: Option<&OverlaySpec>,
    ) -> Result<DynamicImage> {
        log::info!("Generating QR code for: {}", request.data());
        let mut img = self.generate(request)?;

        if let Some(overlay) = overlay {
            log::info!("Embedding logo at {:.0}% of the code", overlay.size_ratio() * 100.0);
            img = self.embed_overlay(&img, overlay, request.back())?;
        }

        self.save(&img, output_path)?;
        Ok(img)
    }

    /// Runs every job in order. A failing job does not stop the ones after it.
    ///
    /// Returns one result per job, holding the written path on success.
    pub fn generate_batch(&self, jobs: &[BatchJob]) -> Vec<Result<PathBuf>> {
        jobs.iter()
            .map(|job| {
                let outcome = self
                    .generate_and_save(&job.request, &job.output_path, job.overlay.as_ref())
                    .map(|_| job.output_path.clone());
                if let Err(e) = &outcome {
                    log::warn!("Skipping {}: {}", job.output_path.display(), e);
                }
                outcome
            })
            .collect()
    }
}
