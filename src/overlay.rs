//! Logo overlay sizing, placement and compositing.
//!
//! A logo is scaled to a fraction of the QR image's shorter side, centered on a solid padding
//! frame, and the frame is then pasted over the middle of the QR image. The frame replaces the
//! modules underneath it outright, so the symbol must carry enough error correction to survive
//! the loss (use [`QrCodeEcc::High`](crate::QrCodeEcc::High)).

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, RgbaImage};

use crate::color::Color;
use crate::error::{QrError, Result};
use crate::helper::MAX_IMAGE_SIDE;

/// Largest accepted `size_ratio`.
pub const MAX_SIZE_RATIO: f64 = 0.5;

/// Where the overlay image comes from.
#[derive(Clone, Debug)]
pub enum LogoSource {
    /// Read and decode the file when the overlay is embedded.
    Path(PathBuf),
    /// An already decoded image.
    Image(DynamicImage),
}

/// A logo to embed and its size relative to the QR image.
#[derive(Clone, Debug)]
pub struct OverlaySpec {
    source: LogoSource,
    size_ratio: f64,
}

impl OverlaySpec {
    /// Builds a spec for a logo file.
    ///
    /// `size_ratio` must be finite and within (0, 0.5]. The file itself is only checked when
    /// the overlay is embedded.
    pub fn from_path(path: impl Into<PathBuf>, size_ratio: f64) -> Result<Self> {
        Self::new(LogoSource::Path(path.into()), size_ratio)
    }

    /// Builds a spec for an in-memory logo.
    pub fn from_image(image: DynamicImage, size_ratio: f64) -> Result<Self> {
        Self::new(LogoSource::Image(image), size_ratio)
    }

    pub fn new(source: LogoSource, size_ratio: f64) -> Result<Self> {
        if !size_ratio.is_finite() || size_ratio <= 0.0 || size_ratio > MAX_SIZE_RATIO {
            return Err(QrError::InvalidOverlay(format!(
                "size ratio {} is outside (0, {}]",
                size_ratio, MAX_SIZE_RATIO
            )));
        }
        Ok(Self { source, size_ratio })
    }

    pub fn source(&self) -> &LogoSource {
        &self.source
    }

    pub fn size_ratio(&self) -> f64 {
        self.size_ratio
    }

    /// Opens the logo as an RGBA image.
    ///
    /// A missing file fails with [`QrError::NotFound`] before anything is read. The format is
    /// sniffed from the file contents, so the extension does not have to match.
    pub fn load(&self) -> Result<RgbaImage> {
        let image = match &self.source {
            LogoSource::Path(path) => open_logo(path)?,
            LogoSource::Image(image) => image.clone(),
        };
        Ok(match image {
            DynamicImage::ImageRgba8(rgba) => rgba,
            other => other.to_rgba8(),
        })
    }
}

fn open_logo(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(QrError::NotFound(path.to_path_buf()));
    }
    log::debug!("Opening logo {}", path.display());
    Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
}

/// Geometry of an embedded overlay, in pixels.
///
/// Offsets use floor division, so they can be negative when the frame is wider than the QR
/// image; pasting clips the part that falls outside.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OverlayPlacement {
    /// Side of the resized logo.
    pub overlay_size: u32,
    /// Side of the padding frame: `overlay_size + margin`.
    pub frame_size: u32,
    /// Logo position inside the frame.
    pub overlay_offset: (i64, i64),
    /// Frame position inside the QR image.
    pub frame_offset: (i64, i64),
}

impl OverlayPlacement {
    /// Computes the placement for a `qr_width` × `qr_height` image.
    ///
    /// `overlay_size = floor(min(qr_width, qr_height) * size_ratio)`. A frame larger than
    /// [`MAX_IMAGE_SIDE`] fails with [`QrError::InvalidConfig`].
    pub fn compute(qr_width: u32, qr_height: u32, size_ratio: f64, margin: u32) -> Result<Self> {
        let shorter = qr_width.min(qr_height);
        let overlay_size = (f64::from(shorter) * size_ratio).floor() as u32;
        if overlay_size == 0 {
            return Err(QrError::InvalidOverlay(format!(
                "logo would be 0 pixels wide on a {}x{} image",
                qr_width, qr_height
            )));
        }
        let frame_size = overlay_size
            .checked_add(margin)
            .filter(|&side| side <= MAX_IMAGE_SIDE)
            .ok_or_else(|| {
                QrError::InvalidConfig(format!(
                    "frame margin {} around a {} px logo exceeds {} px",
                    margin, overlay_size, MAX_IMAGE_SIDE
                ))
            })?;
        let inset = centered(frame_size, overlay_size);
        Ok(Self {
            overlay_size,
            frame_size,
            overlay_offset: (inset, inset),
            frame_offset: (centered(qr_width, frame_size), centered(qr_height, frame_size)),
        })
    }
}

fn centered(outer: u32, inner: u32) -> i64 {
    (i64::from(outer) - i64::from(inner)).div_euclid(2)
}

/// Composites a logo onto the center of `qr`.
///
/// The logo is resized with `filter` and alpha-blended onto an opaque `frame_color` square
/// that is `margin` pixels larger. The square is then pasted without a mask. The returned
/// image is an opaque RGB copy with the same dimensions as `qr`.
pub fn embed(
    qr: &DynamicImage,
    overlay: &OverlaySpec,
    frame_color: Color,
    margin: u32,
    filter: FilterType,
) -> Result<DynamicImage> {
    let logo = overlay.load()?;

    let mut canvas = qr.to_rgb8();
    let (qr_width, qr_height) = canvas.dimensions();
    let placement = OverlayPlacement::compute(qr_width, qr_height, overlay.size_ratio(), margin)?;
    log::debug!("Overlay placement for {}x{}: {:?}", qr_width, qr_height, placement);

    let logo = imageops::resize(&logo, placement.overlay_size, placement.overlay_size, filter);

    let mut frame = RgbaImage::from_pixel(placement.frame_size, placement.frame_size, frame_color.to_rgba());
    let (lx, ly) = placement.overlay_offset;
    imageops::overlay(&mut frame, &logo, lx, ly);
    let frame = DynamicImage::ImageRgba8(frame).to_rgb8();

    let (fx, fy) = placement.frame_offset;
    imageops::replace(&mut canvas, &frame, fx, fy);

    Ok(DynamicImage::ImageRgb8(canvas))
}
