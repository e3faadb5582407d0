//! # qrtint
//!
//! A Rust library for generating colored QR code images with an optional embedded logo.
//!
//! `qrtint` encodes text into QR codes through the [`qrcode`](https://docs.rs/qrcode) crate and
//! draws them with the [`image`](https://docs.rs/image) crate. It adds custom fill and
//! background colors, a configurable module size, and a logo overlay centered on a padding
//! frame in the background color.
//!
//! ## Features
//!
//! - Fill and background colors from hex codes, `rgb(...)` or color names.
//! - Configurable pixels per module, quiet zone and error correction level.
//! - Logo embedding sized relative to the code, with alpha-aware pasting.
//! - PNG (or any format `image` supports by extension), SVG and console output.
//! - Batch generation that keeps going when one item fails.
//!
//! ## Example
//!
//! Generate a colored QR code with a logo:
//!
//! ```rust,no_run
//! use qrtint::{OverlaySpec, QrComposer, QrRequest};
//!
//! fn main() -> Result<(), qrtint::QrError> {
//!     let request = QrRequest::new("https://github.com")
//!         .fill_color_str("#2ca02c")?
//!         .back_color_str("white")?;
//!     let logo = OverlaySpec::from_path("sample_logo.png", 0.25)?;
//!
//!     QrComposer::new().generate_and_save(&request, "output/qr_with_logo.png", Some(&logo))?;
//!     Ok(())
//! }
//! ```
//!
//! Generate an in-memory image:
//!
//! ```rust
//! use qrtint::{QrComposer, QrRequest};
//!
//! let img = QrComposer::new().generate(&QrRequest::new("Hello, World!")).unwrap();
//! let png = qrtint::helper::encode_png(&img).unwrap();
//! assert!(!png.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`composer`]: Generation, logo embedding, saving and batches.
//! - [`overlay`]: Logo sizing, placement and compositing.
//! - [`encoder`]: QR symbol encoding and version fitting.
//! - [`helper`]: Rendering symbols as raster, SVG and text, and saving images.

#![forbid(unsafe_code)]

pub mod color;
pub mod composer;
pub mod encoder;
pub mod error;
pub mod helper;
pub mod overlay;
pub mod request;

pub use color::Color;
pub use composer::{BatchJob, QrComposer};
pub use encoder::{QrCodeEcc, QrSymbol, Version};
pub use error::{QrError, Result};
pub use overlay::{LogoSource, OverlayPlacement, OverlaySpec};
pub use request::QrRequest;
