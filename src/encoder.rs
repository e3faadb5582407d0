//! QR symbol encoding.
//!
//! This module adapts the `qrcode` crate into a plain module matrix. It owns the choice of
//! symbol version: encoding starts at a minimum version and, when fitting is enabled, moves
//! up one version at a time until the payload fits or version 40 is exhausted.

use core::str::FromStr;

use qrcode::types::QrError as EncodeError;
use qrcode::{EcLevel, QrCode};

use crate::error::{QrError, Result};

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    #[default]
    High,
}

impl QrCodeEcc {
    fn ec_level(self) -> EcLevel {
        match self {
            QrCodeEcc::Low => EcLevel::L,
            QrCodeEcc::Medium => EcLevel::M,
            QrCodeEcc::Quartile => EcLevel::Q,
            QrCodeEcc::High => EcLevel::H,
        }
    }

    fn from_ec_level(level: EcLevel) -> Self {
        match level {
            EcLevel::L => QrCodeEcc::Low,
            EcLevel::M => QrCodeEcc::Medium,
            EcLevel::Q => QrCodeEcc::Quartile,
            EcLevel::H => QrCodeEcc::High,
        }
    }
}

impl FromStr for QrCodeEcc {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(QrCodeEcc::Low),
            "m" | "medium" => Ok(QrCodeEcc::Medium),
            "q" | "quartile" => Ok(QrCodeEcc::Quartile),
            "h" | "high" => Ok(QrCodeEcc::High),
            other => Err(QrError::InvalidConfig(format!(
                "unknown error correction level: {} (expected L, M, Q or H)",
                other
            ))),
        }
    }
}

/// A QR code version (1–40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 40]. Use `Version::try_from` for
    /// untrusted input.
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Width and height of a symbol of this version, in modules: `version * 4 + 17`.
    pub const fn size(self) -> u32 {
        self.0 as u32 * 4 + 17
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::MIN
    }
}

impl TryFrom<u8> for Version {
    type Error = QrError;

    fn try_from(ver: u8) -> Result<Self> {
        if (Version::MIN.value()..=Version::MAX.value()).contains(&ver) {
            Ok(Version(ver))
        } else {
            Err(QrError::InvalidConfig(format!("version {} is outside 1..=40", ver)))
        }
    }
}

/// An encoded QR symbol: a square grid of dark and light modules.
///
/// Instances are immutable. Coordinates outside the grid read as light, which lets renderers
/// walk the quiet zone with the same accessor.
#[derive(Clone, Debug)]
pub struct QrSymbol {
    size: u32,
    version: Version,
    ecc: QrCodeEcc,
    modules: Vec<bool>,
}

impl QrSymbol {
    fn from_code(code: &QrCode) -> Result<Self> {
        let version = match code.version() {
            qrcode::Version::Normal(v) => u8::try_from(v)
                .map_err(|_| QrError::Encoding(EncodeError::InvalidVersion))
                .and_then(Version::try_from)?,
            qrcode::Version::Micro(_) => return Err(QrError::Encoding(EncodeError::InvalidVersion)),
        };
        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| color == qrcode::Color::Dark)
            .collect();
        Ok(Self {
            size: code.width() as u32,
            version,
            ecc: QrCodeEcc::from_ec_level(code.error_correction_level()),
            modules,
        })
    }

    /// Returns this symbol's size in modules, in the range [21, 177].
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.ecc
    }

    /// Returns the color of the module at the given coordinates.
    ///
    /// Returns `true` for dark modules and `false` for light modules. Coordinates outside the
    /// symbol return `false`.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.size as i32;
        range.contains(&x)
            && range.contains(&y)
            && self.modules[y as usize * self.size as usize + x as usize]
    }
}

/// Encodes `data` into a symbol of at least `min_version`.
///
/// With `fit` set, the smallest version from `min_version` upward that holds the payload is
/// used. Without it, only `min_version` is tried. Either way a payload that does not fit
/// fails with [`QrError::Encoding`].
pub fn encode(data: &[u8], ecc: QrCodeEcc, min_version: Version, fit: bool) -> Result<QrSymbol> {
    let last = if fit { Version::MAX.value() } else { min_version.value() };
    for ver in min_version.value()..=last {
        match QrCode::with_version(data, qrcode::Version::Normal(i16::from(ver)), ecc.ec_level()) {
            Ok(code) => return QrSymbol::from_code(&code),
            Err(EncodeError::DataTooLong) => continue,
            Err(other) => return Err(other.into()),
        }
    }
    Err(EncodeError::DataTooLong.into())
}
