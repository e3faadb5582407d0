use crate::color::Color;
use crate::encoder::QrSymbol;
use crate::error::{QrError, Result};

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Largest side, in pixels, of any image the crate will allocate.
pub const MAX_IMAGE_SIDE: u32 = 1 << 15;

/*---- Utilities ----*/

/// Side in pixels of a symbol drawn with `border` quiet modules at `box_size` pixels each.
///
/// Fails with [`QrError::InvalidConfig`] when `box_size` is zero or the result overflows or
/// exceeds [`MAX_IMAGE_SIDE`].
pub fn canvas_size(symbol_size: u32, border: u32, box_size: u32) -> Result<u32> {
    if box_size == 0 {
        return Err(QrError::InvalidConfig("box size must be at least 1".to_string()));
    }
    border
        .checked_mul(2)
        .and_then(|quiet| quiet.checked_add(symbol_size))
        .and_then(|modules| modules.checked_mul(box_size))
        .filter(|&side| side <= MAX_IMAGE_SIDE)
        .ok_or_else(|| {
            QrError::InvalidConfig(format!(
                "{} modules with a border of {} at {} px per module exceeds {} px",
                symbol_size, border, box_size, MAX_IMAGE_SIDE
            ))
        })
}

/// Rasterizes a symbol into an RGB image.
///
/// Every module becomes a `box_size` × `box_size` square: `fill` for dark modules, `back` for
/// light modules and for the `border` modules of quiet zone around the symbol. The result is
/// `(symbol.size() + 2 * border) * box_size` pixels on each side, as computed by
/// [`canvas_size`]. `box_size` must be nonzero.
///
/// # Example
///
/// ```rust
/// use qrtint::{encoder, helper::render_symbol, Color, QrCodeEcc, Version};
///
/// let symbol = encoder::encode(b"Hello", QrCodeEcc::Low, Version::MIN, true).unwrap();
/// let img = render_symbol(&symbol, 4, 10, Color::BLACK, Color::WHITE).unwrap();
/// assert_eq!(img.dimensions(), (290, 290));
/// ```
pub fn render_symbol(symbol: &QrSymbol, border: u32, box_size: u32, fill: Color, back: Color) -> Result<RgbImage> {
    let size = canvas_size(symbol.size(), border, box_size)?;
    let dark: Rgb<u8> = fill.into();
    let light: Rgb<u8> = back.into();
    let mut img = ImageBuffer::new(size, size);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = (x / box_size) as i32 - border as i32;
        let qr_y = (y / box_size) as i32 - border as i32;
        *pixel = if symbol.get_module(qr_x, qr_y) { dark } else { light };
    }

    Ok(img)
}

// Returns a string of SVG code for an image depicting
// the given symbol, with the given number of border modules.
// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(symbol: &QrSymbol, border: u32, box_size: u32, fill: Color, back: Color) -> Result<String> {
	let pixels = canvas_size(symbol.size(), border, box_size)?;
	let dimension = pixels / box_size;
	let mut result = String::new();
	result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
	result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
	result += &format!(
		"<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{1}\" height=\"{1}\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
		dimension, pixels);
	result += &format!("\t<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n", back.to_hex());
	result += "\t<path d=\"";
	let mut first = true;
	for y in 0 .. symbol.size() as i32 {
		for x in 0 .. symbol.size() as i32 {
			if symbol.get_module(x, y) {
				if !first {
					result += " ";
				}
				first = false;
				result += &format!("M{},{}h1v1h-1z", x + border as i32, y + border as i32);
			}
		}
	}
	result += &format!("\" fill=\"{}\"/>\n", fill.to_hex());
	result += "</svg>\n";
	Ok(result)
}

/// Renders the symbol as block characters for terminal preview.
///
/// Each module is two characters wide so the output looks roughly square.
pub fn to_console_string(symbol: &QrSymbol, border: u32) -> String {
	let border = border as i32;
	let mut out = String::new();
	for y in -border .. symbol.size() as i32 + border {
		for x in -border .. symbol.size() as i32 + border {
			let c: char = if symbol.get_module(x, y) { '█' } else { ' ' };
			out.push(c);
			out.push(c);
		}
		out.push('\n');
	}
	out
}

/// Encodes an image as PNG into memory.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
    Ok(buffer)
}

/// Saves an image to `path`, choosing the format from the file extension.
///
/// Missing parent directories are created once the format is known.
///
/// # Errors
///
/// Returns [`QrError::Io`] when the directory or file cannot be written and
/// [`QrError::Image`] when the extension names no supported format. In the latter case nothing
/// is created on disk.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    image.save_with_format(path, format)?;
    Ok(())
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{encode, QrCodeEcc, Version};

    fn hello() -> QrSymbol {
        encode(b"HELLO WORLD", QrCodeEcc::Low, Version::MIN, true).unwrap()
    }

    #[test]
    fn test_render_symbol_colors() {
        let fill = Color::new(31, 119, 180);
        let back = Color::new(255, 255, 204);
        let img = render_symbol(&hello(), 4, 3, fill, back).unwrap();

        assert_eq!(img.dimensions(), (87, 87));
        // Quiet zone, then the top-left finder pattern.
        assert_eq!(*img.get_pixel(0, 0), Rgb([255, 255, 204]));
        assert_eq!(*img.get_pixel(12, 12), Rgb([31, 119, 180]));
        assert_eq!(*img.get_pixel(14, 14), Rgb([31, 119, 180]));
    }

    #[test]
    fn test_to_svg_string() {
        let svg = to_svg_string(&hello(), 4, 10, Color::BLACK, Color::WHITE).unwrap();

        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(svg.contains("viewBox=\"0 0 29 29\""));
        assert!(svg.contains("width=\"290\""));
        assert!(svg.contains("fill=\"#ffffff\""));
        assert!(svg.contains("M4,4h1v1h-1z"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_to_console_string() {
        let text = to_console_string(&hello(), 1);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 23);
        assert!(lines.iter().all(|line| line.chars().count() == 46));
        assert!(lines[0].chars().all(|c| c == ' '));
        assert!(lines[1].starts_with("  ██"));
    }

    #[test]
    fn test_encode_png_signature() {
        let img = DynamicImage::ImageRgb8(render_symbol(&hello(), 4, 1, Color::BLACK, Color::WHITE).unwrap());
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_canvas_size_limits() {
        assert_eq!(canvas_size(21, 4, 10).unwrap(), 290);
        assert_eq!(canvas_size(21, 0, 1).unwrap(), 21);
        for (border, box_size) in [(4, 0), (4, 200_000_000), (u32::MAX, 1), (u32::MAX / 2, 2), (10_000, 10)] {
            let err = canvas_size(21, border, box_size).unwrap_err();
            assert!(matches!(err, QrError::InvalidConfig(_)), "border {} box {}", border, box_size);
        }
    }

    #[test]
    fn test_oversized_render_is_rejected() {
        let symbol = hello();
        assert!(matches!(
            render_symbol(&symbol, 4, 200_000_000, Color::BLACK, Color::WHITE),
            Err(QrError::InvalidConfig(_))
        ));
        assert!(matches!(
            to_svg_string(&symbol, u32::MAX, 10, Color::BLACK, Color::WHITE),
            Err(QrError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_save_image_unknown_extension_creates_nothing() {
        let dir = std::env::temp_dir().join(format!("qrtint_helper_ext_{}", std::process::id()));
        let img = DynamicImage::new_rgb8(4, 4);

        let err = save_image(&img, &dir.join("nested").join("qr.notaformat")).unwrap_err();

        assert!(matches!(err, QrError::Image(_)), "got {:?}", err);
        assert!(!dir.exists());
    }
}
