//! SVG rasterization at the document's natural size.

use resvg::{tiny_skia, usvg};

use super::{DecodeError, RasterImage};

/// How far into the file to look for an `<svg` tag.
const SNIFF_LEN: usize = 1024;

/// Check whether the bytes look like an SVG document.
///
/// Accepts an optional UTF-8 BOM, XML prolog, comments or doctype before the
/// root element.
pub fn is_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let head = head.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(head);
    let text = String::from_utf8_lossy(head);
    let trimmed = text.trim_start();

    trimmed.starts_with('<') && text.contains("<svg")
}

/// Rasterize an SVG document to RGBA at its intrinsic width and height.
///
/// # Errors
///
/// Returns `DecodeError::Svg` if parsing fails or the pixmap cannot be
/// allocated, and `DecodeError::EmptyImage` for zero-sized documents.
pub fn decode_svg(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| DecodeError::Svg(e.to_string()))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage);
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| DecodeError::Svg("Failed to allocate SVG pixmap".into()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; canvas image data is straight
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        pixels.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    Ok(RasterImage::new(width, height, pixels))
}
