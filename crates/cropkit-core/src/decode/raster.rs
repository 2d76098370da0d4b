//! GIF, JPEG and PNG decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageFormat;

use super::{DecodeError, Orientation, RasterImage};

/// Decode a GIF, JPEG or PNG image from bytes.
///
/// JPEG images are rotated upright according to their EXIF orientation.
/// Animated GIFs yield their first frame.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be detected,
/// `DecodeError::UnsupportedFormat` for formats outside GIF/JPEG/PNG and
/// `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_raster(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    if !matches!(format, ImageFormat::Gif | ImageFormat::Jpeg | ImageFormat::Png) {
        return Err(DecodeError::UnsupportedFormat(format!("{:?}", format)));
    }

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = if format == ImageFormat::Jpeg {
        extract_orientation(bytes).apply(img)
    } else {
        img
    };

    let rgba = img.into_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }
    Ok(RasterImage::from_rgba_image(rgba))
}

/// Extract EXIF orientation from JPEG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn encode(img: &RgbaImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgba8(img.clone())
                .into_rgb8()
                .write_to(&mut out, format)
                .unwrap(),
            _ => img.write_to(&mut out, format).unwrap(),
        }
        out.into_inner()
    }

    fn sample_image() -> RgbaImage {
        RgbaImage::from_fn(6, 4, |x, y| Rgba([(x * 40) as u8, (y * 60) as u8, 90, 200]))
    }

    #[test]
    fn test_decode_png_preserves_pixels() {
        let img = sample_image();
        let decoded = decode_raster(&encode(&img, ImageFormat::Png)).unwrap();

        assert_eq!(decoded.width, 6);
        assert_eq!(decoded.height, 4);
        assert_eq!(decoded.pixels, img.into_raw());
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        let decoded = decode_raster(&encode(&sample_image(), ImageFormat::Jpeg)).unwrap();

        assert_eq!(decoded.width, 6);
        assert_eq!(decoded.height, 4);
        // JPEG has no alpha; decoded pixels are opaque
        assert!(decoded.pixels.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_decode_gif() {
        let decoded = decode_raster(&encode(&sample_image(), ImageFormat::Gif)).unwrap();
        assert_eq!((decoded.width, decoded.height), (6, 4));
    }

    #[test]
    fn test_jpeg_without_exif_is_normal() {
        let bytes = encode(&sample_image(), ImageFormat::Jpeg);
        assert_eq!(extract_orientation(&bytes), Orientation::Normal);
    }

    #[test]
    fn test_invalid_bytes() {
        let result = decode_raster(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_truncated_png() {
        let bytes = encode(&sample_image(), ImageFormat::Png);
        let result = decode_raster(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }
}
