//! Image decoding for Cropkit.
//!
//! This module provides functionality for:
//! - Decoding GIF, JPEG and PNG images (JPEG with EXIF orientation applied)
//! - Rasterizing SVG documents at their intrinsic size
//! - Wrapping host-decoded RGBA pixels
//!
//! All decoders produce a [`RasterImage`] with straight-alpha RGBA pixels,
//! the same layout as canvas `ImageData`.
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod raster;
mod svg;
mod types;

pub use raster::decode_raster;
pub use svg::{decode_svg, is_svg};
pub use types::{DecodeError, FilterType, Orientation, RasterImage};

/// Decode any supported image (GIF, JPEG, PNG, SVG) from bytes.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let image = if is_svg(bytes) {
        decode_svg(bytes)?
    } else {
        decode_raster(bytes)?
    };

    log::info!("Decoded {}x{} image", image.width, image.height);
    Ok(image)
}
