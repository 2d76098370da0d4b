//! Image decoding WASM bindings.
//!
//! This module exposes the cropkit-core decoders to JavaScript. Hosts that
//! only drive a [`crate::JsCropSession`] can skip these and call
//! `load_image` directly; they are useful for inspecting a file first.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode GIF, JPEG, PNG or SVG bytes to RGBA
//! - [`is_svg`] - Check if bytes look like an SVG document
//! - [`grayscale`] - Grayscale a decoded image with the fast luma formula

use crate::types::JsRasterImage;
use cropkit_core::{decode, grayscale::grayscale_rgba, RasterImage};
use wasm_bindgen::prelude::*;

/// Decode an image from bytes.
///
/// JPEG images have their EXIF orientation applied. SVG documents are
/// rasterized at their intrinsic size.
///
/// # Errors
///
/// Returns an error if the format is not supported or the data is corrupted.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`Decoded ${image.width}x${image.height} image`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check if bytes look like an SVG document.
#[wasm_bindgen]
pub fn is_svg(bytes: &[u8]) -> bool {
    decode::is_svg(bytes)
}

/// Return a grayscale copy of an image. Alpha is preserved.
#[wasm_bindgen]
pub fn grayscale(image: &JsRasterImage) -> JsRasterImage {
    let source = image.as_raster();
    let mut pixels = source.pixels.clone();
    grayscale_rgba(&mut pixels);
    JsRasterImage::from_raster(RasterImage::new(source.width, source.height, pixels))
}
