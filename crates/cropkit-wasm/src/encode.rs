//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode RGBA pixel data to PNG bytes
//! - [`encode_png_from_image`] - Encode a JsRasterImage to PNG bytes
//!
//! # Example
//!
//! ```typescript
//! import { encode_png } from '@cropkit/wasm';
//!
//! const data = ctx.getImageData(0, 0, w, h);
//! const png = encode_png(new Uint8Array(data.data.buffer), w, h);
//! const url = URL.createObjectURL(new Blob([png], { type: 'image/png' }));
//! ```

use crate::types::JsRasterImage;
use cropkit_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsRasterImage to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsRasterImage) -> Result<Vec<u8>, JsValue> {
    let raster = image.as_raster();
    encode::encode_png(&raster.pixels, raster.width, raster.height)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
