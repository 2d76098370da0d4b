//! Cropkit WASM - WebAssembly bindings for Cropkit
//!
//! This crate provides WASM bindings to expose the cropkit-core functionality
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `session` - The cropper session driven by the host UI
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (GIF, JPEG, PNG, SVG)
//! - `encode` - PNG encoding bindings
//! - `logger` - `log` backend writing to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession } from '@cropkit/wasm';
//!
//! await init();
//!
//! const session = new JsCropSession({ surface_cap: { width: 640, height: 480 } });
//! session.load_image(new Uint8Array(await file.arrayBuffer()));
//!
//! canvas.onpointerdown = (e) => session.pointer_down(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => {
//!   canvas.style.cursor = session.pointer_move(e.offsetX, e.offsetY);
//! };
//! canvas.onpointerup = () => {
//!   const png = session.pointer_up();
//!   if (png) showDownload(new Blob([png], { type: 'image/png' }));
//! };
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod logger;
mod session;
mod types;

// Re-export public types
pub use decode::{decode_image, grayscale, is_svg};
pub use encode::{encode_png, encode_png_from_image};
pub use logger::set_log_level;
pub use session::JsCropSession;
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::install(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
        assert!(!version().is_empty());
    }
}
