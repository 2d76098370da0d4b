//! Cropper session bindings.
//!
//! [`JsCropSession`] wraps the core `Session` for the host UI. The host owns
//! the canvas, buttons and object URLs; it forwards pointer events and
//! control clicks here and draws whatever `render_preview` returns.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsCropSession();
//! session.load_image(bytes);
//!
//! const [w, h] = session.backing_size(window.devicePixelRatio);
//! canvas.width = w;
//! canvas.height = h;
//! canvas.style.width = `${session.surface_width}px`;
//!
//! const frame = session.render_preview();
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(frame.pixels()), frame.width), 0, 0);
//! ```

use crate::types::{filter_from_u8, JsRasterImage};
use cropkit_core::view::backing_size;
use cropkit_core::{CropperConfig, Point, RasterImage, Session, NO_HANDLE};
use wasm_bindgen::prelude::*;

/// A cropper instance for JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: Session,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session.
    ///
    /// `config` is an optional object with any subset of the `CropperConfig`
    /// fields; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be parsed or a value is out of range.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsCropSession, JsValue> {
        let config: CropperConfig = if config.is_undefined() || config.is_null() {
            CropperConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        Session::new(config)
            .map(|inner| Self { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Decode and load an image file (GIF, JPEG, PNG or SVG).
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner
            .load_bytes(bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Load RGBA pixels the host already decoded, e.g. from `getImageData`.
    pub fn load_pixels(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> Result<(), JsValue> {
        RasterImage::from_rgba(width, height, pixels)
            .map_err(|e| JsValue::from_str(&e.to_string()))
            .and_then(|image| {
                self.inner
                    .load_image(image)
                    .map_err(|e| JsValue::from_str(&e.to_string()))
            })
    }

    /// Load a previously decoded image. The pixels are copied.
    pub fn load_raster(&mut self, image: &JsRasterImage) -> Result<(), JsValue> {
        self.inner
            .load_image(image.as_raster().clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Surface width in CSS pixels (0 without an image)
    #[wasm_bindgen(getter)]
    pub fn surface_width(&self) -> f64 {
        self.inner.surface().map_or(0.0, |s| s.width)
    }

    /// Surface height in CSS pixels (0 without an image)
    #[wasm_bindgen(getter)]
    pub fn surface_height(&self) -> f64 {
        self.inner.surface().map_or(0.0, |s| s.height)
    }

    /// Canvas backing store size `[width, height]` for a device pixel ratio.
    pub fn backing_size(&self, pixel_ratio: f64) -> Vec<u32> {
        let (width, height) = self
            .inner
            .surface()
            .map_or((0, 0), |s| backing_size(s, pixel_ratio));
        vec![width, height]
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.transform().scale
    }

    /// Rotation in degrees (0, 90, 180 or 270)
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u16 {
        self.inner.transform().rotation.degrees()
    }

    #[wasm_bindgen(getter)]
    pub fn grayscale(&self) -> bool {
        self.inner.transform().grayscale
    }

    /// Zoom in one step and return the new scale.
    pub fn zoom_in(&mut self) -> f64 {
        self.inner.zoom_in()
    }

    /// Zoom out one step and return the new scale.
    pub fn zoom_out(&mut self) -> f64 {
        self.inner.zoom_out()
    }

    /// Rotate a quarter turn clockwise and return the new angle in degrees.
    pub fn rotate(&mut self) -> u16 {
        self.inner.rotate().degrees()
    }

    pub fn toggle_grayscale(&mut self) -> bool {
        self.inner.toggle_grayscale()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Set the preview resampling filter (0 = Nearest, 1 = Bilinear, 2 = Lanczos3).
    pub fn set_preview_filter(&mut self, filter: u8) {
        self.inner.set_preview_filter(filter_from_u8(filter));
    }

    /// Start a drag. Returns the locked handle index (0-8), or 9 without an image.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> u8 {
        self.inner
            .pointer_down(Point::new(x, y))
            .map_or(NO_HANDLE, |handle| handle.index())
    }

    /// Track the pointer. Returns the CSS cursor to show.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> String {
        self.inner.pointer_move(Point::new(x, y)).as_css().to_string()
    }

    /// Finish a drag. Returns PNG bytes of the crop, or `undefined` when
    /// nothing was exported.
    pub fn pointer_up(&mut self) -> Result<Option<Vec<u8>>, JsValue> {
        self.inner
            .pointer_up()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// CSS cursor for the last pointer position.
    #[wasm_bindgen(getter)]
    pub fn cursor(&self) -> String {
        self.inner.cursor().as_css().to_string()
    }

    /// Current selection as `{ x, y, w, h }` in surface pixels, or `null`.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.selection())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Active configuration as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Render the preview at surface size.
    pub fn render_preview(&self) -> Result<JsRasterImage, JsValue> {
        self.inner
            .render_preview()
            .map(JsRasterImage::from_raster)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Export the current selection as PNG bytes, or `undefined` without one.
    pub fn export_png(&self) -> Result<Option<Vec<u8>>, JsValue> {
        self.inner
            .export()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Tests for session bindings.
///
/// Only methods that do not build a `JsValue` run natively; the rest are
/// covered by `wasm_tests` below.
#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> JsCropSession {
        JsCropSession {
            inner: Session::default(),
        }
    }

    fn loaded(width: u32, height: u32) -> JsCropSession {
        let mut session = empty();
        session
            .inner
            .load_image(RasterImage::new(width, height, vec![200u8; (width * height * 4) as usize]))
            .unwrap();
        session
    }

    #[test]
    fn test_surface_getters() {
        let session = loaded(1000, 400);
        assert_eq!(session.surface_width(), 500.0);
        assert_eq!(session.surface_height(), 200.0);
        assert_eq!(session.backing_size(2.0), vec![1000, 400]);
        assert_eq!(session.scale(), 0.5);
    }

    #[test]
    fn test_empty_session() {
        let mut session = empty();
        assert!(!session.has_image());
        assert_eq!(session.surface_width(), 0.0);
        assert_eq!(session.backing_size(1.0), vec![0, 0]);
        assert_eq!(session.pointer_down(5.0, 5.0), NO_HANDLE);
        assert_eq!(session.pointer_move(5.0, 5.0), "default");
    }

    #[test]
    fn test_pointer_flow() {
        let mut session = loaded(100, 100);
        assert_eq!(session.pointer_move(50.0, 50.0), "crosshair");
        // New selection grows from its bottom-right corner
        assert_eq!(session.pointer_down(10.0, 10.0), 2);
        session.pointer_move(30.0, 30.0);
        assert_eq!(
            session.inner.selection(),
            Some(cropkit_core::Rect::new(10.0, 10.0, 24.0, 24.0))
        );

        let png = session.pointer_up().unwrap().unwrap();
        assert_eq!(&png[0..4], &[0x89, b'P', b'N', b'G']);
        assert_eq!(session.pointer_move(20.0, 20.0), "move");
    }

    #[test]
    fn test_controls() {
        let mut session = loaded(400, 200);
        assert_eq!(session.rotate(), 90);
        assert_eq!(session.rotation(), 90);
        assert_eq!(session.surface_width(), 200.0);

        assert!(session.toggle_grayscale());
        assert!(session.grayscale());

        assert!(session.zoom_in() > 1.0);
        session.reset();
        assert_eq!(session.rotation(), 0);
        assert!(!session.grayscale());
        assert_eq!(session.scale(), 1.0);
    }

    #[test]
    fn test_set_preview_filter() {
        let mut session = loaded(10, 10);
        session.set_preview_filter(2);
        assert_eq!(
            session.inner.config().preview_filter,
            cropkit_core::FilterType::Lanczos3
        );
    }
}
