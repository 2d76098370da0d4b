//! Cropping session state.
//!
//! A [`Session`] owns everything one cropper instance needs: the loaded
//! image, the transform state (scale, rotation, grayscale) and the selection
//! state machine. Every control of the widget is a method here, so a host
//! only forwards UI events and draws what the session renders.

use thiserror::Error;

use crate::config::{ConfigError, CropperConfig};
use crate::decode::{decode_image, DecodeError, FilterType, RasterImage};
use crate::export::{crop_pixels, export_png, ExportError, ExportRequest};
use crate::geometry::{Point, Rect, Size};
use crate::handle::{Cursor, Handle};
use crate::preview::{render_preview, PreviewStyle};
use crate::selection::Selection;
use crate::view::{fit_scale, Rotation, ViewTransform};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No image loaded")]
    NoImage,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Session-wide transform settings, changed only by explicit user actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub scale: f64,
    pub rotation: Rotation,
    pub grayscale: bool,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: Rotation::Deg0,
            grayscale: false,
        }
    }
}

/// One cropper instance.
#[derive(Debug, Clone)]
pub struct Session {
    config: CropperConfig,
    image: Option<RasterImage>,
    transform: TransformState,
    /// Scale that fits the current image, restored by `reset`.
    fit: f64,
    selection: Selection,
}

impl Default for Session {
    fn default() -> Self {
        let config = CropperConfig::default();
        let selection = Selection::new(config.initial_selection);
        Self {
            config,
            image: None,
            transform: TransformState::default(),
            fit: 1.0,
            selection,
        }
    }
}

impl Session {
    /// Create a session after validating `config`.
    pub fn new(config: CropperConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let selection = Selection::new(config.initial_selection);
        Ok(Self {
            config,
            selection,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    /// Change the resampling filter used by [`Session::render_preview`].
    pub fn set_preview_filter(&mut self, filter: FilterType) {
        self.config.preview_filter = filter;
    }

    pub fn image(&self) -> Option<&RasterImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn transform(&self) -> TransformState {
        self.transform
    }

    /// Current selection rectangle, if one exists.
    pub fn selection(&self) -> Option<Rect> {
        self.selection.rect()
    }

    pub fn is_dragging(&self) -> bool {
        self.selection.is_dragging()
    }

    /// View transform for the loaded image.
    pub fn view(&self) -> Option<ViewTransform> {
        self.image.as_ref().map(|image| {
            ViewTransform::new(
                image.size(),
                self.transform.scale,
                self.transform.rotation,
                self.config.surface_cap,
            )
        })
    }

    /// Surface size in CSS pixels, if an image is loaded.
    pub fn surface(&self) -> Option<Size> {
        self.view().map(|view| view.surface)
    }

    /// Replace the image and reset all transform and selection state.
    pub fn load_image(&mut self, image: RasterImage) -> Result<(), SessionError> {
        if image.is_empty() {
            return Err(DecodeError::EmptyImage.into());
        }

        self.fit = fit_scale(image.size(), self.config.surface_cap);
        self.transform = TransformState {
            scale: self.fit,
            ..TransformState::default()
        };
        self.selection.clear();
        log::info!(
            "Loaded {}x{} image at scale {}",
            image.width,
            image.height,
            self.fit
        );
        self.image = Some(image);
        Ok(())
    }

    /// Decode `bytes` and load the result.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let image = decode_image(bytes)?;
        self.load_image(image)
    }

    /// Increase the scale by one zoom step. Returns the new scale.
    pub fn zoom_in(&mut self) -> f64 {
        self.set_scale(self.transform.scale + self.config.zoom_step)
    }

    /// Decrease the scale by one zoom step, stopping at the minimum scale.
    /// Returns the new scale.
    ///
    /// Never increases the scale: an image fitted below the minimum stays
    /// at its fitted scale, and the selection is kept when nothing changes.
    pub fn zoom_out(&mut self) -> f64 {
        let current = self.transform.scale;
        let target = current - self.config.zoom_step;
        let floor = self.config.min_scale.min(current);
        if target >= floor {
            return self.set_scale(target);
        }

        log::warn!(
            "Zoom reached minimum scale {}, ignoring further zoom out",
            floor
        );
        if floor < current {
            self.set_scale(floor)
        } else {
            current
        }
    }

    fn set_scale(&mut self, scale: f64) -> f64 {
        // Selection is in surface coordinates and does not survive a rescale
        self.transform.scale = scale;
        self.selection.clear();
        log::debug!("Scale set to {}", scale);
        scale
    }

    /// Advance the rotation by a quarter turn. Returns the new rotation.
    pub fn rotate(&mut self) -> Rotation {
        self.transform.rotation = self.transform.rotation.next();
        self.selection.clear();
        log::debug!("Rotation set to {}", self.transform.rotation.degrees());
        self.transform.rotation
    }

    /// Flip the grayscale flag. The selection is kept. Returns the new flag.
    pub fn toggle_grayscale(&mut self) -> bool {
        self.transform.grayscale = !self.transform.grayscale;
        log::debug!("Grayscale {}", self.transform.grayscale);
        self.transform.grayscale
    }

    /// Restore the fitted scale and clear rotation, grayscale and selection.
    pub fn reset(&mut self) {
        self.transform = TransformState {
            scale: self.fit,
            ..TransformState::default()
        };
        self.selection.clear();
        log::debug!("Session reset");
    }

    /// Start a drag at `point` (surface coordinates).
    ///
    /// Returns the locked handle, or `None` when no image is loaded.
    pub fn pointer_down(&mut self, point: Point) -> Option<Handle> {
        let surface = self.surface()?;
        Some(self.selection.pointer_down(clamp_point(point, surface)))
    }

    /// Track the pointer and return the cursor to show.
    ///
    /// Positions outside the surface (from a captured pointer) are pulled
    /// back onto its edge before the drag delta is taken.
    pub fn pointer_move(&mut self, point: Point) -> Cursor {
        let Some(surface) = self.surface() else {
            return Cursor::Default;
        };
        self.selection.pointer_move(clamp_point(point, surface), surface)
    }

    /// Finish a drag and export the selection.
    ///
    /// Returns the PNG bytes, or `None` when no drag was active or the
    /// selection covers less than one source pixel.
    pub fn pointer_up(&mut self) -> Result<Option<Vec<u8>>, SessionError> {
        if self.selection.pointer_up().is_none() {
            return Ok(None);
        }
        self.export()
    }

    /// Cursor for the last pointer position.
    pub fn cursor(&self) -> Cursor {
        if self.has_image() {
            self.selection.cursor()
        } else {
            Cursor::Default
        }
    }

    fn export_request(&self) -> Result<Option<ExportRequest<'_>>, SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImage)?;
        let view = self.view().ok_or(SessionError::NoImage)?;

        Ok(self.selection.rect().map(|selection| ExportRequest {
            image,
            view,
            selection,
            grayscale: self.transform.grayscale,
        }))
    }

    /// Encode the current selection as PNG.
    ///
    /// Returns `None` without a selection or when it maps to no pixels.
    pub fn export(&self) -> Result<Option<Vec<u8>>, SessionError> {
        match self.export_request()? {
            Some(request) => Ok(export_png(&request)?),
            None => Ok(None),
        }
    }

    /// Cropped pixels of the current selection, without encoding.
    pub fn crop(&self) -> Result<Option<RasterImage>, SessionError> {
        match self.export_request()? {
            Some(request) => Ok(crop_pixels(&request)?),
            None => Ok(None),
        }
    }

    /// Rasterize the live preview at surface size.
    pub fn render_preview(&self) -> Result<RasterImage, SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImage)?;
        let view = self.view().ok_or(SessionError::NoImage)?;
        let style = PreviewStyle::from(&self.config);

        render_preview(
            image,
            &view,
            self.selection.rect(),
            self.transform.grayscale,
            &style,
        )
        .ok_or_else(|| {
            ExportError::InvalidImage {
                width: image.width,
                height: image.height,
            }
            .into()
        })
    }
}

/// Bound a pointer position to `[0, width] x [0, height]`.
fn clamp_point(point: Point, surface: Size) -> Point {
    Point::new(
        point.x.clamp(0.0, surface.width.max(0.0)),
        point.y.clamp(0.0, surface.height.max(0.0)),
    )
}
