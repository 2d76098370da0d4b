//! Cropkit Core - Image cropping library
//!
//! This crate provides the core logic of the Cropkit cropper: selection
//! geometry and handles, the selection drag state machine, the view
//! transform across scale and rotation, grayscale filtering, live preview
//! rendering and PNG export. It has no browser dependency; `cropkit-wasm`
//! exposes it to JavaScript.
//!
//! Most hosts only need [`Session`], which ties everything together.

pub mod config;
pub mod decode;
pub mod encode;
pub mod export;
pub mod geometry;
pub mod grayscale;
pub mod handle;
pub mod preview;
pub mod selection;
pub mod session;
pub mod view;

pub use config::{ConfigError, CropperConfig};
pub use decode::{decode_image, DecodeError, FilterType, RasterImage};
pub use encode::{encode_png, EncodeError};
pub use export::{export_png, ExportError, ExportRequest, PixelRegion};
pub use geometry::{normalize_rect, Point, Rect, Segment, Size};
pub use grayscale::grayscale_rgba;
pub use handle::{hit_test, Cursor, Handle, NO_HANDLE};
pub use preview::{render_preview, PreviewStyle};
pub use selection::{DragState, Selection};
pub use session::{Session, SessionError, TransformState};
pub use view::{fit_scale, Rotation, ViewTransform};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_round_trip_through_reexports() {
        let mut session = Session::new(CropperConfig::default()).unwrap();
        session
            .load_image(RasterImage::new(2, 2, vec![255u8; 16]))
            .unwrap();

        assert_eq!(session.surface(), Some(Size::new(2.0, 2.0)));
        assert_eq!(session.pointer_down(Point::new(0.0, 0.0)), Some(Handle::BottomRight));
    }
}
