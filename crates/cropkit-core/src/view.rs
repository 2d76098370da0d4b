//! View transform between the source image and the drawing surface.
//!
//! The surface shows the image scaled by `scale` and rotated clockwise by a
//! quarter-turn multiple. It is capped to a maximum size, so a zoomed image
//! may only be partly visible; the visible part is always centered.
//!
//! # Frames
//!
//! - **Source frame**: natural image pixels
//! - **Rotated source frame**: source rotated by the session rotation
//!   (axes swapped for 90°/270°); export crops in this frame
//! - **Surface frame**: on-screen pixels, equal to the rotated source frame
//!   scaled by `scale` and center-cropped to the surface size

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};

/// Quarter-turn rotation applied to the image, clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Rotation angle in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Parse a degree value. Only exact quarter turns in `0..360` are accepted.
    pub fn from_degrees(degrees: u16) -> Option<Rotation> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// Next step of the rotate control: 0 → 90 → 180 → 270 → 0.
    pub fn next(self) -> Rotation {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Returns true if this rotation exchanges width and height.
    #[inline]
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Apply the axis swap of this rotation to a size.
    #[inline]
    pub fn apply_to(self, size: Size) -> Size {
        if self.swaps_axes() {
            size.swapped()
        } else {
            size
        }
    }
}

/// Initial scale that fits the image inside `cap`.
///
/// Images already inside the cap are shown at 1:1. Larger ones are scaled
/// down along the constraining axis: by width when the image is relatively
/// wider than the cap, by height otherwise. Never upscales.
pub fn fit_scale(image: Size, cap: Size) -> f64 {
    if image.width <= cap.width && image.height <= cap.height {
        return 1.0;
    }

    if image.aspect_ratio() > cap.aspect_ratio() {
        cap.width / image.width
    } else {
        cap.height / image.height
    }
}

/// Surface size for an image at `scale`, capped per axis, then swapped for
/// 90°/270° rotations.
pub fn surface_size(image: Size, scale: f64, cap: Size, rotation: Rotation) -> Size {
    let size = Size::new(
        cap.width.min(image.width * scale),
        cap.height.min(image.height * scale),
    );
    rotation.apply_to(size)
}

/// Device pixel size of the canvas backing store for a surface.
///
/// Fractional sizes truncate, like assigning to `canvas.width`.
pub fn backing_size(surface: Size, pixel_ratio: f64) -> (u32, u32) {
    let ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
    (
        (surface.width * ratio).max(0.0) as u32,
        (surface.height * ratio).max(0.0) as u32,
    )
}

/// Where the scaled image lands before rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPlacement {
    /// The drawable area in the unrotated frame (surface with axes restored).
    pub area: Size,
    /// The scaled image rectangle, centered in `area`. It extends past the
    /// area when the image is larger than the cap.
    pub image: Rect,
}

/// Complete mapping state for one image on one surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Natural image size.
    pub image: Size,
    pub scale: f64,
    pub rotation: Rotation,
    /// Current surface size, already swapped for rotation.
    pub surface: Size,
}

impl ViewTransform {
    /// Build a transform, deriving the surface size from `cap`.
    pub fn new(image: Size, scale: f64, rotation: Rotation, cap: Size) -> Self {
        Self {
            image,
            scale,
            rotation,
            surface: surface_size(image, scale, cap, rotation),
        }
    }

    /// Natural image size in the rotated source frame.
    pub fn rotated_image(&self) -> Size {
        self.rotation.apply_to(self.image)
    }

    /// Draw-time geometry.
    ///
    /// The renderer rotates around the surface center, restores the
    /// unrotated axes and draws the scaled image centered in that area.
    pub fn draw_placement(&self) -> DrawPlacement {
        let area = self.rotation.apply_to(self.surface);
        let scaled = Size::new(self.image.width * self.scale, self.image.height * self.scale);

        DrawPlacement {
            area,
            image: Rect::new(
                (area.width - scaled.width) / 2.0,
                (area.height - scaled.height) / 2.0,
                scaled.width,
                scaled.height,
            ),
        }
    }

    /// Map a surface selection to rotated-source pixel coordinates.
    ///
    /// Accounts for the centering offset when only part of the scaled image
    /// fits on the surface.
    pub fn inverse_map(&self, selection: Rect) -> Rect {
        let image = self.rotated_image();
        let visible = Size::new(self.surface.width / self.scale, self.surface.height / self.scale);

        Rect {
            x: (image.width - visible.width) / 2.0 + selection.x / self.scale,
            y: (image.height - visible.height) / 2.0 + selection.y / self.scale,
            w: selection.w / self.scale,
            h: selection.h / self.scale,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = Size> {
        (1u32..=4000, 1u32..=4000).prop_map(|(w, h)| Size::new(w as f64, h as f64))
    }

    proptest! {
        /// Property: Fitted images never exceed the cap.
        #[test]
        fn prop_fit_scale_fits(image in image_strategy()) {
            let cap = Size::new(500.0, 500.0);
            let scale = fit_scale(image, cap);
            prop_assert!(scale > 0.0 && scale <= 1.0);
            prop_assert!(image.width * scale <= cap.width + 1e-9);
            prop_assert!(image.height * scale <= cap.height + 1e-9);
        }

        /// Property: Four rotations bring the surface back to its original size.
        #[test]
        fn prop_four_rotations_identity(image in image_strategy(), scale in 0.1f64..3.0) {
            let cap = Size::new(500.0, 500.0);
            let mut rotation = Rotation::Deg0;
            let original = surface_size(image, scale, cap, rotation);
            for _ in 0..4 {
                rotation = rotation.next();
            }
            prop_assert_eq!(rotation, Rotation::Deg0);
            prop_assert_eq!(surface_size(image, scale, cap, rotation), original);
        }

        /// Property: Selecting the whole surface maps inside the rotated image.
        #[test]
        fn prop_full_surface_maps_inside_image(
            image in image_strategy(),
            scale in 0.1f64..3.0,
            turns in 0u16..4,
        ) {
            let cap = Size::new(500.0, 500.0);
            let rotation = Rotation::from_degrees(turns * 90).unwrap();
            let view = ViewTransform::new(image, scale, rotation, cap);
            let src = view.inverse_map(Rect::new(0.0, 0.0, view.surface.width, view.surface.height));
            let rotated = view.rotated_image();

            prop_assert!(src.x >= -1e-6);
            prop_assert!(src.y >= -1e-6);
            prop_assert!(src.x + src.w <= rotated.width + 1e-6);
            prop_assert!(src.y + src.h <= rotated.height + 1e-6);
        }
    }
}
