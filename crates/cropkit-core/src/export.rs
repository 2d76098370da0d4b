//! Crop export pipeline.
//!
//! Turns the on-surface selection into a PNG of the matching source pixels:
//!
//! 1. Rotate the full natural-resolution image like the preview
//! 2. Inverse-map the selection into rotated-source pixels
//! 3. Truncate to whole pixels; an empty region means nothing to export
//! 4. Extract the region (transparent outside the image), grayscale if enabled
//! 5. Encode to PNG
//!
//! Working at natural resolution means the export is independent of the
//! preview's zoom level.

use thiserror::Error;

use crate::decode::RasterImage;
use crate::encode::{encode_png, EncodeError};
use crate::geometry::{normalize_rect, Rect};
use crate::grayscale::grayscale_rgba;
use crate::view::{Rotation, ViewTransform};

/// Errors that can occur while exporting a crop.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The image buffer does not match its stated dimensions.
    #[error("Image buffer does not match {width}x{height}")]
    InvalidImage { width: u32, height: u32 },

    /// Encoding the cropped pixels failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// A whole-pixel region in the rotated source frame.
///
/// The origin may be negative or past the image when the selection reaches
/// outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Everything needed to export one crop.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub image: &'a RasterImage,
    pub view: ViewTransform,
    /// Selection in surface coordinates.
    pub selection: Rect,
    pub grayscale: bool,
}

/// Map a surface selection to whole source pixels.
///
/// Coordinates truncate toward zero the way canvas `getImageData` converts
/// them. Returns `None` when the region has no width or height.
pub fn source_region(view: &ViewTransform, selection: Rect) -> Option<PixelRegion> {
    let src = view.inverse_map(normalize_rect(selection));

    let width = src.w.trunc();
    let height = src.h.trunc();
    if !(width >= 1.0 && height >= 1.0) {
        return None;
    }

    Some(PixelRegion {
        x: src.x.trunc() as i64,
        y: src.y.trunc() as i64,
        width: width as u32,
        height: height as u32,
    })
}

/// Rotate an image clockwise by a quarter-turn multiple.
///
/// Returns `None` if the pixel buffer does not match the dimensions.
pub fn rotate_image(image: &RasterImage, rotation: Rotation) -> Option<RasterImage> {
    let view = image.as_view()?;
    let rotated = match rotation {
        Rotation::Deg0 => return Some(image.clone()),
        Rotation::Deg90 => image::imageops::rotate90(&view),
        Rotation::Deg180 => image::imageops::rotate180(&view),
        Rotation::Deg270 => image::imageops::rotate270(&view),
    };
    Some(RasterImage::from_rgba_image(rotated))
}

/// Copy a region out of an image.
///
/// Pixels of the region that fall outside the image are transparent black.
pub fn extract_region(image: &RasterImage, region: PixelRegion) -> RasterImage {
    let mut out = RasterImage::transparent(region.width, region.height);

    // Overlapping columns, in source coordinates
    let x0 = region.x.max(0);
    let x1 = (region.x + region.width as i64).min(image.width as i64);
    if x0 >= x1 {
        return out;
    }
    let span = (x1 - x0) as usize * 4;
    let dst_x = (x0 - region.x) as usize * 4;
    let src_stride = image.width as usize * 4;
    let dst_stride = region.width as usize * 4;

    for row in 0..region.height as i64 {
        let src_y = region.y + row;
        if src_y < 0 || src_y >= image.height as i64 {
            continue;
        }

        let src_start = src_y as usize * src_stride + x0 as usize * 4;
        let dst_start = row as usize * dst_stride + dst_x;
        out.pixels[dst_start..dst_start + span]
            .copy_from_slice(&image.pixels[src_start..src_start + span]);
    }

    out
}

/// Produce the cropped pixels for a request, without encoding.
///
/// Returns `Ok(None)` when the selection maps to an empty region.
pub fn crop_pixels(request: &ExportRequest<'_>) -> Result<Option<RasterImage>, ExportError> {
    let Some(region) = source_region(&request.view, request.selection) else {
        log::debug!("Selection maps to an empty region, nothing to export");
        return Ok(None);
    };

    let invalid = || ExportError::InvalidImage {
        width: request.image.width,
        height: request.image.height,
    };
    let rotated = rotate_image(request.image, request.view.rotation).ok_or_else(invalid)?;

    let mut cropped = extract_region(&rotated, region);
    if request.grayscale {
        grayscale_rgba(&mut cropped.pixels);
    }
    Ok(Some(cropped))
}

/// Run the full export pipeline and return PNG bytes.
///
/// Returns `Ok(None)` when there is nothing to export.
pub fn export_png(request: &ExportRequest<'_>) -> Result<Option<Vec<u8>>, ExportError> {
    let Some(cropped) = crop_pixels(request)? else {
        return Ok(None);
    };

    let png = encode_png(&cropped.pixels, cropped.width, cropped.height)?;
    log::info!(
        "Exported {}x{} crop ({} bytes)",
        cropped.width,
        cropped.height,
        png.len()
    );
    Ok(Some(png))
}
