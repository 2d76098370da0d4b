//! Live preview rendering.
//!
//! Rasterizes what the surface shows: the visible part of the scaled image,
//! rotated, optionally grayscaled, with the selection overlay on top. The
//! output is surface-sized RGBA ready for `putImageData`.
//!
//! # Overlay
//!
//! - Outside the selection: black cover at `cover_opacity`
//! - Selection outline and 8 handle dots in `stroke_color`
//! - Rule-of-thirds guides dashed 2 on / 4 off in `guide_color`

use image::{Rgba, RgbaImage};

use crate::config::CropperConfig;
use crate::decode::{FilterType, RasterImage};
use crate::export::{extract_region, rotate_image, PixelRegion};
use crate::geometry::{guide_lines, handle_dots, normalize_rect, Rect, Segment};
use crate::grayscale::grayscale_rgba;
use crate::view::ViewTransform;

/// Dash pattern of the guide lines, in pixels.
const DASH_ON: u32 = 2;
const DASH_OFF: u32 = 4;

/// Colors and filter used to draw the preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewStyle {
    pub filter: FilterType,
    pub cover_opacity: f32,
    pub stroke_color: [u8; 3],
    pub guide_color: [u8; 3],
    pub guide_opacity: f32,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self::from(&CropperConfig::default())
    }
}

impl From<&CropperConfig> for PreviewStyle {
    fn from(config: &CropperConfig) -> Self {
        Self {
            filter: config.preview_filter,
            cover_opacity: config.cover_opacity,
            stroke_color: config.stroke_color,
            guide_color: config.guide_color,
            guide_opacity: config.guide_opacity,
        }
    }
}

/// Render the image as it appears on the surface, without any overlay.
///
/// Returns `None` if the image buffer does not match its dimensions.
pub fn render_image_layer(
    image: &RasterImage,
    view: &ViewTransform,
    filter: FilterType,
) -> Option<RasterImage> {
    let placement = view.draw_placement();
    let area_w = placement.area.width.max(0.0) as u32;
    let area_h = placement.area.height.max(0.0) as u32;
    if area_w == 0 || area_h == 0 {
        let surface = view.rotation.apply_to(placement.area);
        return Some(RasterImage::transparent(
            surface.width.max(0.0) as u32,
            surface.height.max(0.0) as u32,
        ));
    }

    // Part of the natural image that lands inside the drawable area
    let src_x = (-placement.image.x / view.scale).max(0.0);
    let src_y = (-placement.image.y / view.scale).max(0.0);
    let src_w = placement.area.width / view.scale;
    let src_h = placement.area.height / view.scale;

    let x0 = (src_x.floor() as u32).min(image.width.saturating_sub(1));
    let y0 = (src_y.floor() as u32).min(image.height.saturating_sub(1));
    let x1 = ((src_x + src_w).ceil() as u32).clamp(x0 + 1, image.width);
    let y1 = ((src_y + src_h).ceil() as u32).clamp(y0 + 1, image.height);

    // Reject malformed buffers before slicing into them
    image.as_view()?;
    let window = PixelRegion {
        x: x0 as i64,
        y: y0 as i64,
        width: x1 - x0,
        height: y1 - y0,
    };
    let visible = extract_region(image, window).into_rgba_image()?;
    let scaled = if visible.dimensions() == (area_w, area_h) {
        visible
    } else {
        image::imageops::resize(&visible, area_w, area_h, filter.to_image_filter())
    };

    rotate_image(&RasterImage::from_rgba_image(scaled), view.rotation)
}

/// Render the full preview: image layer plus selection overlay.
///
/// Without a selection only the image is drawn.
pub fn render_preview(
    image: &RasterImage,
    view: &ViewTransform,
    selection: Option<Rect>,
    grayscale: bool,
    style: &PreviewStyle,
) -> Option<RasterImage> {
    let mut layer = render_image_layer(image, view, style.filter)?;
    if grayscale {
        grayscale_rgba(&mut layer.pixels);
    }

    let Some(selection) = selection else {
        return Some(layer);
    };

    let mut canvas = layer.into_rgba_image()?;
    draw_cover(&mut canvas, selection, style.cover_opacity);
    stroke_rect(&mut canvas, selection, style.stroke_color);
    for dot in handle_dots(selection) {
        fill_rect(&mut canvas, dot, style.stroke_color, 1.0);
    }
    for line in guide_lines(selection) {
        dashed_line(&mut canvas, line, style.guide_color, style.guide_opacity);
    }

    Some(RasterImage::from_rgba_image(canvas))
}

/// Source-over blend of a solid color onto a straight-alpha pixel.
fn blend(px: &mut Rgba<u8>, color: [u8; 3], alpha: f32) {
    let da = px[3] as f32 / 255.0;
    let out_a = alpha + da * (1.0 - alpha);
    if out_a <= 0.0 {
        return;
    }

    for c in 0..3 {
        let v = (color[c] as f32 * alpha + px[c] as f32 * da * (1.0 - alpha)) / out_a;
        px[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    px[3] = (out_a * 255.0).round() as u8;
}

/// Pixel columns or rows whose centers fall in `[start, start + len)`.
fn pixel_span(start: f64, len: f64, limit: u32) -> std::ops::Range<u32> {
    let from = (start - 0.5).ceil().clamp(0.0, limit as f64) as u32;
    let to = (start + len - 0.5).ceil().clamp(0.0, limit as f64) as u32;
    from..to.max(from)
}

fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: [u8; 3], alpha: f32) {
    let r = normalize_rect(rect);
    let (w, h) = canvas.dimensions();
    for y in pixel_span(r.y, r.h, h) {
        for x in pixel_span(r.x, r.w, w) {
            blend(canvas.get_pixel_mut(x, y), color, alpha);
        }
    }
}

/// Dim everything outside the selection.
fn draw_cover(canvas: &mut RgbaImage, selection: Rect, opacity: f32) {
    let r = normalize_rect(selection);
    let (w, h) = canvas.dimensions();
    let cols = pixel_span(r.x, r.w, w);
    let rows = pixel_span(r.y, r.h, h);

    for (x, y, px) in canvas.enumerate_pixels_mut() {
        if !(cols.contains(&x) && rows.contains(&y)) {
            blend(px, [0, 0, 0], opacity);
        }
    }
}

/// One-pixel outline along the selection edges.
fn stroke_rect(canvas: &mut RgbaImage, rect: Rect, color: [u8; 3]) {
    let r = normalize_rect(rect);
    let edges = [
        Rect::new(r.x, r.y - 0.5, r.w, 1.0),
        Rect::new(r.x, r.y + r.h - 0.5, r.w, 1.0),
        Rect::new(r.x - 0.5, r.y, 1.0, r.h),
        Rect::new(r.x + r.w - 0.5, r.y, 1.0, r.h),
    ];
    for edge in edges {
        fill_rect(canvas, edge, color, 1.0);
    }
}

/// Axis-aligned dashed line.
fn dashed_line(canvas: &mut RgbaImage, line: Segment, color: [u8; 3], alpha: f32) {
    let (w, h) = canvas.dimensions();
    let horizontal = line.from.y == line.to.y;

    let (along, across, limit_along, limit_across) = if horizontal {
        (
            pixel_span(line.from.x.min(line.to.x), (line.to.x - line.from.x).abs(), w),
            line.from.y.floor(),
            w,
            h,
        )
    } else {
        (
            pixel_span(line.from.y.min(line.to.y), (line.to.y - line.from.y).abs(), h),
            line.from.x.floor(),
            h,
            w,
        )
    };
    if across < 0.0 || across >= limit_across as f64 || along.start >= limit_along {
        return;
    }
    let across = across as u32;
    let origin = along.start;

    for i in along {
        if (i - origin) % (DASH_ON + DASH_OFF) >= DASH_ON {
            continue;
        }
        let (x, y) = if horizontal { (i, across) } else { (across, i) };
        blend(canvas.get_pixel_mut(x, y), color, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::view::Rotation;

    const CAP: Size = Size {
        width: 500.0,
        height: 500.0,
    };

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RasterImage {
        RasterImage::new(width, height, color.repeat((width * height) as usize))
    }

    fn pixel(image: &RasterImage, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * image.width + x) * 4) as usize;
        [
            image.pixels[i],
            image.pixels[i + 1],
            image.pixels[i + 2],
            image.pixels[i + 3],
        ]
    }

    #[test]
    fn test_image_layer_matches_surface() {
        let img = solid(1000, 400, [200, 100, 50, 255]);
        let view = ViewTransform::new(img.size(), 0.5, Rotation::Deg0, CAP);
        let layer = render_image_layer(&img, &view, FilterType::Bilinear).unwrap();

        assert_eq!((layer.width, layer.height), (500, 200));
        assert_eq!(pixel(&layer, 250, 100), [200, 100, 50, 255]);
    }

    #[test]
    fn test_image_layer_rotated() {
        let img = solid(300, 100, [1, 2, 3, 255]);
        let view = ViewTransform::new(img.size(), 1.0, Rotation::Deg90, CAP);
        let layer = render_image_layer(&img, &view, FilterType::Nearest).unwrap();
        assert_eq!((layer.width, layer.height), (100, 300));
    }

    #[test]
    fn test_image_layer_zoomed_shows_center() {
        // Left half red, right half blue; zoomed in only the middle is visible
        let mut img = solid(1000, 500, [255, 0, 0, 255]);
        for y in 0..500 {
            for x in 500..1000 {
                let i = ((y * 1000 + x) * 4) as usize;
                img.pixels[i..i + 4].copy_from_slice(&[0, 0, 255, 255]);
            }
        }
        let view = ViewTransform::new(img.size(), 1.0, Rotation::Deg0, CAP);
        let layer = render_image_layer(&img, &view, FilterType::Nearest).unwrap();

        assert_eq!((layer.width, layer.height), (500, 500));
        assert_eq!(pixel(&layer, 10, 10), [255, 0, 0, 255]);
        assert_eq!(pixel(&layer, 490, 10), [0, 0, 255, 255]);
    }

    #[test]
    fn test_image_layer_copies_offset_window() {
        // Zoomed past the cap: the visible window starts at (250, 0)
        let mut img = solid(1000, 500, [0, 0, 0, 255]);
        let i = (250 * 4) as usize;
        img.pixels[i..i + 4].copy_from_slice(&[9, 8, 7, 255]);

        let view = ViewTransform::new(img.size(), 1.0, Rotation::Deg0, CAP);
        let layer = render_image_layer(&img, &view, FilterType::Nearest).unwrap();
        assert_eq!(pixel(&layer, 0, 0), [9, 8, 7, 255]);
        assert_eq!(pixel(&layer, 1, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_image_layer_rejects_malformed_buffer() {
        let img = RasterImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 12],
        };
        let view = ViewTransform::new(img.size(), 1.0, Rotation::Deg0, CAP);
        assert!(render_image_layer(&img, &view, FilterType::Bilinear).is_none());
    }

    #[test]
    fn test_preview_without_selection_has_no_overlay() {
        let img = solid(100, 100, [80, 80, 80, 255]);
        let view = ViewTransform::new(img.size(), 1.0, Rotation::Deg0, CAP);
        let out = render_preview(&img, &view, None, false, &PreviewStyle::default()).unwrap();
        assert!(out.pixels.chunks_exact(4).all(|px| px == [80, 80, 80, 255]));
    }

    #[test]
    fn test_preview_covers_outside_selection() {
        let img = solid(100, 100, [200, 200, 200, 255]);
        let view = ViewTransform::new(img.size(), 1.0, Rotation::Deg0, CAP);
        let selection = Rect::new(20.0, 20.0, 60.0, 60.0);
        let out =
            render_preview(&img, &view, Some(selection), false, &PreviewStyle::default()).unwrap();

        // Outside: dimmed by half
        assert_eq!(pixel(&out, 5, 5), [100, 100, 100, 255]);
        // Inside, away from outline and guides: untouched
        assert_eq!(pixel(&out, 30, 30), [200, 200, 200, 255]);
        // Outline in the stroke color, on the row just above the top edge
        assert_eq!(pixel(&out, 30, 19), [0x56, 0x96, 0xf8, 255]);
        // Top-left handle dot
        assert_eq!(pixel(&out, 19, 19), [0x56, 0x96, 0xf8, 255]);
    }

    #[test]
    fn test_preview_guides_are_dashed() {
        let img = solid(100, 100, [0, 0, 0, 255]);
        let view = ViewTransform::new(img.size(), 1.0, Rotation::Deg0, CAP);
        let style = PreviewStyle {
            guide_opacity: 1.0,
            ..PreviewStyle::default()
        };
        let out = render_preview(&img, &view, Some(Rect::new(0.0, 0.0, 90.0, 90.0)), false, &style)
            .unwrap();

        // Horizontal guide at y = 30 starting at x = 0: on, on, off x4
        let row: Vec<u8> = (6..12).map(|x| pixel(&out, x, 30)[0]).collect();
        assert_eq!(row, vec![255, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn test_preview_grayscale() {
        let img = solid(10, 10, [100, 50, 10, 255]);
        let view = ViewTransform::new(img.size(), 1.0, Rotation::Deg0, CAP);
        let out = render_preview(&img, &view, None, true, &PreviewStyle::default()).unwrap();
        assert_eq!(pixel(&out, 5, 5), [52, 52, 52, 255]);
    }

    #[test]
    fn test_blend_onto_transparent() {
        let mut px = Rgba([0, 0, 0, 0]);
        blend(&mut px, [10, 20, 30], 0.5);
        assert_eq!(px.0, [10, 20, 30, 128]);
    }

    #[test]
    fn test_pixel_span() {
        assert_eq!(pixel_span(20.0, 60.0, 100), 20..80);
        assert_eq!(pixel_span(-5.0, 10.0, 100), 0..5);
        assert_eq!(pixel_span(95.0, 10.0, 100), 95..100);
        assert_eq!(pixel_span(150.0, 10.0, 100), 100..100);
    }
}
