//! Selection rectangle geometry.
//!
//! Pure functions over surface-space rectangles: handle dot placement,
//! rule-of-thirds guides, pointer hit regions, boundary clamping and
//! normalization of flipped rectangles.
//!
//! # Coordinate System
//!
//! - Units are surface (CSS) pixels, origin at the top-left corner
//! - `w`/`h` may be negative while a drag is in progress; such a rectangle
//!   extends left/up from `(x, y)`

use serde::{Deserialize, Serialize};

/// Side length of the square dots drawn on the selection outline.
pub const DOT_SIZE: f64 = 4.0;

/// Thickness of the pointer hit regions around corners and edges.
pub const HIT_SIZE: f64 = 8.0;

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of an image or drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Same size with the axes exchanged.
    #[inline]
    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Width divided by height.
    #[inline]
    pub fn aspect_ratio(self) -> f64 {
        self.width / self.height
    }

    /// Check if either dimension is zero or negative.
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A selection rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// A `size`×`size` square with its top-left corner at `origin`.
    pub fn square_at(origin: Point, size: f64) -> Self {
        Self::new(origin.x, origin.y, size, size)
    }

    /// Check whether the point lies inside the rectangle, edges included.
    ///
    /// Flipped rectangles are tested by their visual footprint.
    pub fn contains(&self, point: Point) -> bool {
        let r = normalize_rect(*self);
        point.x >= r.x && point.x <= r.x + r.w && point.y >= r.y && point.y <= r.y + r.h
    }

    /// Absolute covered area.
    pub fn area(&self) -> f64 {
        (self.w * self.h).abs()
    }

    /// Check if the rectangle is normalized (non-negative extents).
    pub fn is_normalized(&self) -> bool {
        self.w >= 0.0 && self.h >= 0.0
    }
}

/// A straight line segment, used for the dashed guide overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
        }
    }
}

/// Dots drawn on the selection outline.
///
/// Returns [`DOT_SIZE`] squares centered on the corners and edge midpoints,
/// in reading order: top-left, top-mid, top-right, mid-left, mid-right,
/// bottom-left, bottom-mid, bottom-right.
pub fn handle_dots(rect: Rect) -> [Rect; 8] {
    let Rect { x, y, w, h } = rect;
    let half = DOT_SIZE / 2.0;
    let dot = |cx: f64, cy: f64| Rect::new(cx - half, cy - half, DOT_SIZE, DOT_SIZE);

    [
        dot(x, y),
        dot(x + w / 2.0, y),
        dot(x + w, y),
        dot(x, y + h / 2.0),
        dot(x + w, y + h / 2.0),
        dot(x, y + h),
        dot(x + w / 2.0, y + h),
        dot(x + w, y + h),
    ]
}

/// Rule-of-thirds guide lines inside the selection.
///
/// Two horizontal lines at 1/3 and 2/3 of the height, then two vertical
/// lines at 1/3 and 2/3 of the width.
pub fn guide_lines(rect: Rect) -> [Segment; 4] {
    let Rect { x, y, w, h } = rect;
    [
        Segment::new(x, y + h / 3.0, x + w, y + h / 3.0),
        Segment::new(x, y + 2.0 * h / 3.0, x + w, y + 2.0 * h / 3.0),
        Segment::new(x + w / 3.0, y, x + w / 3.0, y + h),
        Segment::new(x + 2.0 * w / 3.0, y, x + 2.0 * w / 3.0, y + h),
    ]
}

/// Pointer hit regions for the eight resize handles.
///
/// Corners first (top-left, top-right, bottom-right, bottom-left) as
/// [`HIT_SIZE`] squares centered on the corner, then the top, right, bottom
/// and left edges as [`HIT_SIZE`]-thick strips spanning the edge. Index `i`
/// corresponds to [`crate::handle::Handle::from_index`]`(i)`.
pub fn hit_regions(rect: Rect) -> [Rect; 8] {
    let Rect { x, y, w, h } = rect;
    let half = HIT_SIZE / 2.0;

    [
        Rect::new(x - half, y - half, HIT_SIZE, HIT_SIZE),
        Rect::new(x + w - half, y - half, HIT_SIZE, HIT_SIZE),
        Rect::new(x + w - half, y + h - half, HIT_SIZE, HIT_SIZE),
        Rect::new(x - half, y + h - half, HIT_SIZE, HIT_SIZE),
        Rect::new(x - half, y - half, w + half, HIT_SIZE),
        Rect::new(x + w - half, y - half, HIT_SIZE, h + half),
        Rect::new(x - half, y + h - half, w + half, HIT_SIZE),
        Rect::new(x - half, y - half, HIT_SIZE, h + half),
    ]
}

/// Keep the selection on the surface by translating it, never resizing.
///
/// The top-left corner is clamped into `[0, surface_w] × [0, surface_h]`,
/// then the rectangle is shifted back if its far edge overflows. Left/top
/// win: a rectangle larger than the surface ends at `x = 0` / `y = 0` and
/// still overflows on the right/bottom.
pub fn clamp_to_bounds(surface_w: f64, surface_h: f64, rect: Rect) -> Rect {
    let mut r = rect;

    r.x = r.x.min(surface_w).max(0.0);
    r.y = r.y.min(surface_h).max(0.0);

    if r.x + r.w > surface_w {
        r.x -= r.x + r.w - surface_w;
    }
    if r.y + r.h > surface_h {
        r.y -= r.y + r.h - surface_h;
    }

    r.x = r.x.max(0.0);
    r.y = r.y.max(0.0);
    r
}

/// Turn a flipped rectangle into one with non-negative extents covering
/// the same area.
pub fn normalize_rect(rect: Rect) -> Rect {
    Rect {
        x: if rect.w < 0.0 { rect.x + rect.w } else { rect.x },
        y: if rect.h < 0.0 { rect.y + rect.h } else { rect.y },
        w: rect.w.abs(),
        h: rect.h.abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_dots_positions() {
        let dots = handle_dots(Rect::new(10.0, 20.0, 100.0, 50.0));

        assert_eq!(dots[0], Rect::new(8.0, 18.0, 4.0, 4.0));
        assert_eq!(dots[1], Rect::new(58.0, 18.0, 4.0, 4.0));
        assert_eq!(dots[2], Rect::new(108.0, 18.0, 4.0, 4.0));
        assert_eq!(dots[3], Rect::new(8.0, 43.0, 4.0, 4.0));
        assert_eq!(dots[4], Rect::new(108.0, 43.0, 4.0, 4.0));
        assert_eq!(dots[5], Rect::new(8.0, 68.0, 4.0, 4.0));
        assert_eq!(dots[6], Rect::new(58.0, 68.0, 4.0, 4.0));
        assert_eq!(dots[7], Rect::new(108.0, 68.0, 4.0, 4.0));
    }

    #[test]
    fn test_guide_lines_thirds() {
        let lines = guide_lines(Rect::new(0.0, 0.0, 90.0, 30.0));

        assert_eq!(lines[0], Segment::new(0.0, 10.0, 90.0, 10.0));
        assert_eq!(lines[1], Segment::new(0.0, 20.0, 90.0, 20.0));
        assert_eq!(lines[2], Segment::new(30.0, 0.0, 30.0, 30.0));
        assert_eq!(lines[3], Segment::new(60.0, 0.0, 60.0, 30.0));
    }

    #[test]
    fn test_hit_regions_layout() {
        let regions = hit_regions(Rect::new(10.0, 10.0, 40.0, 20.0));

        // Corners
        assert_eq!(regions[0], Rect::new(6.0, 6.0, 8.0, 8.0));
        assert_eq!(regions[1], Rect::new(46.0, 6.0, 8.0, 8.0));
        assert_eq!(regions[2], Rect::new(46.0, 26.0, 8.0, 8.0));
        assert_eq!(regions[3], Rect::new(6.0, 26.0, 8.0, 8.0));
        // Edges
        assert_eq!(regions[4], Rect::new(6.0, 6.0, 44.0, 8.0));
        assert_eq!(regions[5], Rect::new(46.0, 6.0, 8.0, 24.0));
        assert_eq!(regions[6], Rect::new(6.0, 26.0, 44.0, 8.0));
        assert_eq!(regions[7], Rect::new(6.0, 6.0, 8.0, 24.0));
    }

    #[test]
    fn test_contains_edges_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(!r.contains(Point::new(10.5, 5.0)));
        assert!(!r.contains(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn test_contains_flipped_rect() {
        let r = Rect::new(10.0, 10.0, -10.0, -10.0);
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(!r.contains(Point::new(15.0, 15.0)));
    }

    #[test]
    fn test_clamp_interior_unchanged() {
        let r = Rect::new(10.0, 10.0, 100.0, 100.0);
        assert_eq!(clamp_to_bounds(500.0, 500.0, r), r);
    }

    #[test]
    fn test_clamp_negative_origin() {
        let r = clamp_to_bounds(500.0, 500.0, Rect::new(-20.0, -5.0, 100.0, 100.0));
        assert_eq!(r, Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_clamp_shifts_overflow_back() {
        let r = clamp_to_bounds(500.0, 400.0, Rect::new(450.0, 380.0, 100.0, 50.0));
        assert_eq!(r, Rect::new(400.0, 350.0, 100.0, 50.0));
    }

    #[test]
    fn test_clamp_oversized_prefers_top_left() {
        let r = clamp_to_bounds(100.0, 100.0, Rect::new(20.0, 30.0, 150.0, 120.0));
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 0.0);
        assert_eq!(r.w, 150.0);
        assert_eq!(r.h, 120.0);
        assert!(r.x + r.w > 100.0);
    }

    #[test]
    fn test_clamp_flipped_rect_keeps_extent() {
        // Dragged past the left edge of the anchor; footprint is 0..10
        let r = clamp_to_bounds(100.0, 100.0, Rect::new(10.0, 10.0, -10.0, 20.0));
        assert_eq!(r, Rect::new(10.0, 10.0, -10.0, 20.0));
    }

    #[test]
    fn test_normalize_flipped() {
        let r = normalize_rect(Rect::new(50.0, 40.0, -20.0, -10.0));
        assert_eq!(r, Rect::new(30.0, 30.0, 20.0, 10.0));
        assert!(r.is_normalized());
    }

    #[test]
    fn test_normalize_positive_is_identity() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(normalize_rect(r), r);
    }

    #[test]
    fn test_size_swapped() {
        assert_eq!(Size::new(3.0, 7.0).swapped(), Size::new(7.0, 3.0));
        assert!(Size::new(0.0, 7.0).is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
