//! Drag handles and pointer cursors.
//!
//! A selection exposes nine grab targets: four corners, four edges and the
//! body. Each one moves a fixed subset of the rectangle's `x`, `y`, `w`, `h`
//! fields when dragged; that mapping lives in a single lookup table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{hit_regions, Point, Rect};

/// Index reported to hosts when the pointer is over no handle.
pub const NO_HANDLE: u8 = 9;

/// A grab target on the selection rectangle.
///
/// Discriminants are the stable handle indices shared with
/// [`hit_regions`] and the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Handle {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
    Top = 4,
    Right = 5,
    Bottom = 6,
    Left = 7,
    /// The rectangle interior; dragging it moves the selection.
    Body = 8,
}

/// Per-handle coefficients applied to a pointer delta, as
/// `[x += c·dx, y += c·dy, w += c·dx, h += c·dy]`.
const DELTA_TABLE: [[f64; 4]; 9] = [
    [1.0, 1.0, -1.0, -1.0], // TopLeft
    [0.0, 1.0, 1.0, -1.0],  // TopRight
    [0.0, 0.0, 1.0, 1.0],   // BottomRight
    [1.0, 0.0, -1.0, 1.0],  // BottomLeft
    [0.0, 1.0, 0.0, -1.0],  // Top
    [0.0, 0.0, 1.0, 0.0],   // Right
    [0.0, 0.0, 0.0, 1.0],   // Bottom
    [1.0, 0.0, -1.0, 0.0],  // Left
    [1.0, 1.0, 0.0, 0.0],   // Body
];

impl Handle {
    /// All handles in index order.
    pub const ALL: [Handle; 9] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomRight,
        Handle::BottomLeft,
        Handle::Top,
        Handle::Right,
        Handle::Bottom,
        Handle::Left,
        Handle::Body,
    ];

    /// Stable numeric index (0-8).
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Look up a handle by index. Anything past 8 means "no handle".
    pub fn from_index(index: u8) -> Option<Handle> {
        Self::ALL.get(index as usize).copied()
    }

    /// Apply a pointer delta according to this handle's resize/move rule.
    ///
    /// Extents may go negative when dragging past the opposite edge; see
    /// [`crate::geometry::normalize_rect`].
    pub fn apply_delta(self, rect: Rect, dx: f64, dy: f64) -> Rect {
        let [cx, cy, cw, ch] = DELTA_TABLE[self as usize];
        Rect {
            x: rect.x + cx * dx,
            y: rect.y + cy * dy,
            w: rect.w + cw * dx,
            h: rect.h + ch * dy,
        }
    }

    /// Cursor shown while hovering or dragging this handle.
    pub fn cursor(self) -> Cursor {
        match self {
            Handle::TopLeft | Handle::BottomRight => Cursor::NwseResize,
            Handle::TopRight | Handle::BottomLeft => Cursor::NeswResize,
            Handle::Top | Handle::Bottom => Cursor::NsResize,
            Handle::Right | Handle::Left => Cursor::EwResize,
            Handle::Body => Cursor::Move,
        }
    }
}

/// Find the handle under the pointer.
///
/// The eight resize regions are tested in index order before the body, so
/// the corners win where regions overlap.
pub fn hit_test(rect: Rect, point: Point) -> Option<Handle> {
    hit_regions(rect)
        .iter()
        .position(|region| region.contains(point))
        .and_then(|i| Handle::from_index(i as u8))
        .or_else(|| rect.contains(point).then_some(Handle::Body))
}

/// Pointer cursor names understood by CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Over the surface but not over the selection.
    Crosshair,
    NwseResize,
    NeswResize,
    NsResize,
    EwResize,
    Move,
}

impl Cursor {
    /// Cursor for an optional handle; no handle maps to [`Cursor::Default`].
    pub fn for_handle(handle: Option<Handle>) -> Cursor {
        handle.map_or(Cursor::Default, Handle::cursor)
    }

    /// Cursor for a raw handle index as used by hosts.
    pub fn for_index(index: u8) -> Cursor {
        Self::for_handle(Handle::from_index(index))
    }

    /// CSS `cursor` property value.
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Crosshair => "crosshair",
            Cursor::NwseResize => "nwse-resize",
            Cursor::NeswResize => "nesw-resize",
            Cursor::NsResize => "ns-resize",
            Cursor::EwResize => "ew-resize",
            Cursor::Move => "move",
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}
