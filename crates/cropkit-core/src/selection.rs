//! Selection state machine.
//!
//! Drives the crop rectangle from pointer events without depending on any UI
//! event system. Two states:
//!
//! - **Idle**: no button held; moves only update the hover cursor
//! - **Dragging**: a handle was locked on pointer-down and stays locked until
//!   pointer-up, wherever the pointer wanders
//!
//! Each move applies the delta since the previous pointer position, then
//! clamps the result to the surface. The rectangle may be flipped mid-drag
//! and is normalized when the drag ends.

use crate::geometry::{clamp_to_bounds, normalize_rect, Point, Rect, Size};
use crate::handle::{hit_test, Cursor, Handle};

/// Default side length of a freshly started selection.
pub const INITIAL_SELECTION_SIZE: f64 = 4.0;

/// Drag state of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Handle locked for the whole drag.
        handle: Handle,
        /// Pointer position of the previous event.
        last: Point,
    },
}

/// The live selection rectangle and its drag state.
#[derive(Debug, Clone)]
pub struct Selection {
    rect: Option<Rect>,
    state: DragState,
    hover: Option<Handle>,
    initial_size: f64,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(INITIAL_SELECTION_SIZE)
    }
}

impl Selection {
    /// Create an empty selection that starts new rectangles at `initial_size`.
    pub fn new(initial_size: f64) -> Self {
        Self {
            rect: None,
            state: DragState::Idle,
            hover: None,
            initial_size,
        }
    }

    /// Current rectangle, possibly flipped while a drag is active.
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Handle under the pointer as of the last event.
    pub fn hover(&self) -> Option<Handle> {
        self.hover
    }

    /// Cursor for the last hovered position.
    pub fn cursor(&self) -> Cursor {
        match self.hover {
            Some(handle) => handle.cursor(),
            None => Cursor::Crosshair,
        }
    }

    /// Handle under `point`, if a rectangle exists.
    pub fn hit_test(&self, point: Point) -> Option<Handle> {
        self.rect.and_then(|rect| hit_test(rect, point))
    }

    /// Begin a drag.
    ///
    /// Over an existing handle that handle is locked. Anywhere else a new
    /// `initial_size` square is started at the pointer and the drag grows it
    /// from its bottom-right corner. Returns the locked handle.
    pub fn pointer_down(&mut self, point: Point) -> Handle {
        let handle = match self.hit_test(point) {
            Some(handle) => handle,
            None => {
                self.rect = Some(Rect::square_at(point, self.initial_size));
                Handle::BottomRight
            }
        };

        log::debug!("Selection drag started with {:?} at ({}, {})", handle, point.x, point.y);
        self.hover = Some(handle);
        self.state = DragState::Dragging {
            handle,
            last: point,
        };
        handle
    }

    /// Handle a pointer move and return the cursor to display.
    ///
    /// Hovering is always re-evaluated. While dragging, the locked handle
    /// applies the delta from the previous position and the rectangle is
    /// clamped to `bounds`.
    pub fn pointer_move(&mut self, point: Point, bounds: Size) -> Cursor {
        self.hover = self.hit_test(point);

        if let DragState::Dragging { handle, last } = self.state {
            if let Some(rect) = self.rect {
                let moved = handle.apply_delta(rect, point.x - last.x, point.y - last.y);
                self.rect = Some(clamp_to_bounds(bounds.width, bounds.height, moved));
            }
            self.state = DragState::Dragging {
                handle,
                last: point,
            };
        }

        self.cursor()
    }

    /// End the drag.
    ///
    /// Returns the normalized rectangle when a drag was active, `None` when
    /// the selection was already idle.
    pub fn pointer_up(&mut self) -> Option<Rect> {
        if !self.is_dragging() {
            return None;
        }
        self.state = DragState::Idle;

        let rect = self.rect.map(normalize_rect)?;
        self.rect = Some(rect);
        log::debug!(
            "Selection finalized at ({}, {}) {}x{}",
            rect.x,
            rect.y,
            rect.w,
            rect.h
        );
        Some(rect)
    }

    /// Drop the rectangle and any drag in progress.
    pub fn clear(&mut self) {
        self.rect = None;
        self.state = DragState::Idle;
        self.hover = None;
    }
}
