//! Toggle-button drag with corner snapping.

use crate::geometry::{Point, Rect, Viewport};
use crate::position::Corner;

pub const DRAG_THRESHOLD_PX: f64 = 10.0;
pub const SNAP_ANIMATION_MS: u32 = 300;
pub const REOPEN_DELAY_MS: u32 = 50;

/// Tells a click from a drag: latches once the pointer leaves the slop radius.
#[derive(Clone, Copy, Debug)]
pub struct SlopGate {
    start: Point,
    slop: f64,
    moved: bool,
}

impl SlopGate {
    pub fn new(start: Point, slop: f64) -> Self {
        Self {
            start,
            slop,
            moved: false,
        }
    }

    pub fn update(&mut self, point: Point) -> bool {
        if self.moved {
            return true;
        }
        if point.distance_squared(self.start) > self.slop * self.slop {
            self.moved = true;
        }
        self.moved
    }

    pub fn moved(&self) -> bool {
        self.moved
    }
}

/// Transient visuals of a button drag: the ghost that follows the pointer and
/// the dashed placeholder marking the snap target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragOverlay {
    pub ghost: Rect,
    pub placeholder: Rect,
    pub placeholder_visible: bool,
    pub settling: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragProgress {
    BelowThreshold,
    Started,
    Moved,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapOutcome {
    pub corner: Corner,
    pub overlay: DragOverlay,
    pub was_open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragRelease {
    Click,
    Snap(SnapOutcome),
}

#[derive(Clone, Copy, Debug)]
pub struct ButtonDrag {
    gate: SlopGate,
    start: Point,
    button: Rect,
    was_open: bool,
    offset: f64,
    overlay: DragOverlay,
}

impl ButtonDrag {
    pub fn press(pointer: Point, button: Rect, was_open: bool, offset: f64) -> Self {
        Self {
            gate: SlopGate::new(pointer, DRAG_THRESHOLD_PX),
            start: pointer,
            button,
            was_open,
            offset,
            overlay: DragOverlay {
                ghost: button,
                placeholder: button,
                placeholder_visible: false,
                settling: false,
            },
        }
    }

    pub fn overlay(&self) -> DragOverlay {
        self.overlay
    }

    pub fn was_open(&self) -> bool {
        self.was_open
    }

    pub fn is_dragging(&self) -> bool {
        self.gate.moved()
    }

    pub fn pointer_moved(&mut self, pointer: Point, viewport: Viewport) -> DragProgress {
        let was_dragging = self.gate.moved();
        if !self.gate.update(pointer) {
            return DragProgress::BelowThreshold;
        }
        let origin = ghost_origin(self.button, self.start, pointer, viewport);
        let ghost = self.button.at(origin);
        let target = Corner::nearest(ghost.center(), viewport);
        self.overlay.ghost = ghost;
        self.overlay.placeholder = self
            .button
            .at(snap_origin(target, self.button, viewport, self.offset));
        self.overlay.placeholder_visible = true;
        if was_dragging {
            DragProgress::Moved
        } else {
            DragProgress::Started
        }
    }

    pub fn release(self, viewport: Viewport) -> DragRelease {
        if !self.gate.moved() {
            return DragRelease::Click;
        }
        let corner = Corner::nearest(self.overlay.ghost.center(), viewport);
        let snapped = self
            .button
            .at(snap_origin(corner, self.button, viewport, self.offset));
        DragRelease::Snap(SnapOutcome {
            corner,
            overlay: DragOverlay {
                ghost: snapped,
                placeholder: snapped,
                placeholder_visible: true,
                settling: true,
            },
            was_open: self.was_open,
        })
    }
}

/// Ghost origin for the current pointer: follows 1:1 from where the button
/// sat, clamped so the whole ghost stays on screen.
pub fn ghost_origin(button: Rect, start: Point, pointer: Point, viewport: Viewport) -> Point {
    let max_left = (viewport.width - button.width).max(0.0);
    let max_top = (viewport.height - button.height).max(0.0);
    let left = (button.left + pointer.x - start.x).max(0.0).min(max_left);
    let top = (button.top + pointer.y - start.y).max(0.0).min(max_top);
    Point::new(left, top)
}

/// Final resting origin of a button of the given size in `corner`.
pub fn snap_origin(corner: Corner, button: Rect, viewport: Viewport, offset: f64) -> Point {
    let x = if corner.is_right() {
        viewport.width - button.width - offset
    } else {
        offset
    };
    let y = if corner.is_bottom() {
        viewport.height - button.height - offset
    } else {
        offset
    };
    Point::new(x, y)
}
