//! Edge resize and the expand/collapse toggle of the chat panel.

use crate::geometry::{PanelSpan, Rect, Viewport};
use crate::position::PanelEdge;

/// A panel wider than this fraction of the viewport counts as expanded.
pub const WIDE_THRESHOLD: f64 = 0.8;
pub const EXPAND_TRANSITION_MS: u32 = 300;

/// Bounds every resize candidate must respect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeLimits {
    pub min_width: f64,
    pub margin: f64,
}

/// One edge-drag gesture, from press to release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeSession {
    edge: PanelEdge,
    start_x: f64,
    start: Rect,
    limits: ResizeLimits,
}

impl ResizeSession {
    pub fn begin(edge: PanelEdge, pointer_x: f64, panel: Rect, limits: ResizeLimits) -> Self {
        Self {
            edge,
            start_x: pointer_x,
            start: panel,
            limits,
        }
    }

    pub fn edge(&self) -> PanelEdge {
        self.edge
    }

    pub fn start_rect(&self) -> Rect {
        self.start
    }

    /// Geometry the panel would take if the pointer were released at
    /// `pointer_x`. The pressed edge follows the pointer, the other one stays.
    pub fn candidate(&self, pointer_x: f64, viewport: Viewport) -> PanelSpan {
        let dx = pointer_x - self.start_x;
        let requested = match self.edge {
            PanelEdge::Right => self.start.width + dx,
            PanelEdge::Left => self.start.width - dx,
        };
        clamp_span(self.edge, self.start, requested, self.limits, viewport)
    }

    /// Outline rectangle for a candidate span; vertical extent never changes.
    pub fn outline(&self, span: PanelSpan) -> Rect {
        Rect::new(span.left, self.start.top, span.width, self.start.height)
    }
}

/// Clamps a requested width for a drag on `edge` of the panel `start`.
///
/// The result keeps `left >= margin`, `left + width <= viewport - margin` and
/// `width >= min_width`. When the viewport cannot fit the minimum width
/// between both margins, the minimum width wins and the panel sits on the left
/// margin.
pub fn clamp_span(
    edge: PanelEdge,
    start: Rect,
    requested: f64,
    limits: ResizeLimits,
    viewport: Viewport,
) -> PanelSpan {
    let ResizeLimits { min_width, margin } = limits;
    let max_right = viewport.width - margin;
    match edge {
        PanelEdge::Right => {
            let left = start
                .left
                .min(max_right - min_width)
                .max(margin);
            let width = requested.min(max_right - left).max(min_width);
            PanelSpan::new(left, width)
        }
        PanelEdge::Left => {
            let right = start.right().min(max_right).max(margin + min_width);
            let width = requested.min(right - margin).max(min_width);
            PanelSpan::new(right - width, width)
        }
    }
}

pub fn is_wide(width: f64, viewport: Viewport) -> bool {
    if viewport.width <= 0.0 {
        return false;
    }
    width / viewport.width > WIDE_THRESHOLD
}

/// Direction a handle's tick points: the way its edge moves when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chevron {
    PointsLeft,
    PointsRight,
}

impl Chevron {
    pub fn class_name(self) -> &'static str {
        match self {
            Chevron::PointsLeft => "points-left",
            Chevron::PointsRight => "points-right",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandleMarks {
    pub left: Chevron,
    pub right: Chevron,
}

impl HandleMarks {
    pub fn for_wide(wide: bool) -> Self {
        Self {
            left: handle_chevron(PanelEdge::Left, wide),
            right: handle_chevron(PanelEdge::Right, wide),
        }
    }

    pub fn for_edge(&self, edge: PanelEdge) -> Chevron {
        match edge {
            PanelEdge::Left => self.left,
            PanelEdge::Right => self.right,
        }
    }
}

pub fn handle_chevron(edge: PanelEdge, wide: bool) -> Chevron {
    match (edge, wide) {
        (PanelEdge::Left, false) | (PanelEdge::Right, true) => Chevron::PointsLeft,
        (PanelEdge::Left, true) | (PanelEdge::Right, false) => Chevron::PointsRight,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExpandPlan {
    pub span: PanelSpan,
    pub expanding: bool,
}

/// Target geometry for the expand/collapse toggle on the active `edge`.
///
/// Expanding pushes the active edge to the viewport margin. Collapsing goes
/// back to `restore_width` when it is a narrow width, otherwise to the
/// minimum. The anchored edge never moves.
pub fn plan_expand(
    panel: Rect,
    edge: PanelEdge,
    viewport: Viewport,
    limits: ResizeLimits,
    restore_width: Option<f64>,
) -> ExpandPlan {
    let ResizeLimits { min_width, margin } = limits;
    if is_wide(panel.width, viewport) {
        let width = restore_width
            .filter(|width| *width >= min_width && !is_wide(*width, viewport))
            .unwrap_or(min_width);
        let left = match edge {
            PanelEdge::Left => panel.right() - width,
            PanelEdge::Right => panel.left,
        };
        return ExpandPlan {
            span: PanelSpan::new(left, width),
            expanding: false,
        };
    }
    let span = match edge {
        PanelEdge::Left => {
            let width = (panel.right() - margin).max(min_width);
            PanelSpan::new(panel.right() - width, width)
        }
        PanelEdge::Right => {
            let width = (viewport.width - margin - panel.left).max(min_width);
            PanelSpan::new(panel.left, width)
        }
    };
    ExpandPlan {
        span,
        expanding: true,
    }
}
