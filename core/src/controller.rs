//! Widget state machine.
//!
//! The controller owns corner, width and open state plus the one gesture that
//! may be in flight. Browser state comes in as arguments; everything the host
//! layer has to do in response (listeners, overlay nodes, timers, host events)
//! comes back as [`Effect`]s. The rendered state is a pure function of the
//! controller, see [`WidgetController::view`].

use crate::config::WidgetConfig;
use crate::drag::{
    ButtonDrag, DragOverlay, DragProgress, DragRelease, REOPEN_DELAY_MS, SNAP_ANIMATION_MS,
};
use crate::geometry::{PanelSpan, Point, Rect, Viewport};
use crate::layout::{layout_for, CornerLayout};
use crate::message::{ControlMessage, MessageGate};
use crate::position::{Corner, PanelEdge};
use crate::resize::{
    is_wide, plan_expand, HandleMarks, ResizeLimits, ResizeSession, EXPAND_TRANSITION_MS,
};
use crate::style;
use crate::toggle::ButtonVisual;

/// Work scheduled for later. At most one timer per kind is pending; scheduling
/// a kind again replaces the previous timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Deferred {
    SettleSnap,
    Reopen,
    FinishExpand,
}

impl Deferred {
    pub fn delay_ms(self) -> u32 {
        match self {
            Deferred::SettleSnap => SNAP_ANIMATION_MS,
            Deferred::Reopen => REOPEN_DELAY_MS,
            Deferred::FinishExpand => EXPAND_TRANSITION_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Start routing document pointer move/up to the controller.
    CaptureGesture,
    /// Drop the document pointer listeners.
    ReleaseGesture,
    OverlayShown(DragOverlay),
    OverlayMoved(DragOverlay),
    OverlayRemoved,
    Schedule(Deferred),
    /// Drop a pending timer without running it.
    Cancel(Deferred),
    PositionChanged(Corner),
}

#[derive(Clone, Copy, Debug)]
enum Gesture {
    Idle,
    Resizing {
        session: ResizeSession,
        candidate: Option<PanelSpan>,
    },
    Button(ButtonDrag),
    Settling {
        reopen: bool,
    },
}

/// Everything the view needs for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetView {
    pub corner: Corner,
    pub is_open: bool,
    pub active_edge: PanelEdge,
    pub layout: CornerLayout,
    pub wrapper_style: String,
    pub panel_style: String,
    pub panel_width: f64,
    pub outline: Option<Rect>,
    pub outline_style: String,
    pub button_hidden: bool,
    pub resizing: bool,
    pub visual: ButtonVisual,
    pub handles: HandleMarks,
}

#[derive(Debug)]
pub struct WidgetController {
    config: WidgetConfig,
    gate: MessageGate,
    corner: Corner,
    width: f64,
    is_open: bool,
    panel_left: Option<f64>,
    restore_width: Option<f64>,
    expanding: Option<PanelSpan>,
    wide: bool,
    reopen_pending: bool,
    gesture: Gesture,
}

impl WidgetController {
    pub fn new(config: WidgetConfig) -> Self {
        let gate = MessageGate::new(config.trusted_origin.clone());
        Self {
            corner: config.default_position,
            width: config.default_chat_width,
            is_open: false,
            panel_left: None,
            restore_width: None,
            expanding: None,
            wide: false,
            reopen_pending: false,
            gesture: Gesture::Idle,
            gate,
            config,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn corner(&self) -> Corner {
        self.corner
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn panel_left(&self) -> Option<f64> {
        self.panel_left
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    pub fn active_edge(&self) -> PanelEdge {
        self.corner.resize_edge()
    }

    pub fn limits(&self) -> ResizeLimits {
        ResizeLimits {
            min_width: self.config.min_chat_width,
            margin: self.config.effective_margin(),
        }
    }

    /// Sets the corner and reflows. Safe at any time, including before the
    /// panel has ever been opened.
    pub fn move_to_position(&mut self, corner: Corner) {
        self.corner = corner;
        self.reflow();
    }

    /// Hands horizontal placement back to the corner anchoring.
    pub fn reflow(&mut self) {
        self.panel_left = None;
    }

    /// Flips the panel. A reopen still pending after a snap counts as open.
    pub fn toggle(&mut self) {
        if std::mem::take(&mut self.reopen_pending) {
            self.is_open = true;
        }
        self.is_open = !self.is_open;
    }

    /// Returns true when the message toggled the panel. Ignored while the
    /// button is pressed, dragged or settling.
    pub fn handle_message(&mut self, origin: &str, kind: Option<&str>) -> bool {
        if matches!(self.gesture, Gesture::Button(_) | Gesture::Settling { .. }) {
            return false;
        }
        match self.gate.classify(origin, kind) {
            Some(ControlMessage::Minimize) => {
                self.toggle();
                true
            }
            None => false,
        }
    }

    /// Press on a resize strip. Only the edge facing away from the corner
    /// reacts, and only on an open panel with no other gesture running.
    pub fn begin_resize(&mut self, edge: PanelEdge, pointer_x: f64, panel: Rect) -> Vec<Effect> {
        if !self.is_idle() || !self.is_open || edge != self.active_edge() {
            return Vec::new();
        }
        self.gesture = Gesture::Resizing {
            session: ResizeSession::begin(edge, pointer_x, panel, self.limits()),
            candidate: None,
        };
        vec![Effect::CaptureGesture]
    }

    pub fn press_button(&mut self, pointer: Point, button: Rect) -> Vec<Effect> {
        if !self.is_idle() {
            return Vec::new();
        }
        let reopen_pending = std::mem::take(&mut self.reopen_pending);
        let was_open = self.is_open || reopen_pending;
        let drag = ButtonDrag::press(pointer, button, was_open, self.config.offset);
        let overlay = drag.overlay();
        self.gesture = Gesture::Button(drag);
        let mut effects = Vec::new();
        if reopen_pending {
            effects.push(Effect::Cancel(Deferred::Reopen));
        }
        effects.push(Effect::CaptureGesture);
        effects.push(Effect::OverlayShown(overlay));
        effects
    }

    pub fn pointer_move(&mut self, pointer: Point, viewport: Viewport) -> Vec<Effect> {
        match &mut self.gesture {
            Gesture::Resizing { session, candidate } => {
                *candidate = Some(session.candidate(pointer.x, viewport));
                Vec::new()
            }
            Gesture::Button(drag) => match drag.pointer_moved(pointer, viewport) {
                DragProgress::BelowThreshold => Vec::new(),
                DragProgress::Started => {
                    let overlay = drag.overlay();
                    self.is_open = false;
                    vec![Effect::OverlayMoved(overlay)]
                }
                DragProgress::Moved => vec![Effect::OverlayMoved(drag.overlay())],
            },
            Gesture::Idle | Gesture::Settling { .. } => Vec::new(),
        }
    }

    /// Ends the running gesture. Always asks for the gesture listeners to go,
    /// so a release that arrives before any move still cleans up.
    pub fn pointer_up(&mut self, viewport: Viewport) -> Vec<Effect> {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Idle => vec![Effect::ReleaseGesture],
            Gesture::Settling { .. } => {
                self.gesture = gesture;
                Vec::new()
            }
            Gesture::Resizing { candidate, .. } => {
                if let Some(span) = candidate {
                    self.width = span.width;
                    self.panel_left = Some(span.left);
                    self.restore_width = None;
                }
                vec![Effect::ReleaseGesture]
            }
            Gesture::Button(drag) => match drag.release(viewport) {
                DragRelease::Click => {
                    self.is_open = !drag.was_open();
                    vec![Effect::ReleaseGesture, Effect::OverlayRemoved]
                }
                DragRelease::Snap(outcome) => {
                    let mut effects = vec![Effect::ReleaseGesture];
                    if outcome.corner != self.corner {
                        self.corner = outcome.corner;
                        effects.push(Effect::PositionChanged(outcome.corner));
                    }
                    self.gesture = Gesture::Settling {
                        reopen: outcome.was_open,
                    };
                    effects.push(Effect::OverlayMoved(outcome.overlay));
                    effects.push(Effect::Schedule(Deferred::SettleSnap));
                    effects
                }
            },
        }
    }

    /// The browser took the pointer away. A pending resize is discarded and a
    /// press that never became a drag is not a click. A real drag still snaps.
    pub fn cancel_gesture(&mut self, viewport: Viewport) -> Vec<Effect> {
        match self.gesture {
            Gesture::Resizing { .. } => {
                self.gesture = Gesture::Idle;
                vec![Effect::ReleaseGesture]
            }
            Gesture::Button(drag) if !drag.is_dragging() => {
                self.gesture = Gesture::Idle;
                self.is_open = drag.was_open();
                vec![Effect::ReleaseGesture, Effect::OverlayRemoved]
            }
            _ => self.pointer_up(viewport),
        }
    }

    pub fn deferred(&mut self, kind: Deferred) -> Vec<Effect> {
        match kind {
            Deferred::SettleSnap => {
                let Gesture::Settling { reopen } = self.gesture else {
                    return Vec::new();
                };
                self.gesture = Gesture::Idle;
                self.reflow();
                let mut effects = vec![Effect::OverlayRemoved];
                if reopen {
                    self.reopen_pending = true;
                    effects.push(Effect::Schedule(Deferred::Reopen));
                }
                effects
            }
            Deferred::Reopen => {
                if std::mem::take(&mut self.reopen_pending) && self.is_idle() {
                    self.is_open = true;
                }
                Vec::new()
            }
            Deferred::FinishExpand => {
                if let Some(span) = self.expanding.take() {
                    self.width = span.width;
                    self.panel_left = Some(span.left);
                }
                Vec::new()
            }
        }
    }

    /// Click on the active handle's grip, or double-click on its strip.
    pub fn expand_toggle(&mut self, panel: Rect, viewport: Viewport) -> Vec<Effect> {
        if !self.is_idle() {
            return Vec::new();
        }
        let plan = plan_expand(
            panel,
            self.active_edge(),
            viewport,
            self.limits(),
            self.restore_width,
        );
        self.restore_width = plan.expanding.then_some(panel.width);
        self.expanding = Some(plan.span);
        vec![Effect::Schedule(Deferred::FinishExpand)]
    }

    /// Feeds the observed panel width into the handle chevrons. Returns true
    /// when they flipped.
    pub fn observe_panel_width(&mut self, width: f64, viewport: Viewport) -> bool {
        let wide = is_wide(width, viewport);
        let changed = wide != self.wide;
        self.wide = wide;
        changed
    }

    /// Abandons whatever is in flight, timers included.
    pub fn detach(&mut self) -> Vec<Effect> {
        self.gesture = Gesture::Idle;
        self.expanding = None;
        self.reopen_pending = false;
        vec![
            Effect::ReleaseGesture,
            Effect::OverlayRemoved,
            Effect::Cancel(Deferred::SettleSnap),
            Effect::Cancel(Deferred::Reopen),
            Effect::Cancel(Deferred::FinishExpand),
        ]
    }

    pub fn view(&self) -> WidgetView {
        let layout = layout_for(self.corner, &self.config);
        let (span_left, width, animate) = match self.expanding {
            Some(span) => (Some(span.left), span.width, true),
            None => (self.panel_left, self.width, false),
        };
        let (outline, resizing) = match &self.gesture {
            Gesture::Resizing { session, candidate } => (
                Some(match candidate {
                    Some(span) => session.outline(*span),
                    None => session.start_rect(),
                }),
                true,
            ),
            _ => (None, false),
        };
        let button_hidden = match &self.gesture {
            Gesture::Button(drag) => drag.is_dragging(),
            Gesture::Settling { .. } => true,
            _ => false,
        };
        WidgetView {
            corner: self.corner,
            is_open: self.is_open,
            active_edge: self.active_edge(),
            wrapper_style: style::wrapper_style(&layout),
            panel_style: style::panel_style(&layout, width, span_left, animate),
            panel_width: width,
            outline,
            outline_style: style::outline_style(outline),
            button_hidden,
            resizing,
            visual: ButtonVisual::for_state(self.is_open),
            handles: HandleMarks::for_wide(self.wide),
            layout,
        }
    }
}
