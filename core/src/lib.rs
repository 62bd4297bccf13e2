pub mod config;
pub mod controller;
pub mod drag;
pub mod geometry;
pub mod layout;
pub mod message;
pub mod position;
pub mod resize;
pub mod style;
pub mod toggle;

pub use config::{Chrome, ConfigError, Palette, WidgetConfig};
pub use controller::{Deferred, Effect, WidgetController, WidgetView};
pub use drag::{ButtonDrag, DragOverlay, DragRelease, SlopGate};
pub use geometry::{PanelSpan, Point, Rect, Viewport};
pub use layout::{layout_for, CornerLayout, EdgeOffsets, Side};
pub use message::{ControlMessage, MessageGate, MINIMIZE_MESSAGE};
pub use position::{Corner, CornerParseError, PanelEdge};
pub use resize::{plan_expand, Chevron, ExpandPlan, HandleMarks, ResizeLimits, ResizeSession};
pub use toggle::ButtonVisual;
