//! Edge-offset layout for the button wrapper and the chat panel.
//!
//! Elements are anchored with `top`/`right`/`bottom`/`left` rather than
//! absolute coordinates so the browser keeps them in place when the window
//! resizes. Every layout starts from four cleared offsets and sets exactly the
//! two that belong to the active corner.

use crate::config::WidgetConfig;
use crate::geometry::px;
use crate::position::Corner;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn css_name(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeOffsets {
    top: Option<String>,
    right: Option<String>,
    bottom: Option<String>,
    left: Option<String>,
}

impl EdgeOffsets {
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> Option<&str> {
        match side {
            Side::Top => self.top.as_deref(),
            Side::Right => self.right.as_deref(),
            Side::Bottom => self.bottom.as_deref(),
            Side::Left => self.left.as_deref(),
        }
    }

    pub fn set(&mut self, side: Side, value: impl Into<String>) {
        let slot = match side {
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
        };
        *slot = Some(value.into());
    }

    pub fn clear(&mut self, side: Side) {
        match side {
            Side::Top => self.top = None,
            Side::Right => self.right = None,
            Side::Bottom => self.bottom = None,
            Side::Left => self.left = None,
        }
    }

    pub fn active_sides(&self) -> Vec<Side> {
        Side::ALL
            .into_iter()
            .filter(|side| self.get(*side).is_some())
            .collect()
    }

    /// Inline declarations for the sides that are set, in top/right/bottom/left
    /// order.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for side in Side::ALL {
            if let Some(value) = self.get(side) {
                css.push_str(side.css_name());
                css.push_str(": ");
                css.push_str(value);
                css.push_str("; ");
            }
        }
        css
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CornerLayout {
    pub corner: Corner,
    pub wrapper: EdgeOffsets,
    pub panel: EdgeOffsets,
}

pub fn vertical_side(corner: Corner) -> Side {
    if corner.is_bottom() {
        Side::Bottom
    } else {
        Side::Top
    }
}

pub fn horizontal_side(corner: Corner) -> Side {
    if corner.is_right() {
        Side::Right
    } else {
        Side::Left
    }
}

pub fn layout_for(corner: Corner, config: &WidgetConfig) -> CornerLayout {
    let vertical = vertical_side(corner);
    let horizontal = horizontal_side(corner);

    let mut wrapper = EdgeOffsets::cleared();
    wrapper.set(vertical, px(config.offset));
    wrapper.set(horizontal, px(config.offset));

    let mut panel = EdgeOffsets::cleared();
    if config.is_drawer {
        panel.set(vertical, "0");
        panel.set(horizontal, "0");
    } else {
        // The panel opens away from the corner, so its vertical anchor is the
        // button's opposite edge.
        let button_edge = if corner.is_bottom() { "top" } else { "bottom" };
        panel.set(
            vertical,
            format!(
                "calc({} + anchor(--button {button_edge}))",
                px(config.widget_space)
            ),
        );
        panel.set(
            horizontal,
            format!("calc(0px + anchor(--button {}))", horizontal.css_name()),
        );
    }

    CornerLayout {
        corner,
        wrapper,
        panel,
    }
}
