//! Stylesheet and inline style generation for the widget's shadow tree.
//!
//! Everything themable goes through CSS custom properties declared on
//! `:host`, so a settings editor can restyle a live widget by setting them on
//! the host element.

use std::fmt::Write;

use crate::config::WidgetConfig;
use crate::drag::DragOverlay;
use crate::geometry::{px, Rect};
use crate::layout::{horizontal_side, CornerLayout, Side};

pub const TAG_NAME: &str = "chat-widget";
pub const POSITION_CHANGE_EVENT: &str = "positionChange";

pub const ICON_VIEW_BOX: &str = "0 0 24 24";
pub const MESSAGE_ICON_PATH: &str =
    "M4 3h16a2 2 0 0 1 2 2v11a2 2 0 0 1-2 2H9l-5 4v-4a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2z";
pub const STARS_PATH: &str =
    "M18 1.5l.9 2.1 2.1.9-2.1.9-.9 2.1-.9-2.1-2.1-.9 2.1-.9zM14 6l.5 1.2 1.2.5-1.2.5L14 9.4l-.5-1.2-1.2-.5 1.2-.5z";
pub const CLOSE_ICON_PATH: &str = "M19 6.41 17.59 5 12 10.59 6.41 5 5 6.41 10.59 12 5 17.59 6.41 19 12 13.41 17.59 19 19 17.59 13.41 12z";

pub fn custom_properties(config: &WidgetConfig) -> Vec<(&'static str, String)> {
    let palette = &config.palette;
    let chrome = &config.chrome;
    vec![
        ("--primary-color", palette.primary.clone()),
        ("--background-color", palette.background.clone()),
        ("--shadow-color", palette.shadow.clone()),
        ("--outline-color", palette.outline.clone()),
        ("--outline-background", palette.outline_background.clone()),
        ("--gray-border", palette.gray_border.clone()),
        ("--button-width", px(config.button_width)),
        ("--button-height", px(config.button_height)),
        ("--button-icon-size", px(config.icon_width)),
        ("--border-radius", px(chrome.border_radius)),
        ("--chat-width", px(config.default_chat_width)),
        ("--chat-height", config.panel_height()),
        ("--transition-duration", format!("{}s", chrome.transition_secs)),
        ("--widget-space", px(config.widget_space)),
        ("--min-width", px(config.min_chat_width)),
        ("--resize-handle-size", px(chrome.resize_handle_size)),
    ]
}

pub fn stylesheet(config: &WidgetConfig) -> String {
    let mut css = String::from(":host {\n");
    for (name, value) in custom_properties(config) {
        let _ = writeln!(css, "  {name}: {value};");
    }
    css.push_str("}\n");
    css.push_str(BASE_RULES);
    css
}

pub fn wrapper_style(layout: &CornerLayout) -> String {
    format!("position: fixed; {}", layout.wrapper.to_css())
}

/// Inline style of the chat panel. A committed `left` from a resize or expand
/// replaces the horizontal corner anchor until the next reflow.
pub fn panel_style(
    layout: &CornerLayout,
    width: f64,
    left_override: Option<f64>,
    animate: bool,
) -> String {
    let mut offsets = layout.panel.clone();
    if let Some(left) = left_override {
        offsets.clear(horizontal_side(layout.corner));
        offsets.set(Side::Left, px(left));
    }
    let mut css = offsets.to_css();
    let _ = write!(
        css,
        "width: {}; transform-origin: {};",
        px(width),
        layout.corner.transform_origin()
    );
    if animate {
        css.push_str(" transition: all 0.3s ease;");
    }
    css
}

pub fn outline_style(outline: Option<Rect>) -> String {
    match outline {
        Some(rect) => format!(
            "display: block; left: {}; top: {}; width: {}; height: {};",
            px(rect.left),
            px(rect.top),
            px(rect.width),
            px(rect.height)
        ),
        None => "display: none;".to_string(),
    }
}

pub fn hidden_style(hidden: bool) -> &'static str {
    if hidden {
        "opacity: 0;"
    } else {
        ""
    }
}

/// Inline style of the detached ghost button. Lives outside the shadow tree,
/// so nothing can come from the stylesheet.
pub fn ghost_style(config: &WidgetConfig, overlay: &DragOverlay) -> String {
    let mut css = format!(
        "position: fixed; left: {}; top: {}; width: {}; height: {}; \
         border: 0; border-radius: 50%; background: {}; opacity: 0.8; \
         pointer-events: none; z-index: 9999; display: flex; \
         justify-content: center; align-items: center; cursor: pointer;",
        px(overlay.ghost.left),
        px(overlay.ghost.top),
        px(config.button_width),
        px(config.button_height),
        config.palette.primary
    );
    if overlay.settling {
        css.push_str(" transition: all 0.3s ease;");
    }
    css
}

pub fn placeholder_style(config: &WidgetConfig, overlay: &DragOverlay) -> String {
    format!(
        "position: fixed; left: {}; top: {}; width: {}; height: {}; \
         border-radius: 50%; border: 2px dashed {}; box-sizing: border-box; \
         opacity: {}; transition: opacity 0.2s ease; pointer-events: none; z-index: 9997;",
        px(overlay.placeholder.left),
        px(overlay.placeholder.top),
        px(config.button_width),
        px(config.button_height),
        config.palette.primary,
        if overlay.placeholder_visible { "0.6" } else { "0" }
    )
}

/// Message icon markup for the ghost, colored inline.
pub fn ghost_icon_markup(config: &WidgetConfig) -> String {
    let palette = &config.palette;
    format!(
        r#"<svg viewBox="{ICON_VIEW_BOX}" style="width: {}; height: {}; fill: {}; stroke: {};"><path d="{MESSAGE_ICON_PATH}"/><path class="stars" d="{STARS_PATH}"/></svg>"#,
        px(config.icon_width),
        px(config.icon_width),
        palette.background,
        palette.primary
    )
}

const BASE_RULES: &str = r#"
.wrapper {
  position: fixed;
  z-index: 9998;
  touch-action: none;
  display: flex;
  align-items: center;
  justify-content: center;
  height: fit-content;
  width: fit-content;
}
.button-wrapper {
  box-shadow: 0 5px 8px 0 #00000060;
  border-radius: 50%;
  transition: box-shadow 0.3s;
}
.button-wrapper:hover {
  box-shadow: 0 9px 10px 0 #00000060;
}
.chat-button {
  width: var(--button-width);
  height: var(--button-height);
  border-radius: 50%;
  background: var(--background-color);
  border: 2px solid var(--primary-color);
  cursor: pointer;
  box-shadow: inset 0 0 0 0 var(--primary-color);
  display: flex;
  align-items: center;
  justify-content: center;
  touch-action: none;
  transition: box-shadow var(--transition-duration), background-color var(--transition-duration);
  transition-timing-function: cubic-bezier(0.9, 0, 0.3, 1.2);
  position: relative;
  anchor-name: --button;
}
.chat-button:hover,
.chat-button.open {
  border: none;
  box-shadow: inset 0 0 0 var(--button-height) var(--primary-color);
  transition-delay: 0s, 0s, 0.1s;
}
.chat-button svg {
  width: var(--button-icon-size);
  height: var(--button-icon-size);
  fill: var(--primary-color);
  transition: transform var(--transition-duration), fill var(--transition-duration), opacity var(--transition-duration);
  position: relative;
  transform: scale(1);
  opacity: 1;
}
.chat-button svg.scaled {
  transform: scale(0);
  opacity: 0;
}
.chat-button svg.x-icon {
  position: absolute;
}
.chat-button svg .stars {
  fill: var(--primary-color);
  stroke: var(--background-color);
  transform-origin: center;
  transition: transform var(--transition-duration), fill var(--transition-duration), stroke var(--transition-duration);
}
@keyframes shine {
  0% { mask-position: 150%; }
  5% { mask-position: 150%; }
  15% { mask-position: -50%; }
  100% { mask-position: -50%; }
}
.chat-button:hover svg .stars {
  fill: var(--background-color);
  stroke: var(--primary-color);
  mask-image: linear-gradient(-75deg, rgba(0, 0, 0, 1) 30%, rgba(0, 0, 0, 0) 50%, rgba(0, 0, 0, 1) 70%);
  mask-size: 200%;
  animation: shine 6s ease-in-out infinite;
}
.chat-button:hover svg,
.chat-button.open svg {
  fill: var(--background-color);
}
.chat-container {
  position: fixed;
  width: var(--chat-width);
  min-width: var(--min-width);
  height: var(--chat-height);
  background: var(--background-color);
  border: 1px solid var(--gray-border);
  border-radius: var(--border-radius);
  box-shadow: 0 5px 20px var(--shadow-color);
  box-sizing: border-box;
  display: flex;
  flex-direction: column;
  opacity: 0;
  transform: scale(0.2);
  pointer-events: none;
  transition: opacity var(--transition-duration), transform var(--transition-duration);
}
.chat-container.open {
  opacity: 1;
  transform: scale(1);
  pointer-events: all;
}
.chat-container.resizing iframe {
  pointer-events: none;
}
.resize-outline {
  display: none;
  position: fixed;
  border: 3px solid var(--primary-color);
  outline: 1px solid var(--outline-color);
  pointer-events: none;
  z-index: 9999;
  background: var(--outline-background);
  box-sizing: border-box;
  border-radius: var(--border-radius);
}
iframe {
  width: 100%;
  height: 100%;
  border: none;
  border-radius: var(--border-radius);
}
.resize-side {
  position: absolute;
  height: 98%;
  width: 4px;
  top: 1%;
  cursor: ew-resize;
  touch-action: none;
  z-index: 1;
}
.resize-side.inactive {
  display: none;
}
.resize-side.left {
  left: 0;
}
.resize-side.right {
  right: 0;
}
.resize-side > .resize-track {
  position: absolute;
  width: 100%;
  height: 100%;
  background: transparent;
  transition: all 0.3s;
}
.resize-side.left > .resize-track {
  border-radius: 6px 0 0 6px;
}
.resize-side.right > .resize-track {
  border-radius: 0 6px 6px 0;
}
.resize-side:hover > .resize-track {
  background: var(--primary-color);
}
.side-handle-wrapper {
  height: 20px;
  width: var(--resize-handle-size);
  top: 50%;
  position: absolute;
  cursor: pointer;
}
.side-handle-wrapper.left {
  left: 0;
}
.side-handle-wrapper.right {
  right: 0;
}
.side-handle {
  opacity: 0;
  position: absolute;
  top: 50%;
  width: 0;
  height: 0;
  border-top: 3px solid transparent;
  border-bottom: 3px solid transparent;
  transition: all 0.3s;
}
.side-handle-wrapper.left .side-handle {
  left: 0;
}
.side-handle-wrapper.right .side-handle {
  right: 0;
}
.side-handle.points-left {
  border-right: 3px solid white;
}
.side-handle.points-right {
  border-left: 3px solid white;
}
.resize-side:hover .side-handle {
  opacity: 1;
}
"#;
