use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::px;
use crate::position::Corner;

include!(concat!(env!("OUT_DIR"), "/widget_defaults.rs"));

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub primary: String,
    pub background: String,
    pub shadow: String,
    pub outline: String,
    pub outline_background: String,
    pub gray_border: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_COLOR.to_string(),
            background: DEFAULT_BACKGROUND_COLOR.to_string(),
            shadow: DEFAULT_SHADOW_COLOR.to_string(),
            outline: DEFAULT_OUTLINE_COLOR.to_string(),
            outline_background: DEFAULT_OUTLINE_BACKGROUND.to_string(),
            gray_border: DEFAULT_GRAY_BORDER.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Chrome {
    pub border_radius: f64,
    pub resize_handle_size: f64,
    pub transition_secs: f64,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            border_radius: DEFAULT_BORDER_RADIUS,
            resize_handle_size: DEFAULT_RESIZE_HANDLE_SIZE,
            transition_secs: DEFAULT_TRANSITION_SECS,
        }
    }
}

/// Static widget settings. Read at construction and render time, never
/// written by the controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    pub button_width: f64,
    pub button_height: f64,
    pub icon_width: f64,
    pub offset: f64,
    pub widget_space: f64,
    pub top_offset: Option<f64>,
    pub min_chat_width: f64,
    pub default_chat_width: f64,
    pub default_position: Corner,
    pub is_drawer: bool,
    pub trusted_origin: String,
    pub frame_src: Option<String>,
    pub palette: Palette,
    pub chrome: Chrome,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            button_width: DEFAULT_BUTTON_WIDTH,
            button_height: DEFAULT_BUTTON_HEIGHT,
            icon_width: DEFAULT_ICON_WIDTH,
            offset: DEFAULT_OFFSET,
            widget_space: DEFAULT_WIDGET_SPACE,
            top_offset: DEFAULT_TOP_OFFSET,
            min_chat_width: DEFAULT_MIN_CHAT_WIDTH,
            default_chat_width: DEFAULT_CHAT_WIDTH,
            default_position: Corner::parse(DEFAULT_POSITION).unwrap_or_default(),
            is_drawer: DEFAULT_IS_DRAWER,
            trusted_origin: DEFAULT_TRUSTED_ORIGIN.to_string(),
            frame_src: DEFAULT_FRAME_SRC.map(str::to_string),
            palette: Palette::default(),
            chrome: Chrome::default(),
        }
    }
}

impl WidgetConfig {
    /// Parses a JSON object of camelCase overrides on top of the built-in
    /// defaults. Missing keys keep their default.
    pub fn from_overrides(json: &str) -> Result<Self, ConfigError> {
        let trimmed = json.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let config: WidgetConfig =
            serde_json::from_str(trimmed).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validated()
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        let positive = [
            ("buttonWidth", self.button_width),
            ("buttonHeight", self.button_height),
            ("iconWidth", self.icon_width),
            ("minChatWidth", self.min_chat_width),
            ("defaultChatWidth", self.default_chat_width),
            ("chrome.transitionSecs", self.chrome.transition_secs),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }
        let non_negative = [
            ("offset", self.offset),
            ("widgetSpace", self.widget_space),
            ("topOffset", self.top_offset.unwrap_or(0.0)),
            ("chrome.borderRadius", self.chrome.border_radius),
            ("chrome.resizeHandleSize", self.chrome.resize_handle_size),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("cannot be negative, got {value}"),
                });
            }
        }
        if self.default_chat_width < self.min_chat_width {
            return Err(ConfigError::Invalid {
                field: "defaultChatWidth",
                reason: format!(
                    "{} is below minChatWidth {}",
                    self.default_chat_width, self.min_chat_width
                ),
            });
        }
        if self.trusted_origin.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "trustedOrigin",
                reason: "cannot be empty".to_string(),
            });
        }
        Ok(self)
    }

    /// Margin kept between the panel and the viewport edge while resizing.
    /// Drawer mode runs edge to edge.
    pub fn effective_margin(&self) -> f64 {
        if self.is_drawer {
            0.0
        } else {
            self.offset
        }
    }

    /// CSS height of the chat panel.
    pub fn panel_height(&self) -> String {
        if self.is_drawer {
            return match self.top_offset {
                Some(top) => format!("calc(100% - {})", px(top)),
                None => "100%".to_string(),
            };
        }
        let top = self.top_offset.unwrap_or(self.offset);
        format!(
            "calc(100% - {} - {} - {} - {})",
            px(self.button_height),
            px(self.offset),
            px(top),
            px(self.widget_space)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(message) => write!(f, "invalid widget config: {message}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid widget config field {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
