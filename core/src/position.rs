use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Viewport};

/// Viewport corner the toggle button is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CornerParseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CornerParseError::Empty);
        }
        Corner::ALL
            .into_iter()
            .find(|corner| corner.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CornerParseError::Unknown(trimmed.to_string()))
    }

    pub fn is_right(self) -> bool {
        matches!(self, Corner::TopRight | Corner::BottomRight)
    }

    pub fn is_bottom(self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::BottomRight)
    }

    pub fn from_quadrant(is_right: bool, is_bottom: bool) -> Self {
        match (is_right, is_bottom) {
            (false, false) => Corner::TopLeft,
            (true, false) => Corner::TopRight,
            (false, true) => Corner::BottomLeft,
            (true, true) => Corner::BottomRight,
        }
    }

    /// Quadrant test: each axis is decided independently against half the
    /// viewport; a point exactly on the midline belongs to the top/left half.
    pub fn nearest(point: Point, viewport: Viewport) -> Self {
        let center = viewport.center();
        Corner::from_quadrant(point.x > center.x, point.y > center.y)
    }

    /// The panel edge a user can drag: the one facing away from the corner.
    pub fn resize_edge(self) -> PanelEdge {
        if self.is_right() {
            PanelEdge::Left
        } else {
            PanelEdge::Right
        }
    }

    pub fn transform_origin(self) -> &'static str {
        match self {
            Corner::TopLeft => "top left",
            Corner::TopRight => "top right",
            Corner::BottomLeft => "bottom left",
            Corner::BottomRight => "bottom right",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Corner {
    type Err = CornerParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Corner::parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CornerParseError {
    Empty,
    Unknown(String),
}

impl fmt::Display for CornerParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CornerParseError::Empty => write!(f, "position cannot be empty"),
            CornerParseError::Unknown(value) => write!(
                f,
                "unknown position '{value}', expected top-left, top-right, bottom-left or bottom-right"
            ),
        }
    }
}

impl std::error::Error for CornerParseError {}

/// Vertical edge of the chat panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelEdge {
    Left,
    Right,
}

impl PanelEdge {
    pub fn as_str(self) -> &'static str {
        match self {
            PanelEdge::Left => "left",
            PanelEdge::Right => "right",
        }
    }
}
