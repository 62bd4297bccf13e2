/// Class/state treatment of the toggle button for one open/closed state.
///
/// Open: the button fills with the primary color, the message icon and its
/// stars scale out, the close icon scales in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonVisual {
    pub open: bool,
    pub message_icon_scaled: bool,
    pub close_icon_scaled: bool,
}

impl ButtonVisual {
    pub fn for_state(is_open: bool) -> Self {
        Self {
            open: is_open,
            message_icon_scaled: is_open,
            close_icon_scaled: !is_open,
        }
    }

    pub fn close_icon_transform(&self) -> Option<&'static str> {
        if self.open {
            Some("scale(0.6)")
        } else {
            None
        }
    }
}
