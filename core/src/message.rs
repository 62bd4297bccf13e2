//! Gate for the cross-frame control channel.

pub const MINIMIZE_MESSAGE: &str = "minimize";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMessage {
    Minimize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageGate {
    trusted_origin: String,
}

impl MessageGate {
    pub fn new(trusted_origin: impl Into<String>) -> Self {
        Self {
            trusted_origin: trusted_origin.into(),
        }
    }

    pub fn accepts(&self, origin: &str) -> bool {
        origin == self.trusted_origin
    }

    /// `kind` is the payload's `type` field. Anything from another origin, or
    /// with an unknown type, yields `None` and is dropped without a trace.
    pub fn classify(&self, origin: &str, kind: Option<&str>) -> Option<ControlMessage> {
        if !self.accepts(origin) {
            return None;
        }
        match kind? {
            MINIMIZE_MESSAGE => Some(ControlMessage::Minimize),
            _ => None,
        }
    }
}
