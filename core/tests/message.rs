use chat_widget_core::{ControlMessage, MessageGate, MINIMIZE_MESSAGE};

const ORIGIN: &str = "http://localhost:5173";

#[test]
fn minimize_from_trusted_origin_is_accepted() {
    let gate = MessageGate::new(ORIGIN);
    assert_eq!(
        gate.classify(ORIGIN, Some(MINIMIZE_MESSAGE)),
        Some(ControlMessage::Minimize)
    );
}

#[test]
fn other_origins_are_dropped() {
    let gate = MessageGate::new(ORIGIN);
    assert_eq!(gate.classify("http://evil.example", Some("minimize")), None);
    assert_eq!(gate.classify("http://localhost:5174", Some("minimize")), None);
    assert!(!gate.accepts(""));
}

#[test]
fn unknown_or_missing_types_are_dropped() {
    let gate = MessageGate::new(ORIGIN);
    assert_eq!(gate.classify(ORIGIN, Some("maximize")), None);
    assert_eq!(gate.classify(ORIGIN, None), None);
}
