use super::*;

#[test]
fn starts_closed() {
    assert!(!ReadyGate::new().is_open());
}

#[test]
fn opens_exactly_once() {
    let gate = ReadyGate::new();
    gate.open().expect("first open");
    assert!(gate.is_open());
    assert!(matches!(gate.open(), Err(GateError::AlreadyOpen)));
    assert!(matches!(gate.open(), Err(GateError::AlreadyOpen)));
    assert!(gate.is_open());
}

#[test]
fn static_gate() {
    static GATE: ReadyGate = ReadyGate::new();
    assert!(GATE.open().is_ok());
    assert!(GATE.open().is_err());
}
