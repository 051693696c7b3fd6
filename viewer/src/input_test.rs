use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
    assert!(!m.pans());
}

#[test]
fn alt_alone_does_not_pan() {
    assert!(!Modifiers { alt: true, ..Modifiers::default() }.pans());
}

#[test]
fn shift_ctrl_and_meta_each_pan() {
    assert!(Modifiers { shift: true, ..Modifiers::default() }.pans());
    assert!(Modifiers { ctrl: true, ..Modifiers::default() }.pans());
    assert!(Modifiers { meta: true, ..Modifiers::default() }.pans());
}

// =============================================================
// Button
// =============================================================

#[test]
fn dom_button_codes_map_to_buttons() {
    assert_eq!(Button::from_dom(0), Some(Button::Primary));
    assert_eq!(Button::from_dom(1), Some(Button::Middle));
    assert_eq!(Button::from_dom(2), Some(Button::Secondary));
    assert_eq!(Button::from_dom(3), None);
    assert_eq!(Button::from_dom(-1), None);
}

// =============================================================
// Gesture
// =============================================================

#[test]
fn primary_rotates() {
    assert_eq!(Gesture::for_button(Button::Primary, Modifiers::default(), true), Some(Gesture::Rotate));
}

#[test]
fn modified_primary_pans_when_enabled() {
    let shift = Modifiers { shift: true, ..Modifiers::default() };
    assert_eq!(Gesture::for_button(Button::Primary, shift, true), Some(Gesture::Pan));
    assert_eq!(Gesture::for_button(Button::Primary, shift, false), Some(Gesture::Rotate));
}

#[test]
fn middle_dollies() {
    assert_eq!(Gesture::for_button(Button::Middle, Modifiers::default(), false), Some(Gesture::Dolly));
}

#[test]
fn secondary_pans_only_when_enabled() {
    assert_eq!(Gesture::for_button(Button::Secondary, Modifiers::default(), true), Some(Gesture::Pan));
    assert_eq!(Gesture::for_button(Button::Secondary, Modifiers::default(), false), None);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let state = InputState::default();
    assert!(matches!(state, InputState::Idle));
    assert_eq!(state.gesture(), None);
}

#[test]
fn begin_records_start_point() {
    let p = Point::new(12.0, 34.0);
    match InputState::begin(Gesture::Pan, p) {
        InputState::Panning { last_screen } => assert_eq!(last_screen, p),
        other => panic!("expected Panning, got {other:?}"),
    }
}

#[test]
fn begin_and_gesture_agree() {
    for g in [Gesture::Rotate, Gesture::Pan, Gesture::Dolly] {
        assert_eq!(InputState::begin(g, Point::new(0.0, 0.0)).gesture(), Some(g));
    }
}
