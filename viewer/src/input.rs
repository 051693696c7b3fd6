//! Input model: modifier keys, mouse buttons, and the drag gesture state machine.
//!
//! A pointer-down picks a [`Gesture`] from the button and modifiers. The
//! matching [`InputState`] variant then carries the last pointer position so
//! each move can be turned into an incremental orbit, pan or dolly.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Whether a modifier that turns a primary drag into a pan is held.
    #[must_use]
    pub fn pans(self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Back/forward buttons yield `None`.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Wheel / trackpad scroll delta. Only the vertical axis zooms.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// What a drag does to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Rotate,
    Pan,
    Dolly,
}

impl Gesture {
    /// The gesture started by `button` with `modifiers` held.
    ///
    /// Primary rotates, or pans with shift/ctrl/meta. Middle dollies.
    /// Secondary pans. Pans resolve to `None` when panning is off, except that
    /// a modified primary drag falls back to rotating.
    #[must_use]
    pub fn for_button(button: Button, modifiers: Modifiers, pan_enabled: bool) -> Option<Self> {
        match button {
            Button::Primary if modifiers.pans() && pan_enabled => Some(Self::Pan),
            Button::Primary => Some(Self::Rotate),
            Button::Middle => Some(Self::Dolly),
            Button::Secondary if pan_enabled => Some(Self::Pan),
            Button::Secondary => None,
        }
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Orbiting the camera around its target.
    Rotating {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// Sliding the target across the screen plane.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// Moving the camera toward or away from the target.
    Dollying {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
}

impl InputState {
    /// The drag state for `gesture` starting at `screen`.
    #[must_use]
    pub fn begin(gesture: Gesture, screen: Point) -> Self {
        match gesture {
            Gesture::Rotate => Self::Rotating { last_screen: screen },
            Gesture::Pan => Self::Panning { last_screen: screen },
            Gesture::Dolly => Self::Dollying { last_screen: screen },
        }
    }

    /// The gesture in progress, if any.
    #[must_use]
    pub fn gesture(&self) -> Option<Gesture> {
        match self {
            Self::Idle => None,
            Self::Rotating { .. } => Some(Gesture::Rotate),
            Self::Panning { .. } => Some(Gesture::Pan),
            Self::Dollying { .. } => Some(Gesture::Dolly),
        }
    }
}
