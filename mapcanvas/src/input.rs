//! Raw input events as delivered by the host toolkit.
//!
//! Hosts push these through [`crate::MapCanvas::handle_input`]; no callback registration
//! or widget inheritance is involved. Coordinates are in physical pixels as reported by
//! the toolkit; density scaling happens inside the canvas.

/// A pointer device button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Usually the left mouse button. Drives panning and flings.
    Primary,
    /// Usually the right mouse button. Drives rotation and tilt.
    Secondary,
    /// Drives the pinch-zoom fallback for devices with unreliable wheels.
    Middle,
}

/// Which buttons are held during a pointer movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldButtons {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl HeldButtons {
    pub fn primary() -> Self {
        Self {
            primary: true,
            ..Self::default()
        }
    }

    pub fn secondary() -> Self {
        Self {
            secondary: true,
            ..Self::default()
        }
    }

    pub fn middle() -> Self {
        Self {
            middle: true,
            ..Self::default()
        }
    }
}

/// A single event from the host's pointer/wheel stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerPressed {
        button: PointerButton,
        x: f64,
        y: f64,
    },
    PointerReleased {
        button: PointerButton,
        x: f64,
        y: f64,
    },
    PointerMoved {
        x: f64,
        y: f64,
        held: HeldButtons,
    },
    Wheel {
        x: f64,
        y: f64,
        /// Accumulated wheel rotation, in the toolkit's native units.
        rotation: i32,
        /// Rotation units per wheel "click". Some toolkits report `0`; a fixed divisor
        /// is used instead then.
        click_delta: i32,
    },
}
