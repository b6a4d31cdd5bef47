//! Translation of raw pointer/wheel events into camera gestures.

use std::time::Duration;

use crate::engine::MapEngine;
use crate::input::{HeldButtons, InputEvent, PointerButton};

/// Inertial throws are clamped to this velocity on each axis, in logical pixels per
/// second. A single low-delta, high-displacement sample would otherwise produce an
/// unbounded fling.
const MAX_FLING_VELOCITY: f64 = 2000.0;

/// Rotation in radians per horizontal pixel of a secondary-button drag.
const ROTATE_RADIANS_PER_PIXEL: f64 = 0.01;

/// Tilt in radians per vertical pixel of a secondary-button drag.
const TILT_RADIANS_PER_PIXEL: f64 = 0.001 * std::f64::consts::TAU;

/// The camera must not flip past near-horizon.
const MAX_TILT: f64 = (90.0 - 12.0) / 360.0 * std::f64::consts::TAU;

/// Scaling for wheel zoom, tuned for comfortable zoom speed.
const WHEEL_SPAN_MULTIPLIER: f64 = 0.1;

/// Rotation units per wheel click when the toolkit reports none.
const FALLBACK_WHEEL_CLICK: i32 = 3;

/// Scaling for the middle-button pinch fallback.
const MIDDLE_PINCH_MULTIPLIER: f64 = 0.01;

/// Turns one input event at a time into zero or one camera gesture calls on the engine.
///
/// All positions kept here are density-scaled, i.e. already in the engine's logical
/// pixel space.
#[derive(Debug, Default)]
pub(crate) struct GestureTranslator {
    last_position: (f64, f64),
    last_moved: Duration,
    velocity: (f64, f64),
    panning: bool,
    middle_baseline_y: f64,
    middle_armed: bool,
}

impl GestureTranslator {
    pub(crate) fn handle(
        &mut self,
        event: InputEvent,
        now: Duration,
        density: f64,
        engine: &mut dyn MapEngine,
    ) {
        match event {
            InputEvent::PointerPressed {
                button: PointerButton::Primary,
                ..
            } => {
                self.last_moved = now;
            }
            InputEvent::PointerPressed {
                button: PointerButton::Middle,
                y,
                ..
            } => {
                // Each middle drag gets a fresh baseline, armed by a neutral pinch on
                // its first movement sample.
                self.middle_baseline_y = y * density;
                self.middle_armed = false;
            }
            InputEvent::PointerReleased {
                button: PointerButton::Primary,
                x,
                y,
            } => self.fling(x * density, y * density, engine),
            InputEvent::PointerMoved { x, y, held } => {
                self.moved(x * density, y * density, held, now, engine);
            }
            InputEvent::Wheel {
                x,
                y,
                rotation,
                click_delta,
            } => {
                let click = if click_delta != 0 {
                    click_delta
                } else {
                    FALLBACK_WHEEL_CLICK
                };
                let scale = 1.0 + WHEEL_SPAN_MULTIPLIER * f64::from(rotation / click);
                engine.handle_pinch_gesture(x * density, y * density, scale, 0.0);
            }
            InputEvent::PointerPressed { .. } | InputEvent::PointerReleased { .. } => {}
        }
    }

    fn fling(&mut self, x: f64, y: f64, engine: &mut dyn MapEngine) {
        let vx = self.velocity.0.clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY);
        let vy = self.velocity.1.clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY);
        engine.handle_fling_gesture(x, y, vx, vy);
        self.panning = false;
        self.velocity = (0.0, 0.0);
    }

    fn moved(
        &mut self,
        x: f64,
        y: f64,
        held: HeldButtons,
        now: Duration,
        engine: &mut dyn MapEngine,
    ) {
        let elapsed = now.saturating_sub(self.last_moved).as_secs_f64();

        if held.primary {
            // The first sample after button-down has no valid previous position under
            // the button yet; it only arms the panning flag.
            if self.panning {
                engine.handle_pan_gesture(self.last_position.0, self.last_position.1, x, y);
            }
            self.panning = true;

            // A zero elapsed interval would make the velocity non-finite.
            if elapsed > 0.0 {
                self.velocity = (
                    (x - self.last_position.0) / elapsed,
                    (y - self.last_position.1) / elapsed,
                );
            }
        } else if held.secondary {
            // Could be rotating around any point, e.g. the one where the button was
            // pressed, but that is disorienting with a desktop mouse.
            engine.handle_rotate_gesture(
                f64::from(engine.viewport_width()) / 2.0,
                f64::from(engine.viewport_height()) / 2.0,
                -(x - self.last_position.0) * ROTATE_RADIANS_PER_PIXEL,
            );

            // Tilt is an absolute recomputation rather than a delta, hence read-modify-
            // write through the engine.
            let tilt = engine.tilt() + (self.last_position.1 - y) * TILT_RADIANS_PER_PIXEL;
            engine.set_tilt(tilt.clamp(0.0, MAX_TILT));
        }

        if held.middle {
            if self.middle_armed {
                let scale = 1.0 + MIDDLE_PINCH_MULTIPLIER * (self.last_position.1 - y);
                engine.handle_pinch_gesture(x, self.middle_baseline_y, scale, 0.0);
            } else {
                // Neutral pinch establishes the baseline for the samples that follow.
                self.middle_armed = true;
                engine.handle_pinch_gesture(x, y, 1.0, 0.0);
            }
        }

        self.last_position = (x, y);
        self.last_moved = now;
    }
}
