//! Frame scheduling: delta time, the non-blocking render guard and the shutdown latch.

use std::cell::Cell;
use std::time::Duration;

/// Outcome of a single scheduling attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The render path ran. `presented` tells whether the frame ended up on screen.
    Rendered { presented: bool },
    /// Another render was already in flight; the attempt was skipped. Not an error, the
    /// host will signal again.
    Busy,
    /// The scheduler has been disabled; nothing renders ever again.
    Disabled,
}

/// Non-blocking mutual exclusion over "a render is in progress for this surface".
///
/// At most one render executes at a time; a second concurrent request fails the acquire
/// and is simply skipped, never queued. Blocking here instead could deadlock the host's
/// single event-dispatch thread when paint signals nest.
#[derive(Debug, Default)]
pub(crate) struct RenderGuard {
    held: Cell<bool>,
}

impl RenderGuard {
    pub(crate) fn try_acquire(&self) -> Option<RenderPass<'_>> {
        if self.held.replace(true) {
            None
        } else {
            Some(RenderPass { guard: self })
        }
    }
}

/// Proof of exclusive access to the render path; releases the guard on drop.
pub(crate) struct RenderPass<'a> {
    guard: &'a RenderGuard,
}

impl Drop for RenderPass<'_> {
    fn drop(&mut self) {
        self.guard.held.set(false);
    }
}

/// Decides when a frame runs and with what delta time.
///
/// Two effective states, idle and rendering; the transition is attempted on every paint
/// or idle signal and never queued. Interior mutability keeps [`FrameScheduler::frame`]
/// callable from within its own render closure, which is exactly the reentrant dispatch
/// the guard exists for.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    guard: RenderGuard,
    last_frame: Cell<Option<Duration>>,
    disabled: Cell<bool>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-way latch stopping all future frames, set when the host signals teardown.
    /// Checked before the guard, so not even an acquire happens afterwards.
    pub fn disable(&self) {
        self.disabled.set(true);
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// Attempt one frame at time `now`, measured from any fixed origin the host picks.
    ///
    /// On a successful guard acquisition, `render` is called with the time in seconds
    /// since the previous frame (zero for the very first one) and returns whether the
    /// frame was presented.
    pub fn frame(&self, now: Duration, render: impl FnOnce(f64) -> bool) -> FrameOutcome {
        if self.disabled.get() {
            return FrameOutcome::Disabled;
        }

        let Some(_pass) = self.guard.try_acquire() else {
            log::trace!("Render already in flight, skipping frame.");
            return FrameOutcome::Busy;
        };

        let delta = self
            .last_frame
            .get()
            .map_or(0.0, |last| now.saturating_sub(last).as_secs_f64());
        self.last_frame.set(Some(now));

        FrameOutcome::Rendered {
            presented: render(delta),
        }
    }
}
