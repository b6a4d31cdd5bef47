//! The composition root a host embeds.

use std::time::Duration;

use crate::bridge::{CanvasOptions, RenderBridge};
use crate::engine::MapEngine;
use crate::gestures::GestureTranslator;
use crate::input::InputEvent;
use crate::scheduler::{FrameOutcome, FrameScheduler};
use crate::surface::RenderSurface;

/// A map rendered into a host-provided surface.
///
/// The host's event handlers call into this directly: input events go to
/// [`MapCanvas::handle_input`], paint and idle signals to [`MapCanvas::redraw`], size
/// changes to [`MapCanvas::resized`] and window teardown to [`MapCanvas::close`]. All of
/// it runs on the host's event-dispatch thread; nothing here blocks or spawns threads.
pub struct MapCanvas<E, S> {
    surface: S,
    bridge: RenderBridge<E>,
    gestures: GestureTranslator,
    scheduler: FrameScheduler,
}

impl<E: MapEngine, S: RenderSurface> MapCanvas<E, S> {
    /// `construct` builds the engine instance. It is deferred until the first frame with
    /// a working GL context, since engines allocate GPU resources on construction.
    pub fn new(surface: S, construct: impl FnOnce() -> E + 'static, options: CanvasOptions) -> Self {
        Self {
            surface,
            bridge: RenderBridge::new(Box::new(construct), options),
            gestures: GestureTranslator::default(),
            scheduler: FrameScheduler::new(),
        }
    }

    /// Feed one raw input event, stamped with the host's monotonic time.
    ///
    /// Events arriving before the engine exists (i.e. before the first successful render)
    /// are dropped silently; there is no camera to move yet.
    pub fn handle_input(&mut self, event: InputEvent, now: Duration) {
        let density = self.surface.pixel_density();
        let Some(engine) = self.bridge.engine_mut() else {
            log::trace!("Dropping input event, engine not constructed yet.");
            return;
        };
        self.gestures.handle(event, now, density, engine);
    }

    /// The paint/idle entry point: attempt to render one frame.
    ///
    /// Skips silently when a render is already in flight or after [`MapCanvas::close`].
    /// On the first successful pass this also brings GL up and constructs the engine.
    pub fn redraw(&mut self, now: Duration) -> FrameOutcome {
        let Self {
            surface,
            bridge,
            scheduler,
            ..
        } = self;

        scheduler.frame(now, |delta| {
            if !surface.make_current() {
                log::warn!("Could not make the GL context current.");
                return false;
            }

            if !bridge.ensure_gl(surface) {
                return false;
            }

            // The context may be shared with sibling surfaces, so never assume the
            // viewport is still ours.
            let (width, height) = surface.size();
            surface.set_viewport(width, height);

            if bridge.render_frame(surface, delta) {
                surface.swap_buffers();
                true
            } else {
                false
            }
        })
    }

    /// Forward the surface's current size to the engine. A no-op before the engine
    /// exists; the host should follow up with a redraw either way.
    pub fn resized(&mut self) {
        let (width, height) = self.surface.size();
        self.bridge.resize(width, height);
    }

    /// Stop rendering for good. One-way; call when the host window is being torn down so
    /// no GL or engine call can race the context destruction.
    pub fn close(&mut self) {
        log::debug!("Canvas closed, rendering disabled.");
        self.scheduler.disable();
    }

    /// Show or hide the map. A hidden map keeps advancing its time-step every frame, so
    /// camera animations continue; only drawing is replaced by a clear.
    pub fn set_map_visible(&mut self, visible: bool) {
        self.bridge.set_visible(visible);
    }

    /// The engine instance, once constructed. Hosts use this to configure the engine
    /// after the first frame; before it, `None`.
    pub fn engine(&self) -> Option<&E> {
        self.bridge.engine()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.bridge.engine_mut()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
