//! Ownership of the engine instance and execution of single frames.

use std::path::Path;

use crate::engine::{MapEngine, SceneUpdate};
use crate::surface::{RenderSurface, Rgba};

/// Shown between GL bring-up and the engine's first real frame.
const DEFAULT_BACKGROUND: Rgba = [240.0 / 255.0, 235.0 / 255.0, 235.0 / 255.0, 1.0];

/// Host-side configuration, passed to [`crate::MapCanvas::new`].
#[derive(Debug, Clone)]
pub struct CanvasOptions {
    pub(crate) scene_path: String,
    pub(crate) scene_updates: Vec<SceneUpdate>,
    pub(crate) background: Rgba,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            scene_path: "scene.yaml".to_owned(),
            scene_updates: Vec::new(),
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl CanvasOptions {
    /// Scene to load, either a plain path (resolved against the working directory) or a
    /// full URL.
    pub fn with_scene(mut self, path: impl Into<String>) -> Self {
        self.scene_path = path.into();
        self
    }

    /// Apply a [`SceneUpdate`] on top of the loaded scene, e.g. an API key.
    pub fn with_scene_update(mut self, update: SceneUpdate) -> Self {
        self.scene_updates.push(update);
        self
    }

    /// Clear color shown before the engine draws its first frame.
    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }
}

/// Owns the embedded engine and runs one frame at a time.
///
/// Initialization is two independent stages. GL function loading happens first and is
/// retried every frame until it succeeds. The engine is constructed exactly once, on the
/// first frame after GL is ready; constructing it earlier would mean its destructor could
/// run against GPU resources that were never allocated.
pub(crate) struct RenderBridge<E> {
    engine: Option<E>,
    construct: Option<Box<dyn FnOnce() -> E>>,
    gl_ready: bool,
    visible: bool,
    options: CanvasOptions,
}

impl<E: MapEngine> RenderBridge<E> {
    pub(crate) fn new(construct: Box<dyn FnOnce() -> E>, options: CanvasOptions) -> Self {
        Self {
            engine: None,
            construct: Some(construct),
            gl_ready: false,
            visible: true,
            options,
        }
    }

    pub(crate) fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub(crate) fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// One-time GL bring-up: load the function table and flush the background color to
    /// the screen so the host does not flash black while the scene loads.
    pub(crate) fn ensure_gl(&mut self, surface: &mut dyn RenderSurface) -> bool {
        if self.gl_ready {
            return true;
        }

        if !surface.load_gl() {
            log::error!("Failed to load the GL function table, will retry next frame.");
            return false;
        }
        log::debug!("GL function table loaded.");

        surface.clear(self.options.background);
        surface.swap_buffers();
        self.gl_ready = true;
        true
    }

    /// Execute one frame: construct the engine if this is the first one, advance its
    /// time-step, then draw or clear depending on visibility.
    ///
    /// Returns whether the frame should be presented. Engine faults are logged and
    /// contained here; propagating them would take down the host's event loop.
    pub(crate) fn render_frame(&mut self, surface: &mut dyn RenderSurface, delta: f64) -> bool {
        debug_assert!(self.gl_ready, "GL must be ready before the engine runs");

        if self.engine.is_none() {
            if let Some(construct) = self.construct.take() {
                let mut engine = construct();

                let url = scene_url(&self.options.scene_path);
                log::debug!("Loading scene from {url}.");
                engine.load_scene_async(&url, &self.options.scene_updates);

                engine.setup_gl();
                let (width, height) = surface.size();
                engine.resize(width, height);

                self.engine = Some(engine);
            }
        }

        let Some(engine) = self.engine.as_mut() else {
            return false;
        };

        if let Err(fault) = engine.update(delta) {
            log::error!("Engine update failed: {fault}.");
            return false;
        }

        if self.visible {
            if let Err(fault) = engine.render() {
                log::error!("Engine render failed: {fault}.");
                return false;
            }
        } else {
            // Hidden maps still advance their time-step above, so animations and
            // inertia do not stall; only the draw is replaced by a clear.
            surface.clear_color_and_depth();
        }

        true
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        if let Some(engine) = self.engine.as_mut() {
            engine.resize(width, height);
        }
    }
}

/// Resolve the configured scene location into an absolute URL the engine can load.
///
/// Relative paths resolve against the current working directory; anything already
/// carrying a scheme, or an absolute path, passes through as-is. Hosts may be started
/// from an installed location, so relying on the working directory alone is not enough.
fn scene_url(path: &str) -> String {
    if path.contains("://") {
        return path.to_owned();
    }

    let path = Path::new(path);
    if path.is_absolute() {
        format!("file://{}", path.display())
    } else {
        match std::env::current_dir() {
            Ok(cwd) => format!("file://{}", cwd.join(path).display()),
            Err(e) => {
                log::warn!("Could not determine the working directory: {e}.");
                format!("file:///{}", path.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{EngineCall, MockEngine, MockSurface};

    fn bridge() -> RenderBridge<MockEngine> {
        RenderBridge::new(Box::new(MockEngine::default), CanvasOptions::default())
    }

    #[test]
    fn gl_load_failure_is_retried() {
        let mut surface = MockSurface {
            fail_gl_load: true,
            ..Default::default()
        };
        let mut bridge = bridge();

        assert!(!bridge.ensure_gl(&mut surface));
        assert!(bridge.engine().is_none());

        // The platform recovered; the next paint signal brings GL up.
        surface.fail_gl_load = false;
        assert!(bridge.ensure_gl(&mut surface));
        assert_eq!(1, surface.swaps);
    }

    #[test]
    fn gl_bring_up_happens_once() {
        let mut surface = MockSurface::default();
        let mut bridge = bridge();

        assert!(bridge.ensure_gl(&mut surface));
        assert!(bridge.ensure_gl(&mut surface));
        assert_eq!(1, surface.gl_loads);
        assert_eq!(1, surface.clears);
    }

    #[test]
    fn engine_is_constructed_on_first_frame() {
        let mut surface = MockSurface {
            size: (640, 480),
            ..Default::default()
        };
        let mut bridge = RenderBridge::new(
            Box::new(MockEngine::default),
            CanvasOptions::default()
                .with_scene("/maps/scene.yaml")
                .with_scene_update(SceneUpdate::new("global.sdk_api_key", "secret")),
        );

        assert!(bridge.ensure_gl(&mut surface));
        assert!(bridge.render_frame(&mut surface, 0.0));

        let engine = bridge.engine().unwrap();
        assert_eq!(
            vec![
                EngineCall::LoadScene {
                    url: "file:///maps/scene.yaml".to_owned(),
                    updates: vec![SceneUpdate::new("global.sdk_api_key", "secret")],
                },
                EngineCall::SetupGl,
                EngineCall::Resize {
                    width: 640,
                    height: 480,
                },
            ],
            engine.calls
        );

        // Construction happens exactly once.
        assert!(bridge.render_frame(&mut surface, 0.016));
        assert_eq!(3, bridge.engine().unwrap().calls.len());
    }

    #[test]
    fn resize_before_engine_construction_is_a_no_op() {
        let mut bridge = bridge();
        bridge.resize(100, 100);
        assert!(bridge.engine().is_none());
    }

    #[test]
    fn resize_is_forwarded_exactly() {
        let mut surface = MockSurface::default();
        let mut bridge = bridge();
        assert!(bridge.ensure_gl(&mut surface));
        assert!(bridge.render_frame(&mut surface, 0.0));

        bridge.resize(123, 321);
        assert_eq!(
            Some(&EngineCall::Resize {
                width: 123,
                height: 321,
            }),
            bridge.engine().unwrap().calls.last()
        );
    }

    #[test]
    fn update_fault_skips_presentation() {
        let mut surface = MockSurface::default();
        let mut bridge = RenderBridge::new(
            Box::new(|| MockEngine {
                fail_update: true,
                ..Default::default()
            }),
            CanvasOptions::default(),
        );
        assert!(bridge.ensure_gl(&mut surface));
        assert!(!bridge.render_frame(&mut surface, 0.016));

        // The fault is contained; a healthy next frame presents again.
        bridge.engine_mut().unwrap().fail_update = false;
        assert!(bridge.render_frame(&mut surface, 0.016));
    }

    #[test]
    fn render_fault_skips_presentation() {
        let mut surface = MockSurface::default();
        let mut bridge = RenderBridge::new(
            Box::new(|| MockEngine {
                fail_render: true,
                ..Default::default()
            }),
            CanvasOptions::default(),
        );
        assert!(bridge.ensure_gl(&mut surface));
        assert!(!bridge.render_frame(&mut surface, 0.016));
        // The time-step still ran.
        assert_eq!(1, bridge.engine().unwrap().updates.len());
    }

    #[test]
    fn hidden_map_still_advances_time() {
        let mut surface = MockSurface::default();
        let mut bridge = bridge();
        assert!(bridge.ensure_gl(&mut surface));
        assert!(bridge.render_frame(&mut surface, 0.0));

        bridge.set_visible(false);
        assert!(bridge.render_frame(&mut surface, 0.016));
        assert!(bridge.render_frame(&mut surface, 0.016));

        let engine = bridge.engine().unwrap();
        assert_eq!(3, engine.updates.len());
        assert_eq!(1, engine.renders);
        assert_eq!(2, surface.depth_clears);
    }

    #[test]
    fn scene_url_resolution() {
        assert_eq!(
            "https://example.com/scene.yaml",
            scene_url("https://example.com/scene.yaml")
        );
        assert_eq!("file:///maps/scene.yaml", scene_url("/maps/scene.yaml"));

        let relative = scene_url("scene.yaml");
        assert!(relative.starts_with("file://"));
        assert!(relative.ends_with("/scene.yaml"));
    }
}
