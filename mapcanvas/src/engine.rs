//! The boundary behind which the embedded map renderer lives.

/// A path-value override applied to the scene when it is loaded, e.g. an API key the
/// scene's data sources require.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneUpdate {
    pub path: String,
    pub value: String,
}

impl SceneUpdate {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

/// Fault reported by the engine during a time-step update or a draw. Faults are contained
/// at the render boundary; the frame is skipped and the next one attempted normally.
#[derive(thiserror::Error, Debug)]
#[error("map engine fault: {0}")]
pub struct EngineFault(String);

impl EngineFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The embedded map renderer.
///
/// Everything this crate does ends up as calls through this trait: camera gestures from
/// [`crate::InputEvent`]s, and the per-frame update/render pair. Implementations wrap
/// whatever engine the application embeds; all coordinates are in the engine's logical
/// pixel space (already density-scaled by the caller).
///
/// Construction is the host's business (engines typically take a platform adapter), which
/// is why [`crate::MapCanvas::new`] takes a constructor closure rather than an instance:
/// it must not run before a GL context exists.
pub trait MapEngine {
    /// Start loading the scene from `url`, applying `updates` on top of it. Loading
    /// happens asynchronously inside the engine and is not synchronized with here.
    fn load_scene_async(&mut self, url: &str, updates: &[SceneUpdate]);

    /// Allocate the engine's GPU resources. Requires a current GL context.
    fn setup_gl(&mut self);

    fn resize(&mut self, width: u32, height: u32);

    /// Advance animations and inertial movement by `delta` seconds.
    fn update(&mut self, delta: f64) -> Result<(), EngineFault>;

    /// Draw the current frame into the bound framebuffer.
    fn render(&mut self) -> Result<(), EngineFault>;

    /// Move the camera by the displacement between two points.
    fn handle_pan_gesture(&mut self, start_x: f64, start_y: f64, end_x: f64, end_y: f64);

    /// Zoom by `scale` around the given point. `rotation_hint` carries the rotation of a
    /// two-finger pinch; mouse-driven hosts pass `0.0`.
    fn handle_pinch_gesture(&mut self, x: f64, y: f64, scale: f64, rotation_hint: f64);

    /// Rotate the camera by `radians` around the given point.
    fn handle_rotate_gesture(&mut self, center_x: f64, center_y: f64, radians: f64);

    /// Start an inertial pan from the given point with the given velocity, in logical
    /// pixels per second.
    fn handle_fling_gesture(&mut self, x: f64, y: f64, velocity_x: f64, velocity_y: f64);

    /// Camera tilt in radians, `0.0` meaning straight down.
    fn tilt(&self) -> f64;

    fn set_tilt(&mut self, radians: f64);

    fn viewport_width(&self) -> u32;

    fn viewport_height(&self) -> u32;
}
