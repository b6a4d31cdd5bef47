//! Headless demonstration host.
//!
//! Wires a [`MapCanvas`] to stand-in implementations of both boundaries: a surface that
//! only counts presents, and an engine that tracks its camera instead of drawing. A
//! scripted pointer session then drives the whole pipeline. Run with
//! `RUST_LOG=debug cargo run -p demo` to watch the bring-up and the gesture traffic.

use std::time::Duration;

use mapcanvas::{
    CanvasOptions, EngineFault, FrameOutcome, HeldButtons, InputEvent, MapCanvas, MapEngine,
    PointerButton, RenderSurface, Rgba, SceneUpdate,
};

/// A surface with no window behind it.
struct HeadlessSurface {
    size: (u32, u32),
    presented: u32,
}

impl RenderSurface for HeadlessSurface {
    fn make_current(&mut self) -> bool {
        true
    }

    fn load_gl(&mut self) -> bool {
        true
    }

    fn swap_buffers(&mut self) {
        self.presented += 1;
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn pixel_density(&self) -> f64 {
        1.25
    }

    fn set_viewport(&mut self, _width: u32, _height: u32) {}

    fn clear(&mut self, _color: Rgba) {}

    fn clear_color_and_depth(&mut self) {}
}

/// Tracks the camera state a real engine would render with.
#[derive(Default)]
struct CameraEngine {
    viewport: (u32, u32),
    offset: (f64, f64),
    scale: f64,
    rotation: f64,
    tilt: f64,
    elapsed: f64,
}

impl MapEngine for CameraEngine {
    fn load_scene_async(&mut self, url: &str, updates: &[SceneUpdate]) {
        log::info!("Loading scene from {url} with {} update(s).", updates.len());
    }

    fn setup_gl(&mut self) {
        self.scale = 1.0;
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::info!("Engine resized to {width}x{height}.");
        self.viewport = (width, height);
    }

    fn update(&mut self, delta: f64) -> Result<(), EngineFault> {
        self.elapsed += delta;
        Ok(())
    }

    fn render(&mut self) -> Result<(), EngineFault> {
        Ok(())
    }

    fn handle_pan_gesture(&mut self, start_x: f64, start_y: f64, end_x: f64, end_y: f64) {
        self.offset.0 += end_x - start_x;
        self.offset.1 += end_y - start_y;
    }

    fn handle_pinch_gesture(&mut self, _x: f64, _y: f64, scale: f64, _rotation_hint: f64) {
        self.scale *= scale;
    }

    fn handle_rotate_gesture(&mut self, _center_x: f64, _center_y: f64, radians: f64) {
        self.rotation += radians;
    }

    fn handle_fling_gesture(&mut self, _x: f64, _y: f64, velocity_x: f64, velocity_y: f64) {
        log::info!("Fling with velocity ({velocity_x:.0}, {velocity_y:.0}).");
    }

    fn tilt(&self) -> f64 {
        self.tilt
    }

    fn set_tilt(&mut self, radians: f64) {
        self.tilt = radians;
    }

    fn viewport_width(&self) -> u32 {
        self.viewport.0
    }

    fn viewport_height(&self) -> u32 {
        self.viewport.1
    }
}

/// One host paint signal, 16 ms after the previous one.
fn tick(canvas: &mut MapCanvas<CameraEngine, HeadlessSurface>, clock: &mut Duration) {
    *clock += Duration::from_millis(16);
    if canvas.redraw(*clock) == FrameOutcome::Disabled {
        log::warn!("Redraw attempted after close.");
    }
}

fn main() {
    env_logger::init();

    let mut canvas = MapCanvas::new(
        HeadlessSurface {
            size: (800, 600),
            presented: 0,
        },
        CameraEngine::default,
        CanvasOptions::default()
            .with_scene("scenes/bubble-wrap.yaml")
            .with_scene_update(SceneUpdate::new("global.sdk_api_key", "demo-key")),
    );

    let mut clock = Duration::ZERO;

    // First frame brings GL and the engine up.
    tick(&mut canvas, &mut clock);

    // Drag the map towards the lower right, then release into a fling.
    canvas.handle_input(
        InputEvent::PointerPressed {
            button: PointerButton::Primary,
            x: 200.0,
            y: 150.0,
        },
        clock,
    );
    for step in 0..20 {
        let (x, y) = (200.0 + f64::from(step) * 8.0, 150.0 + f64::from(step) * 5.0);
        canvas.handle_input(
            InputEvent::PointerMoved {
                x,
                y,
                held: HeldButtons {
                    primary: true,
                    ..Default::default()
                },
            },
            clock,
        );
        tick(&mut canvas, &mut clock);
    }
    canvas.handle_input(
        InputEvent::PointerReleased {
            button: PointerButton::Primary,
            x: 352.0,
            y: 245.0,
        },
        clock,
    );

    // Zoom in three wheel clicks.
    for _ in 0..3 {
        canvas.handle_input(
            InputEvent::Wheel {
                x: 400.0,
                y: 300.0,
                rotation: 120,
                click_delta: 120,
            },
            clock,
        );
        tick(&mut canvas, &mut clock);
    }

    // Rotate and tilt with a secondary-button drag.
    for step in 0..10 {
        canvas.handle_input(
            InputEvent::PointerMoved {
                x: 400.0 + f64::from(step) * 4.0,
                y: 300.0 - f64::from(step) * 6.0,
                held: HeldButtons {
                    secondary: true,
                    ..Default::default()
                },
            },
            clock,
        );
        tick(&mut canvas, &mut clock);
    }

    // The window grows, then the host shuts down.
    canvas.surface_mut().size = (1280, 720);
    canvas.resized();
    tick(&mut canvas, &mut clock);
    canvas.close();
    tick(&mut canvas, &mut clock);

    if let Some(engine) = canvas.engine() {
        log::info!(
            "Final camera: offset ({:.1}, {:.1}), scale {:.2}, rotation {:.3} rad, \
             tilt {:.3} rad, {:.2}s simulated.",
            engine.offset.0,
            engine.offset.1,
            engine.scale,
            engine.rotation,
            engine.tilt,
            engine.elapsed,
        );
    }
    log::info!(
        "Presented {} frame(s).",
        canvas.surface().presented
    );
}
