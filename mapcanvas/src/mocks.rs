//! Hand-written test doubles for the two boundary traits.

use crate::engine::{EngineFault, MapEngine, SceneUpdate};
use crate::surface::{RenderSurface, Rgba};

/// One recorded call into [`MockEngine`]. Gesture coordinates are kept verbatim;
/// the pinch rotation hint is always zero for mouse-driven hosts and is not recorded.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EngineCall {
    LoadScene {
        url: String,
        updates: Vec<SceneUpdate>,
    },
    SetupGl,
    Resize {
        width: u32,
        height: u32,
    },
    Pan {
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    },
    Pinch {
        x: f64,
        y: f64,
        scale: f64,
    },
    Rotate {
        center_x: f64,
        center_y: f64,
        radians: f64,
    },
    Fling {
        x: f64,
        y: f64,
        vx: f64,
        vy: f64,
    },
    SetTilt(f64),
}

#[derive(Debug, Default)]
pub(crate) struct MockEngine {
    pub calls: Vec<EngineCall>,
    pub updates: Vec<f64>,
    pub renders: u32,
    pub tilt: f64,
    pub viewport: (u32, u32),
    pub fail_update: bool,
    pub fail_render: bool,
}

impl MapEngine for MockEngine {
    fn load_scene_async(&mut self, url: &str, updates: &[SceneUpdate]) {
        self.calls.push(EngineCall::LoadScene {
            url: url.to_owned(),
            updates: updates.to_vec(),
        });
    }

    fn setup_gl(&mut self) {
        self.calls.push(EngineCall::SetupGl);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.calls.push(EngineCall::Resize { width, height });
    }

    fn update(&mut self, delta: f64) -> Result<(), EngineFault> {
        if self.fail_update {
            return Err(EngineFault::new("update exploded"));
        }
        self.updates.push(delta);
        Ok(())
    }

    fn render(&mut self) -> Result<(), EngineFault> {
        if self.fail_render {
            return Err(EngineFault::new("render exploded"));
        }
        self.renders += 1;
        Ok(())
    }

    fn handle_pan_gesture(&mut self, start_x: f64, start_y: f64, end_x: f64, end_y: f64) {
        self.calls.push(EngineCall::Pan {
            start_x,
            start_y,
            end_x,
            end_y,
        });
    }

    fn handle_pinch_gesture(&mut self, x: f64, y: f64, scale: f64, _rotation_hint: f64) {
        self.calls.push(EngineCall::Pinch { x, y, scale });
    }

    fn handle_rotate_gesture(&mut self, center_x: f64, center_y: f64, radians: f64) {
        self.calls.push(EngineCall::Rotate {
            center_x,
            center_y,
            radians,
        });
    }

    fn handle_fling_gesture(&mut self, x: f64, y: f64, velocity_x: f64, velocity_y: f64) {
        self.calls.push(EngineCall::Fling {
            x,
            y,
            vx: velocity_x,
            vy: velocity_y,
        });
    }

    fn tilt(&self) -> f64 {
        self.tilt
    }

    fn set_tilt(&mut self, radians: f64) {
        self.tilt = radians;
        self.calls.push(EngineCall::SetTilt(radians));
    }

    fn viewport_width(&self) -> u32 {
        self.viewport.0
    }

    fn viewport_height(&self) -> u32 {
        self.viewport.1
    }
}

#[derive(Debug)]
pub(crate) struct MockSurface {
    pub size: (u32, u32),
    pub density: f64,
    pub fail_make_current: bool,
    pub fail_gl_load: bool,
    pub gl_loads: u32,
    pub swaps: u32,
    pub clears: u32,
    pub depth_clears: u32,
    pub viewports: Vec<(u32, u32)>,
}

impl Default for MockSurface {
    fn default() -> Self {
        Self {
            size: (800, 600),
            density: 1.0,
            fail_make_current: false,
            fail_gl_load: false,
            gl_loads: 0,
            swaps: 0,
            clears: 0,
            depth_clears: 0,
            viewports: Vec::new(),
        }
    }
}

impl RenderSurface for MockSurface {
    fn make_current(&mut self) -> bool {
        !self.fail_make_current
    }

    fn load_gl(&mut self) -> bool {
        if self.fail_gl_load {
            return false;
        }
        self.gl_loads += 1;
        true
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn pixel_density(&self) -> f64 {
        self.density
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewports.push((width, height));
    }

    fn clear(&mut self, _color: Rgba) {
        self.clears += 1;
    }

    fn clear_color_and_depth(&mut self) {
        self.depth_clears += 1;
    }
}
