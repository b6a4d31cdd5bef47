//! The boundary behind which the host windowing toolkit lives.

/// RGBA color with components in the `0.0..=1.0` range.
pub type Rgba = [f32; 4];

/// A GL-backed drawing surface provided by the host toolkit.
///
/// The canvas never assumes exclusive ownership of the GL context; it may be shared with
/// sibling surfaces in the same process, which is why the viewport is reset on every
/// frame rather than once.
pub trait RenderSurface {
    /// Make this surface's GL context current on the calling thread. Returns `false` if
    /// the context cannot be activated, in which case the frame is skipped.
    fn make_current(&mut self) -> bool;

    /// Load the platform's GL function table. Called once after the context first becomes
    /// current; returns `false` on failure, in which case it is retried on the next
    /// frame. Implementations that need no explicit loading just return `true`.
    fn load_gl(&mut self) -> bool;

    /// Present the back buffer.
    fn swap_buffers(&mut self);

    /// Current surface size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Ratio between physical input-device pixels and the engine's logical pixel space.
    fn pixel_density(&self) -> f64;

    /// Set the GL viewport to the given size.
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clear the color buffer with the given color.
    fn clear(&mut self, color: Rgba);

    /// Clear the color and depth buffers, keeping the current clear color.
    fn clear_color_and_depth(&mut self);
}
