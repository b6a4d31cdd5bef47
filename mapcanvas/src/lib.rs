#![doc = include_str!("../README.md")]
#![deny(clippy::unwrap_used, rustdoc::broken_intra_doc_links)]

mod bridge;
mod canvas;
mod engine;
mod gestures;
mod input;
#[cfg(test)]
mod mocks;
mod scheduler;
mod surface;

pub use bridge::CanvasOptions;
pub use canvas::MapCanvas;
pub use engine::{EngineFault, MapEngine, SceneUpdate};
pub use input::{HeldButtons, InputEvent, PointerButton};
pub use scheduler::{FrameOutcome, FrameScheduler};
pub use surface::{RenderSurface, Rgba};
