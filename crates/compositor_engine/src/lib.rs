//! # Compositor Engine
//!
//! A fixed-function frame compositor: a scene drawn over a receiving floor
//! with a stencil-confined planar reflection, a matrix-projected planar
//! shadow, and depth of field from jittered accumulation, stepped at a fixed
//! rate.
//!
//! ## Features
//!
//! - **Frame Compositor**: stencil mask, reflection, shadow and direct passes
//!   with scoped pipeline-state restoration
//! - **Jittered Accumulation**: 1, 2, 3, 4 or 8 samples giving anti-aliasing
//!   and depth of field
//! - **Software Device**: a CPU rasterizer with depth, stencil, blending and
//!   an accumulation buffer behind the `RenderBackend` trait
//! - **Fixed-Timestep Pacing**: run, pause and single-step
//! - **Camera Control**: zoom, pan, clamp and reset
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use compositor_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CompositorConfig::default();
//!     let mut device = SoftwareDevice::new(config.viewport.width, config.viewport.height)?;
//!     let compositor = config.compositor()?;
//!     let surface = config.surface();
//!     let mut scene = ShowcaseScene::new();
//!     let mut pacer = config.pacer();
//!
//!     pacer.tick(&mut scene);
//!     compositor.render_frame(&mut device, &config.camera(), &surface, scene.current_instances())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::Config,
        core::{CompositorConfig, FramePacer},
        foundation::math::{Mat4, Mat4Ext, Vec3, Vec4},
        input::{CameraController, CameraState, DragTracker, InputEvent, KeyCode, MouseButton},
        render::{
            capture, Camera, CompositorParams, FrameCompositor, Light, Material, Mesh, Plane, RenderBackend,
            RenderError, RenderResult, SoftwareDevice,
        },
        scene::{GeometryProvider, ReceivingSurface, RenderableInstance, ShowcaseScene},
    };
}
