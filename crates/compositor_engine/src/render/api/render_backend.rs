//! Backend abstraction traits for the rendering system
//!
//! The compositor drives a fixed-function device: a pipeline state, a model
//! matrix stack on top of a view/projection pair, one light, and color,
//! depth, stencil and accumulation buffers. Any backend that implements
//! `RenderBackend` can run the compositor passes.

use bitflags::bitflags;

use crate::foundation::math::Mat4;
use crate::render::api::frame_data::{ColorSnapshot, DepthSnapshot};
use crate::render::lighting::Light;
use crate::render::material::Material;
use crate::render::pipeline::PipelineState;
use crate::render::primitives::Mesh;
use crate::render::RenderError;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

bitflags! {
    /// Buffers affected by a clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u8 {
        /// Color buffer, to the clear color
        const COLOR = 1 << 0;
        /// Depth buffer, to 1.0
        const DEPTH = 1 << 1;
        /// Stencil buffer, to 0
        const STENCIL = 1 << 2;
        /// Accumulation buffer, to transparent black
        const ACCUM = 1 << 3;
        /// Everything a sub-frame starts from
        const FRAME = Self::COLOR.bits() | Self::DEPTH.bits() | Self::STENCIL.bits();
    }
}

/// Main rendering backend trait
///
/// The state-setting methods are infallible; only operations that can run out
/// of resources or be called out of order return `BackendResult`.
pub trait RenderBackend {
    /// Framebuffer extent (width, height)
    fn extent(&self) -> (u32, u32);

    /// Set the color the color buffer is cleared to
    fn set_clear_color(&mut self, color: [f32; 4]);

    /// Clear the selected buffers
    fn clear(&mut self, flags: ClearFlags);

    /// Current pipeline state
    fn pipeline_state(&self) -> PipelineState;

    /// Replace the pipeline state for subsequent draws
    fn set_pipeline_state(&mut self, state: PipelineState);

    /// Set the camera matrices
    fn set_view_projection(&mut self, view: Mat4, projection: Mat4);

    /// Current view matrix
    fn view_matrix(&self) -> Mat4;

    /// Duplicate the top of the model matrix stack
    fn push_matrix(&mut self);

    /// Discard the top of the model matrix stack
    ///
    /// Fails with `MatrixStackUnderflow` when only the base entry is left.
    fn pop_matrix(&mut self) -> BackendResult<()>;

    /// Post-multiply the top of the model matrix stack
    fn multiply_matrix(&mut self, matrix: &Mat4);

    /// Top of the model matrix stack
    fn current_matrix(&self) -> Mat4;

    /// Current light, in world space
    fn light(&self) -> Light;

    /// Replace the light
    fn set_light(&mut self, light: Light);

    /// Draw a mesh with `current_matrix() * transform` as its model matrix
    fn draw_mesh(&mut self, mesh: &Mesh, transform: &Mat4, material: &Material) -> BackendResult<()>;

    /// `accum += weight * color`
    fn accumulate(&mut self, weight: f32);

    /// `color = scale * accum`
    fn resolve_accumulation(&mut self, scale: f32);

    /// Read back the color buffer
    fn color_snapshot(&self) -> ColorSnapshot;

    /// Read back the depth buffer
    fn depth_snapshot(&self) -> DepthSnapshot;

    /// Modify the pipeline state in place
    fn update_pipeline<F>(&mut self, update: F)
    where
        Self: Sized,
        F: FnOnce(&mut PipelineState),
    {
        let mut state = self.pipeline_state();
        update(&mut state);
        self.set_pipeline_state(state);
    }
}
