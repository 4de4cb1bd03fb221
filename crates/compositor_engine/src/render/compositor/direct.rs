//! Unmirrored draws: the axis gizmo, the receiving surface and the scene itself

use crate::render::api::{BackendResult, RenderBackend};
use crate::scene::{AxisGizmo, ReceivingSurface, RenderableInstance};

use super::draw_instances;

/// Plain lit draws with whatever state the caller left in place
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectPass;

impl DirectPass {
    /// Draw the axis arrows lit and depth tested, ahead of everything else
    pub fn draw_axes<B: RenderBackend>(&self, backend: &mut B, axes: &AxisGizmo) -> BackendResult<()> {
        draw_instances(backend, axes.instances(), None)
    }

    /// Draw the floor tiles lit, filling depth so later passes sit on top
    pub fn draw_surface<B: RenderBackend>(
        &self,
        backend: &mut B,
        surface: &ReceivingSurface,
    ) -> BackendResult<()> {
        draw_instances(backend, surface.tiles(), None)
    }

    /// Draw the scene objects at their true positions
    pub fn draw_scene<B: RenderBackend>(
        &self,
        backend: &mut B,
        instances: &[RenderableInstance],
    ) -> BackendResult<()> {
        draw_instances(backend, instances, None)
    }
}
