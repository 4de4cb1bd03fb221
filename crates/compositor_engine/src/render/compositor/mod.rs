//! Frame compositor
//!
//! The ordered multi-pass draw that produces one displayed frame:
//!
//! ```text
//! per jitter sample:
//!   axes ─> surface (lit) ─> mark surface in stencil ─> restrict to mark
//!     ─> reflection (mirrored, translucent) ─> shadow (flattened, dark)
//!   ─> release ─> scene (direct)
//! ```
//!
//! Every pass borrows the backend through a guard that restores the
//! pipeline state, the light and the matrix stack when it ends.

pub mod accumulator;
pub mod direct;
pub mod jitter;
pub mod mask;
pub mod params;
pub mod reflection;
pub mod scope;
pub mod shadow;

pub use accumulator::{jittered_view, JitteredAccumulator};
pub use direct::DirectPass;
pub use jitter::{JitterSample, JitterTable, SUPPORTED_COUNTS};
pub use mask::{MarkedRegion, RestrictedRegion, VisibilityMask};
pub use params::CompositorParams;
pub use reflection::ReflectionPass;
pub use scope::PassScope;
pub use shadow::{compute_shadow_matrix, derive_plane, Plane, ShadowPass};

use crate::foundation::math::Vec3;
use crate::render::api::{BackendResult, RenderBackend};
use crate::render::lighting::Light;
use crate::render::primitives::Camera;
use crate::render::RenderResult;
use crate::scene::{AxisGizmo, ReceivingSurface, RenderableInstance};

/// Draw each instance, optionally scaling its material alpha
pub(crate) fn draw_instances<B: RenderBackend>(
    backend: &mut B,
    instances: &[RenderableInstance],
    alpha_scale: Option<f32>,
) -> BackendResult<()> {
    for instance in instances {
        match alpha_scale {
            Some(scale) => {
                let faded = instance.material.with_alpha(instance.material.alpha() * scale);
                backend.draw_mesh(&instance.mesh, &instance.transform, &faded)?;
            }
            None => backend.draw_mesh(&instance.mesh, &instance.transform, &instance.material)?,
        }
    }
    Ok(())
}

/// All passes plus the parameters they read
#[derive(Debug, Clone)]
pub struct FrameCompositor {
    /// Live parameters
    pub params: CompositorParams,

    /// Sample loop
    pub accumulator: JitteredAccumulator,

    /// Stencil tagging
    pub mask: VisibilityMask,

    /// Mirrored scene
    pub reflection: ReflectionPass,

    /// Projected shadow
    pub shadow: ShadowPass,

    /// Axis, surface and scene draws
    pub direct: DirectPass,

    /// Axis arrows drawn first in every sub-frame; `None` hides them
    pub axes: Option<AxisGizmo>,

    /// Scene light, in world space
    pub light: Light,

    /// Color the frame buffer starts from
    pub clear_color: [f32; 4],
}

impl Default for FrameCompositor {
    fn default() -> Self {
        Self {
            params: CompositorParams::default(),
            accumulator: JitteredAccumulator::default(),
            mask: VisibilityMask::default(),
            reflection: ReflectionPass::default(),
            shadow: ShadowPass::default(),
            direct: DirectPass,
            axes: Some(AxisGizmo::default()),
            light: Light::point(Vec3::new(15.0, 15.0, 15.0)),
            clear_color: [0.2, 0.2, 0.2, 1.0],
        }
    }
}

impl FrameCompositor {
    /// Run every pass once against the view already installed on `backend`
    pub fn draw_pass_sequence<B: RenderBackend>(
        &self,
        backend: &mut B,
        surface: &ReceivingSurface,
        instances: &[RenderableInstance],
    ) -> BackendResult<()> {
        backend.set_light(self.light);
        let shadow_matrix = compute_shadow_matrix(surface.plane(), &self.light.position);

        if let Some(axes) = &self.axes {
            self.direct.draw_axes(backend, axes)?;
        }
        self.direct.draw_surface(backend, surface)?;

        let mut region = self.mask.mark(backend, surface.tiles())?.restrict_to_marked();
        self.reflection.draw(&mut region, instances, surface.plane())?;
        self.shadow.draw(&mut region, instances, &shadow_matrix)?;
        region.release();

        self.direct.draw_scene(backend, instances)
    }

    /// Render one displayed frame through the accumulation loop
    pub fn render_frame<B: RenderBackend>(
        &self,
        backend: &mut B,
        camera: &Camera,
        surface: &ReceivingSurface,
        instances: &[RenderableInstance],
    ) -> RenderResult<()> {
        let table = self.params.jitter_table()?;
        backend.set_clear_color(self.clear_color);
        self.accumulator.render(
            backend,
            camera,
            &table,
            self.params.dof_radius(),
            self.params.focus_depth(),
            |b| self.draw_pass_sequence(b, surface, instances),
        )
    }
}
