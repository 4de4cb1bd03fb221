//! Mirrored scene drawn inside the receiving surface

use crate::render::api::{BackendResult, RenderBackend};
use crate::scene::RenderableInstance;

use super::mask::RestrictedRegion;
use super::scope::PassScope;
use super::shadow::Plane;
use super::draw_instances;

/// Draws the scene reflected across the receiving plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflectionPass {
    /// Multiplier on material alpha; 1.0 is a perfect mirror
    pub opacity: f32,
}

impl Default for ReflectionPass {
    fn default() -> Self {
        Self { opacity: 0.1 }
    }
}

impl ReflectionPass {
    /// Reflection with the given opacity, clamped to [0, 1]
    pub fn new(opacity: f32) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Draw `instances` mirrored across `plane`
    ///
    /// Depth testing is off for the whole pass so the reflection is never
    /// hidden by the surface it lies under. The light is mirrored with the
    /// geometry and culling is inverted since the mirror flips winding.
    pub fn draw<B: RenderBackend>(
        &self,
        region: &mut RestrictedRegion<'_, B>,
        instances: &[RenderableInstance],
        plane: &Plane,
    ) -> BackendResult<()> {
        let Some(mirror) = plane.reflection_matrix() else {
            log::warn!("Receiving plane has a zero normal; skipping reflection");
            return Ok(());
        };

        let mut scope = PassScope::begin(&mut **region);
        scope.update_pipeline(|s| {
            s.depth_test = false;
            s.cull_mode = s.cull_mode.inverted();
        });
        let mirrored_light = scope.light().transformed(&mirror);
        scope.set_light(mirrored_light);
        scope.multiply_matrix(&mirror);

        draw_instances(&mut *scope, instances, Some(self.opacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use approx::assert_relative_eq;

    use crate::foundation::math::{Mat4, Vec3, Vec4};
    use crate::render::api::recording::RecordingBackend;
    use crate::render::compositor::mask::VisibilityMask;
    use crate::render::compositor::shadow::derive_plane;
    use crate::render::lighting::Light;
    use crate::render::material::presets;
    use crate::render::pipeline::CullMode;
    use crate::render::primitives::Mesh;

    fn floor() -> Plane {
        derive_plane(
            &Vec3::new(-1.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, -1.0),
        )
    }

    #[test]
    fn test_reflection_mirrors_geometry_and_light() {
        let mut backend = RecordingBackend::new();
        backend.set_light(Light::point(Vec3::new(15.0, 15.0, 15.0)));
        let instances = vec![RenderableInstance::new(
            Rc::new(Mesh::cube(0.4)),
            Mat4::new_translation(&Vec3::new(-6.0, 0.4, -3.0)),
            presets::EMERALD,
        )];
        let state_before = backend.pipeline_state();

        {
            let mut region = VisibilityMask::default()
                .mark(&mut backend, &[])
                .unwrap()
                .restrict_to_marked();
            ReflectionPass::default().draw(&mut region, &instances, &floor()).unwrap();
        }

        let (state, model, light, alpha) = backend.draws().last().unwrap();
        assert!(!state.depth_test);
        assert_eq!(state.cull_mode, CullMode::Front);
        assert!(state.stencil.enabled);
        assert_relative_eq!(light.position, Vec4::new(15.0, -15.0, 15.0, 1.0), epsilon = 1e-5);
        assert_relative_eq!(alpha, 0.1, epsilon = 1e-6);

        let origin = model * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(origin, Vec4::new(-6.0, -0.4, -3.0, 1.0), epsilon = 1e-5);

        assert_eq!(backend.light().position, Vec4::new(15.0, 15.0, 15.0, 1.0));
        assert_eq!(backend.pipeline_state(), state_before);
        assert_eq!(backend.stack_depth(), 1);
    }

    #[test]
    fn test_degenerate_plane_draws_nothing() {
        let mut backend = RecordingBackend::new();
        let instances = vec![RenderableInstance::new(
            Rc::new(Mesh::cube(0.4)),
            Mat4::identity(),
            presets::RUBY,
        )];
        {
            let mut region = VisibilityMask::default()
                .mark(&mut backend, &[])
                .unwrap()
                .restrict_to_marked();
            ReflectionPass::default()
                .draw(&mut region, &instances, &Plane::new(0.0, 0.0, 0.0, 0.0))
                .unwrap();
        }
        assert_eq!(backend.draws().count(), 0);
    }
}
