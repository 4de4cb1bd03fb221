//! Scoped pipeline state
//!
//! `PassScope` snapshots the pipeline state and the light, and pushes the
//! model matrix stack. Dropping it undoes all three, on every exit path
//! including `?` returns from the middle of a pass.

use std::ops::{Deref, DerefMut};

use crate::render::api::RenderBackend;
use crate::render::lighting::Light;
use crate::render::pipeline::PipelineState;

/// Guard restoring pipeline state, light and matrix stack on drop
pub struct PassScope<'a, B: RenderBackend> {
    backend: &'a mut B,
    saved_state: PipelineState,
    saved_light: Light,
}

impl<'a, B: RenderBackend> PassScope<'a, B> {
    /// Enter a pass: remember the current state and push the matrix stack
    pub fn begin(backend: &'a mut B) -> Self {
        let saved_state = backend.pipeline_state();
        let saved_light = backend.light();
        backend.push_matrix();
        Self {
            backend,
            saved_state,
            saved_light,
        }
    }
}

impl<B: RenderBackend> Deref for PassScope<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        &*self.backend
    }
}

impl<B: RenderBackend> DerefMut for PassScope<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut *self.backend
    }
}

impl<B: RenderBackend> Drop for PassScope<'_, B> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.pop_matrix() {
            log::error!("Pass scope could not restore the matrix stack: {}", e);
        }
        self.backend.set_light(self.saved_light);
        self.backend.set_pipeline_state(self.saved_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Vec3};
    use crate::render::api::recording::RecordingBackend;
    use crate::render::api::BackendResult;
    use crate::render::pipeline::CullMode;
    use crate::render::RenderError;

    fn failing_pass(backend: &mut RecordingBackend) -> BackendResult<()> {
        let mut scope = PassScope::begin(backend);
        scope.update_pipeline(|s| {
            s.lighting = false;
            s.cull_mode = CullMode::Front;
        });
        scope.multiply_matrix(&Mat4::new_scaling(3.0));
        scope.set_light(Light::point(Vec3::new(1.0, -1.0, 1.0)));
        Err(RenderError::BufferAllocation("simulated".into()))
    }

    #[test]
    fn test_state_restored_on_early_return() {
        let mut backend = RecordingBackend::new();
        let state_before = backend.pipeline_state();
        let light_before = backend.light();

        assert!(failing_pass(&mut backend).is_err());

        assert_eq!(backend.pipeline_state(), state_before);
        assert_eq!(backend.light(), light_before);
        assert_eq!(backend.current_matrix(), Mat4::identity());
        assert_eq!(backend.stack_depth(), 1);
    }

    #[test]
    fn test_nested_scopes_unwind_in_order() {
        let mut backend = RecordingBackend::new();
        {
            let mut outer = PassScope::begin(&mut backend);
            outer.multiply_matrix(&Mat4::new_scaling(2.0));
            {
                let mut inner = PassScope::begin(&mut *outer);
                inner.multiply_matrix(&Mat4::new_scaling(5.0));
                assert_eq!(inner.current_matrix(), Mat4::new_scaling(10.0));
            }
            assert_eq!(outer.current_matrix(), Mat4::new_scaling(2.0));
        }
        assert_eq!(backend.current_matrix(), Mat4::identity());
    }
}
