//! Stencil visibility mask
//!
//! Confines the reflection and the shadow to the screen footprint of the
//! receiving surface. The three steps are encoded as types so they cannot be
//! reordered:
//!
//! ```text
//! VisibilityMask::mark ──> MarkedRegion ──restrict_to_marked──> RestrictedRegion ──release/drop
//! ```
//!
//! Both region types put back the stencil state found on entry when dropped,
//! which turns the stencil test off again.

use std::ops::{Deref, DerefMut};

use crate::render::api::{BackendResult, RenderBackend};
use crate::render::pipeline::{CompareFunc, StencilOp, StencilState};
use crate::scene::RenderableInstance;

use super::draw_instances;

/// Stencil tagging configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityMask {
    /// Value written into tagged pixels
    pub reference: u8,
}

impl Default for VisibilityMask {
    fn default() -> Self {
        Self { reference: 1 }
    }
}

impl VisibilityMask {
    /// Tag every pixel covered by `surface`
    ///
    /// The surface is drawn with color writes and depth testing off, and the
    /// stencil set to ALWAYS / REPLACE on every outcome. Color writes and
    /// depth testing are put back afterwards; the stencil test stays on until
    /// the returned region is released.
    pub fn mark<'a, B: RenderBackend>(
        &self,
        backend: &'a mut B,
        surface: &[RenderableInstance],
    ) -> BackendResult<MarkedRegion<'a, B>> {
        let entry = backend.pipeline_state();
        let reference = self.reference;
        let guard = StencilGuard {
            backend,
            entry: entry.stencil,
        };
        guard.backend.update_pipeline(|s| {
            s.color_write = false;
            s.depth_test = false;
            s.stencil = StencilState {
                enabled: true,
                func: CompareFunc::Always,
                reference,
                mask: 0xff,
                fail: StencilOp::Replace,
                depth_fail: StencilOp::Replace,
                pass: StencilOp::Replace,
            };
        });

        let drawn = draw_instances(&mut *guard.backend, surface, None);
        guard.backend.update_pipeline(|s| {
            s.color_write = entry.color_write;
            s.depth_test = entry.depth_test;
        });
        drawn?;

        log::trace!("Marked {} surface pieces with stencil {}", surface.len(), reference);
        Ok(MarkedRegion {
            guard,
            reference,
        })
    }
}

/// Restores the entry stencil state when dropped
struct StencilGuard<'a, B: RenderBackend> {
    backend: &'a mut B,
    entry: StencilState,
}

impl<B: RenderBackend> Drop for StencilGuard<'_, B> {
    fn drop(&mut self) {
        let entry = self.entry;
        self.backend.update_pipeline(|s| s.stencil = entry);
    }
}

/// Surface pixels are tagged; drawing is not yet restricted
pub struct MarkedRegion<'a, B: RenderBackend> {
    guard: StencilGuard<'a, B>,
    reference: u8,
}

impl<'a, B: RenderBackend> MarkedRegion<'a, B> {
    /// Pass only where the stencil equals the tag, keeping it on every outcome
    pub fn restrict_to_marked(self) -> RestrictedRegion<'a, B> {
        let MarkedRegion { guard, reference } = self;
        guard.backend.update_pipeline(|s| {
            s.stencil = StencilState {
                enabled: true,
                func: CompareFunc::Equal,
                reference,
                mask: 0xff,
                fail: StencilOp::Keep,
                depth_fail: StencilOp::Keep,
                pass: StencilOp::Keep,
            };
        });
        RestrictedRegion { guard }
    }
}

/// Draws through this region land only on the tagged pixels
pub struct RestrictedRegion<'a, B: RenderBackend> {
    guard: StencilGuard<'a, B>,
}

impl<B: RenderBackend> RestrictedRegion<'_, B> {
    /// Turn the stencil test off; unconstrained drawing resumes
    pub fn release(self) {
        log::trace!("Releasing stencil restriction");
    }
}

impl<B: RenderBackend> Deref for RestrictedRegion<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        &*self.guard.backend
    }
}

impl<B: RenderBackend> DerefMut for RestrictedRegion<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut *self.guard.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::foundation::math::Mat4;
    use crate::render::api::recording::RecordingBackend;
    use crate::render::material::presets;
    use crate::render::pipeline::PipelineState;
    use crate::render::primitives::Mesh;

    fn surface() -> Vec<RenderableInstance> {
        vec![RenderableInstance::new(
            Rc::new(Mesh::checkerboard(1.0, 1.0, 2, 2, 0)),
            Mat4::identity(),
            presets::WHITE,
        )]
    }

    #[test]
    fn test_mark_draws_without_color_or_depth() {
        let mut backend = RecordingBackend::new();
        let region = VisibilityMask::default().mark(&mut backend, &surface()).unwrap();
        drop(region);

        let (state, ..) = backend.draws().next().unwrap();
        assert!(!state.color_write);
        assert!(!state.depth_test);
        assert!(state.stencil.enabled);
        assert_eq!(state.stencil.func, CompareFunc::Always);
        assert_eq!(state.stencil.reference, 1);
        assert_eq!(state.stencil.pass, StencilOp::Replace);
        assert_eq!(state.stencil.depth_fail, StencilOp::Replace);
        assert_eq!(state.stencil.fail, StencilOp::Replace);
    }

    #[test]
    fn test_restrict_then_release() {
        let mut backend = RecordingBackend::new();
        let region = VisibilityMask::default()
            .mark(&mut backend, &surface())
            .unwrap()
            .restrict_to_marked();

        let inside = region.pipeline_state();
        assert!(inside.color_write);
        assert!(inside.depth_test);
        assert!(inside.stencil.enabled);
        assert_eq!(inside.stencil.func, CompareFunc::Equal);
        assert_eq!(inside.stencil.pass, StencilOp::Keep);

        region.release();
        assert_eq!(backend.pipeline_state(), PipelineState::default());
    }

    #[test]
    fn test_dropping_marked_region_disables_stencil() {
        let mut backend = RecordingBackend::new();
        {
            let _marked = VisibilityMask::default().mark(&mut backend, &surface()).unwrap();
        }
        assert!(!backend.pipeline_state().stencil.enabled);
    }
}
