//! Jittered accumulation
//!
//! Each frame is rendered K times from slightly displaced eyes that all look
//! through the same point on the focal plane `z = focus`, and the sub-frames
//! are averaged in the accumulation buffer. Geometry on the focal plane stays
//! sharp; everything else blurs in proportion to its distance from it.
//!
//! ```text
//! clear ACCUM
//! for each sample:  clear FRAME ─> jittered view ─> passes ─> accum += color / K
//! color = accum
//! ```

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::render::api::{BackendResult, ClearFlags, RenderBackend};
use crate::render::primitives::Camera;

use super::jitter::{JitterSample, JitterTable};

/// Lower bound on the eye displacement scale
const MIN_EYE_SCALE: f32 = 0.1;

/// Eye and target for one jitter sample
///
/// With `s = (eye.z - focus) / eye.z` the eye moves by
/// `dof * jitter * max(s, 0.1)` in x and y, the target is pulled onto the
/// focal plane and its height rescaled by `s` so the view ray through the
/// focal point is shared by every sample. An eye at `z = 0` uses the lower
/// bound and keeps the target height.
pub fn jittered_view(
    eye: &Vec3,
    target: &Vec3,
    jitter: JitterSample,
    dof: f32,
    focus: f32,
) -> (Vec3, Vec3) {
    let focal_ratio = if eye.z.abs() > f32::EPSILON {
        Some((eye.z - focus) / eye.z)
    } else {
        None
    };
    let scale = focal_ratio.map_or(MIN_EYE_SCALE, |r| r.max(MIN_EYE_SCALE));

    let mut jittered_eye = *eye;
    jittered_eye.x += dof * jitter.0 * scale;
    jittered_eye.y += dof * jitter.1 * scale;

    let mut jittered_target = *target;
    if let Some(ratio) = focal_ratio {
        jittered_target.y = jittered_eye.y + (target.y - jittered_eye.y) * ratio;
    }
    jittered_target.z = focus;

    (jittered_eye, jittered_target)
}

/// Runs the pass sequence once per jitter sample and averages the results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitteredAccumulator {
    /// Also shift the projection by the sample's sub-pixel offset
    pub subpixel_jitter: bool,
}

impl Default for JitteredAccumulator {
    fn default() -> Self {
        Self {
            subpixel_jitter: true,
        }
    }
}

impl JitteredAccumulator {
    /// Render one displayed frame
    ///
    /// `passes` is called once per sample after the frame buffers are cleared
    /// and the sample's view is installed. An error from it abandons the
    /// frame without resolving the accumulation buffer.
    pub fn render<B, F>(
        &self,
        backend: &mut B,
        camera: &Camera,
        table: &JitterTable,
        dof: f32,
        focus: f32,
        mut passes: F,
    ) -> BackendResult<()>
    where
        B: RenderBackend,
        F: FnMut(&mut B) -> BackendResult<()>,
    {
        let (width, height) = backend.extent();
        let base_projection = camera.get_projection_matrix();
        let weight = table.weight();

        backend.clear(ClearFlags::ACCUM);
        for jitter in table.iter() {
            backend.clear(ClearFlags::FRAME);

            let view = self.sample_view(camera, jitter, dof, focus);
            let projection = if self.subpixel_jitter {
                let dx = jitter.0 * 2.0 / width.max(1) as f32;
                let dy = jitter.1 * 2.0 / height.max(1) as f32;
                Mat4::ndc_offset(dx, dy) * base_projection
            } else {
                base_projection
            };
            backend.set_view_projection(view, projection);

            passes(backend)?;
            backend.accumulate(weight);
        }
        backend.resolve_accumulation(1.0);

        log::trace!("Accumulated {} samples (dof {:.3}, focus {:.2})", table.len(), dof, focus);
        Ok(())
    }

    fn sample_view(&self, camera: &Camera, jitter: JitterSample, dof: f32, focus: f32) -> Mat4 {
        let (eye, target) = jittered_view(&camera.position, &camera.target, jitter, dof, focus);
        if (target - eye).cross(&camera.up).norm_squared() <= f32::EPSILON {
            log::debug!("Jittered view is degenerate; using the camera's own view");
            return camera.get_view_matrix();
        }
        Mat4::look_at(eye, target, camera.up)
    }
}
