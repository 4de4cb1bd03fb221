//! Planar projected shadows
//!
//! The receiving surface is a plane `ax + by + cz + d = 0`. For a light at
//! homogeneous position `L` the matrix
//!
//! ```text
//! M = (P . L) I - L P^T
//! ```
//!
//! maps every point onto the plane along the ray from the light, so drawing
//! the scene through `M` with a flat dark color yields its shadow decal.

use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::render::api::{BackendResult, RenderBackend};
use crate::render::pipeline::DepthBiasConfig;
use crate::scene::RenderableInstance;

use super::mask::RestrictedRegion;
use super::scope::PassScope;
use super::draw_instances;

/// Plane `ax + by + cz + d = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// `(a, b, c, d)`
    pub coefficients: Vec4,
}

impl Plane {
    /// Create a plane from its four coefficients
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self {
            coefficients: Vec4::new(a, b, c, d),
        }
    }

    /// Normal `(a, b, c)`, not necessarily unit length
    pub fn normal(&self) -> Vec3 {
        self.coefficients.xyz()
    }

    /// Constant term
    pub fn d(&self) -> f32 {
        self.coefficients.w
    }

    /// Same plane with a unit normal, `None` if the normal is zero
    pub fn normalized(&self) -> Option<Self> {
        let len = self.normal().norm();
        if len <= f32::EPSILON {
            return None;
        }
        Some(Self {
            coefficients: self.coefficients / len,
        })
    }

    /// `P . p` for a homogeneous point; zero exactly on the plane
    pub fn evaluate(&self, point: &Vec4) -> f32 {
        self.coefficients.dot(point)
    }

    /// Householder reflection across the plane
    ///
    /// For `y = 0` this is `scale(1, -1, 1)`. Returns `None` for a zero normal.
    pub fn reflection_matrix(&self) -> Option<Mat4> {
        let unit = self.normalized()?;
        let n = unit.normal();
        let d = unit.d();

        let mut m = Mat4::identity();
        for row in 0..3 {
            for col in 0..3 {
                m[(row, col)] -= 2.0 * n[row] * n[col];
            }
            m[(row, 3)] = -2.0 * d * n[row];
        }
        Some(m)
    }
}

/// Plane through three points
///
/// The normal is `(p1 - p0) x (p2 - p0)` without normalization, so swapping
/// `p1` and `p2` flips its sign. Collinear points give a zero normal; callers
/// are expected not to pass them.
pub fn derive_plane(p0: &Vec3, p1: &Vec3, p2: &Vec3) -> Plane {
    let normal = (p1 - p0).cross(&(p2 - p0));
    Plane::new(normal.x, normal.y, normal.z, -normal.dot(p0))
}

/// Matrix flattening geometry onto `plane` as seen from `light`
///
/// Entry (row j, column i) is `dot * delta(i, j) - light[j] * plane[i]` with
/// `dot = plane . light`. Intended for positional lights (`w = 1`); with
/// `w = 0` it degenerates to a parallel projection along the light direction.
pub fn compute_shadow_matrix(plane: &Plane, light: &Vec4) -> Mat4 {
    let dot = plane.coefficients.dot(light);
    if light.w == 0.0 {
        log::debug!("Shadow projector used with a directional light; projecting in parallel");
    }
    if dot == 0.0 {
        log::warn!("Light lies in the receiving plane; shadow matrix is singular");
    }
    Mat4::identity() * dot - light * plane.coefficients.transpose()
}

/// Draws the scene flattened onto the receiving plane as a translucent decal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowPass {
    /// Unlit decal color; alpha controls how dark the shadow is
    pub color: [f32; 4],

    /// Polygon offset pulling the decal in front of the coplanar surface
    pub depth_bias: DepthBiasConfig,
}

impl Default for ShadowPass {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0, 0.5],
            depth_bias: DepthBiasConfig {
                constant_factor: -4.0,
                slope_factor: -1.0,
            },
        }
    }
}

impl ShadowPass {
    /// Shadow pass with a given decal opacity
    pub fn with_opacity(opacity: f32) -> Self {
        let mut pass = Self::default();
        pass.color[3] = opacity;
        pass
    }

    /// Draw `instances` through `shadow_matrix`
    ///
    /// Only callable inside a restricted mask region, so the decal never
    /// spills outside the receiving surface.
    pub fn draw<B: RenderBackend>(
        &self,
        region: &mut RestrictedRegion<'_, B>,
        instances: &[RenderableInstance],
        shadow_matrix: &Mat4,
    ) -> BackendResult<()> {
        let mut scope = PassScope::begin(&mut **region);
        let color = self.color;
        let bias = self.depth_bias;
        scope.update_pipeline(|s| {
            s.lighting = false;
            s.flat_color = color;
            s.cull_mode = s.cull_mode.inverted();
            s.depth_bias = Some(bias);
        });
        scope.multiply_matrix(shadow_matrix);
        draw_instances(&mut *scope, instances, None)
    }
}
