//! Per-vertex fixed-function lighting
//!
//! ```text
//! color = global_ambient * Ma
//!       + La * Ma
//!       + max(N.L, 0) * Ld * Md
//!       + [N.L > 0] * max(N.H, 0)^shininess * Ls * Ms
//! alpha = Md.a
//! ```
//!
//! Evaluated in world space with an infinite viewer, clamped to [0, 1].

use crate::foundation::math::{Mat4, Vec3};
use crate::render::lighting::Light;
use crate::render::material::Material;

/// Everything the lighting equation needs besides the vertex itself
#[derive(Debug, Clone, Copy)]
pub(crate) struct ShadingContext {
    pub light: Light,
    pub global_ambient: [f32; 4],
    /// Unit vector toward the (infinitely distant) viewer
    pub viewer: Vec3,
}

impl ShadingContext {
    /// Build a context; the viewer direction is the view matrix's +Z axis in world space
    pub fn new(light: Light, global_ambient: [f32; 4], view: &Mat4) -> Self {
        let viewer = Vec3::new(view[(2, 0)], view[(2, 1)], view[(2, 2)])
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::z);
        Self {
            light,
            global_ambient,
            viewer,
        }
    }

    /// Lit RGBA color of one vertex
    pub fn shade(&self, material: &Material, position: &Vec3, normal: &Vec3) -> [f32; 4] {
        let mut rgb = [0.0f32; 3];
        for (i, c) in rgb.iter_mut().enumerate() {
            *c = self.global_ambient[i] * material.ambient[i] + self.light.ambient[i] * material.ambient[i];
        }

        if let Some(l) = self.light.direction_from(position) {
            let n_dot_l = normal.dot(&l);
            if n_dot_l > 0.0 {
                let specular = (l + self.viewer)
                    .try_normalize(f32::EPSILON)
                    .map_or(0.0, |h| normal.dot(&h).max(0.0).powf(material.shininess));
                for (i, c) in rgb.iter_mut().enumerate() {
                    *c += n_dot_l * self.light.diffuse[i] * material.diffuse[i]
                        + specular * self.light.specular[i] * material.specular[i];
                }
            }
        }

        [
            rgb[0].clamp(0.0, 1.0),
            rgb[1].clamp(0.0, 1.0),
            rgb[2].clamp(0.0, 1.0),
            material.diffuse[3].clamp(0.0, 1.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::lighting::DEFAULT_GLOBAL_AMBIENT;
    use approx::assert_relative_eq;

    fn matte(color: f32) -> Material {
        Material::ambient_and_diffuse([color, color, color, 1.0])
    }

    #[test]
    fn test_surface_facing_away_gets_only_ambient() {
        let ctx = ShadingContext::new(
            Light::point(Vec3::new(0.0, 10.0, 0.0)),
            DEFAULT_GLOBAL_AMBIENT,
            &Mat4::identity(),
        );
        let c = ctx.shade(&matte(0.5), &Vec3::zeros(), &-Vec3::y());
        assert_relative_eq!(c[0], 0.2 * 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_head_on_light_is_full_diffuse() {
        let ctx = ShadingContext::new(
            Light::point(Vec3::new(0.0, 10.0, 0.0)),
            DEFAULT_GLOBAL_AMBIENT,
            &Mat4::identity(),
        );
        let c = ctx.shade(&matte(0.6), &Vec3::zeros(), &Vec3::y());
        assert_relative_eq!(c[0], 0.2 * 0.6 + 0.6, epsilon = 1e-6);
        assert_relative_eq!(c[3], 1.0);
    }

    #[test]
    fn test_alpha_comes_from_diffuse() {
        let ctx = ShadingContext::new(Light::default(), DEFAULT_GLOBAL_AMBIENT, &Mat4::identity());
        let material = matte(0.5).with_alpha(0.1);
        let c = ctx.shade(&material, &Vec3::new(1.0, 0.0, 0.0), &Vec3::x());
        assert_relative_eq!(c[3], 0.1);
    }
}
