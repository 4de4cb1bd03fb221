//! Fixed-function light sources
//!
//! A single light with a homogeneous position: `w = 1` is a point light at
//! `xyz`, `w = 0` is a directional light shining from `xyz`. The planar
//! shadow and the reflection both work directly on this 4-vector.

use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Global ambient term applied to every lit surface
pub const DEFAULT_GLOBAL_AMBIENT: [f32; 4] = [0.2, 0.2, 0.2, 1.0];

/// A fixed-function light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Homogeneous position in world space
    pub position: Vec4,

    /// Ambient contribution of this light
    pub ambient: [f32; 4],

    /// Diffuse color
    pub diffuse: [f32; 4],

    /// Specular color
    pub specular: [f32; 4],
}

impl Light {
    /// White point light at `position`
    pub fn point(position: Vec3) -> Self {
        Self {
            position: position.push(1.0),
            ..Self::default()
        }
    }

    /// Whether the light sits at a finite position
    pub fn is_positional(&self) -> bool {
        self.position.w != 0.0
    }

    /// Unit vector from a world-space point toward the light
    ///
    /// Returns `None` when the point coincides with a positional light.
    pub fn direction_from(&self, point: &Vec3) -> Option<Vec3> {
        let to_light = if self.is_positional() {
            self.position.xyz() / self.position.w - point
        } else {
            self.position.xyz()
        };
        to_light.try_normalize(f32::EPSILON)
    }

    /// The same light with its position transformed by `matrix`
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            position: matrix * self.position,
            ..*self
        }
    }
}

impl Default for Light {
    /// Black ambient, white diffuse and specular, at the origin
    fn default() -> Self {
        Self {
            position: Vec4::new(0.0, 0.0, 0.0, 1.0),
            ambient: [0.0, 0.0, 0.0, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0, 1.0],
        }
    }
}
