//! Math utilities and types
//!
//! Provides the fundamental math types used by the compositor. Everything is
//! `f32` and column-vector convention (`M * v`), matching nalgebra.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (homogeneous points, planes, positional lights)
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set a uniform scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Set the rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set per-axis scale factors
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotate about the world +Y axis
    pub fn with_yaw(mut self, radians: f32) -> Self {
        self.rotation = Quat::from_axis_angle(&Vec3::y_axis(), radians);
        self
    }

    /// Convert to a transformation matrix (translate * rotate * scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3, Vec4};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Drop the homogeneous coordinate after the perspective divide
    ///
    /// Returns `None` when `w` is zero (a point at infinity).
    pub fn dehomogenize(v: &Vec4) -> Option<Vec3> {
        if v.w == 0.0 {
            return None;
        }
        Some(Vec3::new(v.x / v.w, v.y / v.w, v.z / v.w))
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// OpenGL-style perspective projection (NDC depth in [-1, 1])
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a look-at view matrix (right-handed, camera looks down -Z)
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Translation in normalized device coordinates
    ///
    /// Pre-multiplying a projection with this shifts the image by
    /// (`dx`, `dy`) NDC units, which is how sub-pixel jitter is applied.
    fn ndc_offset(dx: f32, dy: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // gluPerspective:
        // P = [f/a  0   0            0          ]
        //     [0    f   0            0          ]
        //     [0    0   (f+n)/(n-f)  2fn/(n-f)  ]
        //     [0    0   -1           0          ]
        let f = 1.0 / (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = f / aspect;
        result[(1, 1)] = f;
        result[(2, 2)] = (far + near) / (near - far);
        result[(2, 3)] = (2.0 * far * near) / (near - far);
        result[(3, 2)] = -1.0;
        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }

    fn ndc_offset(dx: f32, dy: f32) -> Mat4 {
        Mat4::new_translation(&Vec3::new(dx, dy, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_look_at_maps_target_onto_negative_z() {
        let eye = Vec3::new(0.0, 1.6, 15.0);
        let target = Vec3::new(0.0, 3.0, 0.0);
        let view = Mat4::look_at(eye, target, Vec3::y());

        let t = view.transform_point(&Point3::from(target));
        assert_relative_eq!(t.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(t.y, 0.0, epsilon = 1e-4);
        assert!(t.z < 0.0, "target should be in front of the camera");
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = Mat4::perspective(utils::deg_to_rad(70.0), 4.0 / 3.0, 0.01, 100.0);

        let near = proj * Vec4::new(0.0, 0.0, -0.01, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-4);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_transform_matrix_order() {
        let t = Transform::from_position(Vec3::new(1.0, 0.0, 0.0))
            .with_yaw(constants::PI * 0.5)
            .with_uniform_scale(2.0);
        let p = t.to_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));

        // scale to x=2, rotate +90 deg about Y to z=-2, translate x by 1
        assert_relative_eq!(p, Point3::new(1.0, 0.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_dehomogenize_rejects_points_at_infinity() {
        assert!(utils::dehomogenize(&Vec4::new(1.0, 2.0, 3.0, 0.0)).is_none());
        let p = utils::dehomogenize(&Vec4::new(2.0, 4.0, 6.0, 2.0)).unwrap();
        assert_relative_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }
}
