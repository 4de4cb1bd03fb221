//! # 3D Camera System
//!
//! Perspective camera producing OpenGL-convention view and projection matrices.
//!
//! ## Design Principles
//! - **Library-agnostic**: No backend dependencies in camera math
//! - **Immutable operation**: Matrix getters never modify camera state

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// 3D perspective camera
///
/// # Coordinate System
/// Right-handed, Y-up. The camera looks down -Z in view space and the
/// projection maps view depth to NDC z in [-1, 1].
///
/// # Performance Notes
/// Matrices are computed on demand; the accumulator asks for one view per
/// jitter sample anyway.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera with standard Y-up orientation
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    ///
    /// # Example
    /// ```rust
    /// use compositor_engine::foundation::math::Vec3;
    /// use compositor_engine::render::primitives::Camera;
    ///
    /// let camera = Camera::perspective(Vec3::new(0.0, 1.6, 15.0), 70.0, 4.0 / 3.0, 0.01, 100.0);
    /// assert!(camera.fov > 1.2);
    /// ```
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Configure camera to look at a specific point with custom up vector
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
        log::trace!("Camera look_at updated - target: {:?}, up: {:?}", target, up);
    }

    /// Move the eye and target together
    pub fn set_pose(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    /// View matrix (world to camera space)
    pub fn get_view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Perspective projection matrix
    pub fn get_projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined `P * V`
    pub fn get_view_projection_matrix(&self) -> Mat4 {
        self.get_projection_matrix() * self.get_view_matrix()
    }
}

impl Default for Camera {
    /// The showcase viewpoint: 70 degree lens, 4:3, near 0.01, far 100
    fn default() -> Self {
        let mut camera = Self::perspective(Vec3::new(0.0, 1.6, 15.0), 70.0, 4.0 / 3.0, 0.01, 100.0);
        camera.target = Vec3::new(0.0, 3.0, 0.0);
        camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = Camera::default();
        let clip = camera.get_view_projection_matrix() * camera.target.push(1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_point_behind_camera_has_negative_w() {
        let camera = Camera::default();
        let behind = camera.get_view_projection_matrix() * Vec4::new(0.0, 1.6, 20.0, 1.0);
        assert!(behind.w < 0.0);
    }
}
