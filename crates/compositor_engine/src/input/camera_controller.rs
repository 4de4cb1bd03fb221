//! Orbit-style camera controller
//!
//! Zoom slides the eye along the eye-target axis, pan slides it across the
//! view plane at constant distance, and every mutation ends with a clamp
//! into the authored scene bounds.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::render::primitives::Camera;

/// Eye and look-at point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Eye position
    pub position: Vec3,
    /// Look-at point
    pub target: Vec3,
}

impl CameraState {
    /// Create a pose
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Eye-to-target distance
    pub fn distance(&self) -> f32 {
        (self.target - self.position).norm()
    }

    /// Copy the pose onto a render camera
    pub fn apply_to(&self, camera: &mut Camera) {
        camera.set_pose(self.position, self.target);
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.6, 15.0), Vec3::new(0.0, 3.0, 0.0))
    }
}

/// Admissible boxes and distance range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraBounds {
    /// Lower corner of the eye box
    pub position_min: Vec3,
    /// Upper corner of the eye box
    pub position_max: Vec3,
    /// Lower corner of the target box
    pub target_min: Vec3,
    /// Upper corner of the target box
    pub target_max: Vec3,
    /// Closest allowed zoom
    pub min_distance: f32,
    /// Farthest allowed zoom
    ///
    /// The boxes alone cap the distance at about 19.5 for the default
    /// bounds, so this must stay below that to take effect.
    pub max_distance: f32,
}

impl Default for CameraBounds {
    fn default() -> Self {
        Self {
            position_min: Vec3::new(-3.0, 0.0, -5.5),
            position_max: Vec3::new(3.0, 5.5, 15.0),
            target_min: Vec3::new(-3.0, -5.5, 0.0),
            target_max: Vec3::new(3.0, 5.5, 0.0),
            min_distance: 0.2,
            max_distance: 18.0,
        }
    }
}

impl CameraBounds {
    /// Clamp both points into their boxes
    pub fn clamp(&self, state: &CameraState) -> CameraState {
        CameraState {
            position: state.position.sup(&self.position_min).inf(&self.position_max),
            target: state.target.sup(&self.target_min).inf(&self.target_max),
        }
    }

    /// Whether `distance` lies in the zoom range
    pub fn distance_in_range(&self, distance: f32) -> bool {
        (self.min_distance..=self.max_distance).contains(&distance)
    }
}

/// Camera pose driven by zoom / pan input
#[derive(Debug, Clone, PartialEq)]
pub struct CameraController {
    state: CameraState,
    home: CameraState,
    bounds: CameraBounds,

    /// Distance change per unit of zoom input
    pub zoom_rate: f32,

    /// World units per unit of pan input
    pub pan_sensitivity: f32,
}

impl CameraController {
    /// Controller starting at `home`, clamped into `bounds`
    pub fn new(home: CameraState, bounds: CameraBounds) -> Self {
        let home = bounds.clamp(&home);
        Self {
            state: home,
            home,
            bounds,
            zoom_rate: 0.03,
            pan_sensitivity: 0.01,
        }
    }

    /// Current pose
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Pose `reset` returns to
    pub fn home(&self) -> &CameraState {
        &self.home
    }

    /// Active bounds
    pub fn bounds(&self) -> &CameraBounds {
        &self.bounds
    }

    /// Move the eye toward (positive `delta`) or away from the target
    ///
    /// The eye is scaled about the target by `1 - zoom_rate * delta`. A zoom
    /// whose result falls outside the distance range, before or after
    /// clamping, is rejected and leaves the pose untouched. Returns whether
    /// it applied.
    pub fn zoom(&mut self, delta: f32) -> bool {
        let scale = 1.0 - self.zoom_rate * delta;
        if !(scale > 0.0) {
            log::trace!("Zoom {} would pass through the target; ignored", delta);
            return false;
        }

        let target = self.state.target;
        let zoomed = CameraState {
            position: target + (self.state.position - target) * scale,
            target,
        };
        if !self.bounds.distance_in_range(zoomed.distance()) {
            log::trace!("Zoom to distance {:.3} rejected", zoomed.distance());
            return false;
        }
        let candidate = self.bounds.clamp(&zoomed);
        if !self.bounds.distance_in_range(candidate.distance()) {
            log::trace!("Clamped zoom distance {:.3} out of range; rolled back", candidate.distance());
            return false;
        }
        self.state = candidate;
        true
    }

    /// Slide the eye across the view plane, keeping its distance to the target
    ///
    /// `right = normalize(view_dir x world_up)` and
    /// `up = normalize(view_dir x right)`; the eye moves by
    /// `(right * dx + up * dy) * pan_sensitivity` and is then pulled back
    /// along the view axis to the previous distance. Zero input is a no-op,
    /// as is a view looking straight along the world up axis.
    pub fn pan(&mut self, dx: f32, dy: f32) -> bool {
        if dx == 0.0 && dy == 0.0 {
            return false;
        }

        let view_dir = self.state.target - self.state.position;
        let distance = view_dir.norm();
        let Some(right) = view_dir.cross(&Vec3::y()).try_normalize(f32::EPSILON) else {
            log::debug!("Pan skipped: view direction is parallel to world up");
            return false;
        };
        let Some(up) = view_dir.cross(&right).try_normalize(f32::EPSILON) else {
            return false;
        };

        let moved = self.state.position + (right * dx + up * dy) * self.pan_sensitivity;
        let Some(back) = (moved - self.state.target).try_normalize(f32::EPSILON) else {
            log::debug!("Pan skipped: eye would land on the target");
            return false;
        };

        self.state.position = self.state.target + back * distance;
        self.clamp();
        true
    }

    /// Clamp the pose into the bounds; idempotent
    pub fn clamp(&mut self) {
        self.state = self.bounds.clamp(&self.state);
    }

    /// Return to the home pose
    pub fn reset(&mut self) {
        log::debug!("Camera reset to home pose");
        self.state = self.home;
    }

    /// Copy the pose onto a render camera
    pub fn apply_to(&self, camera: &mut Camera) {
        self.state.apply_to(camera);
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraState::default(), CameraBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn loose_bounds() -> CameraBounds {
        CameraBounds {
            position_min: Vec3::repeat(-100.0),
            position_max: Vec3::repeat(100.0),
            target_min: Vec3::repeat(-100.0),
            target_max: Vec3::repeat(100.0),
            min_distance: 0.2,
            max_distance: 50.0,
        }
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let bounds = CameraBounds::default();
        let samples = [
            CameraState::new(Vec3::new(10.0, -4.0, 30.0), Vec3::new(-9.0, 7.0, 2.0)),
            CameraState::new(Vec3::new(0.5, 2.0, 3.0), Vec3::new(0.0, 0.0, 0.0)),
            CameraState::new(Vec3::new(-3.5, 6.0, -8.0), Vec3::new(4.0, -6.0, -1.0)),
            CameraState::default(),
        ];
        for s in &samples {
            let once = bounds.clamp(s);
            assert_eq!(bounds.clamp(&once), once);
            assert!(once.position.x >= -3.0 && once.position.x <= 3.0);
            assert_eq!(once.target.z, 0.0);
        }
    }

    #[test]
    fn test_zoom_stays_in_range() {
        let mut controller = CameraController::default();
        let deltas = [10.0, 10.0, 10.0, 10.0, -25.0, -25.0, 30.0, 3.0, -1.0, 33.0, 20.0, -40.0];
        for _ in 0..5 {
            for &d in &deltas {
                controller.zoom(d);
                let dist = controller.state().distance();
                assert!(
                    (0.2..=18.0).contains(&dist),
                    "distance {dist} left the range after zoom({d})"
                );
            }
        }
    }

    #[test]
    fn test_zoom_in_and_reject_far() {
        let mut controller = CameraController::default();
        let start = controller.state().distance();

        assert!(controller.zoom(10.0));
        assert_relative_eq!(controller.state().distance(), start * 0.7, epsilon = 1e-4);

        let before = *controller.state();
        assert!(!controller.zoom(-100.0));
        assert_eq!(*controller.state(), before);

        // scale <= 0 would flip the eye through the target
        assert!(!controller.zoom(1000.0));
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_far_limit_binds_inside_the_boxes() {
        let home = CameraState::new(Vec3::new(2.0, 4.0, 12.0), Vec3::new(-3.0, -5.5, 0.0));
        let mut controller = CameraController::new(home, CameraBounds::default());
        assert_eq!(*controller.state(), home);

        // 1.15x lands inside both boxes but past 18 units
        let target = home.target;
        let zoomed = CameraState::new(target + (home.position - target) * 1.15, target);
        assert_eq!(controller.bounds().clamp(&zoomed), zoomed);
        assert!(zoomed.distance() > 18.0);
        assert!(!controller.zoom(-5.0));
        assert_eq!(*controller.state(), home);

        assert!(controller.zoom(-3.0));
        assert_relative_eq!(controller.state().distance(), home.distance() * 1.09, epsilon = 1e-4);
        assert!(controller.state().distance() < 18.0);
    }

    #[test]
    fn test_zero_pan_is_bit_identical() {
        let mut controller = CameraController::default();
        let before = *controller.state();
        assert!(!controller.pan(0.0, 0.0));
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_pan_preserves_distance() {
        let mut controller = CameraController::new(CameraState::default(), loose_bounds());
        let start = controller.state().distance();
        assert!(controller.pan(40.0, -25.0));
        assert_relative_eq!(controller.state().distance(), start, epsilon = 1e-4);
        assert_ne!(controller.state().position, CameraState::default().position);
        assert_eq!(controller.state().target, CameraState::default().target);

        // right = view_dir x up points to +X for a camera looking down -Z
        let mut c = CameraController::new(
            CameraState::new(Vec3::new(0.0, 0.0, 10.0), Vec3::zeros()),
            loose_bounds(),
        );
        c.pan(10.0, 0.0);
        assert!(c.state().position.x > 0.0);
    }

    #[test]
    fn test_pan_skipped_when_looking_straight_down() {
        let mut controller = CameraController::new(
            CameraState::new(Vec3::new(0.0, 10.0, 0.0), Vec3::zeros()),
            loose_bounds(),
        );
        let before = *controller.state();
        assert!(!controller.pan(5.0, 5.0));
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_reset_restores_home() {
        let mut controller = CameraController::default();
        controller.zoom(5.0);
        controller.pan(30.0, 10.0);
        assert_ne!(*controller.state(), *controller.home());
        controller.reset();
        assert_eq!(*controller.state(), CameraState::default());

        let mut camera = Camera::default();
        camera.set_pose(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        controller.apply_to(&mut camera);
        assert_eq!(camera.position, Vec3::new(0.0, 1.6, 15.0));
        assert_eq!(camera.target, Vec3::new(0.0, 3.0, 0.0));
    }
}
