//! Showcase scene: eight turning objects in a diagonal row over the floor

use std::rc::Rc;

use crate::foundation::math::{utils, Transform, Vec3};
use crate::render::material::{presets, Material};
use crate::render::primitives::Mesh;

use super::{GeometryProvider, RenderableInstance};

/// Materials of the eight objects, in placement order
pub const SHOWCASE_MATERIALS: [Material; 8] = [
    presets::EMERALD,
    presets::JADE,
    presets::OBSIDIAN,
    presets::PEARL,
    presets::RUBY,
    presets::TURQUOISE,
    presets::BRASS,
    presets::BRONZE,
];

/// Frames per full turn cycle
const TURN_PERIOD: u64 = 120;

/// Degrees turned per frame
const TURN_STEP_DEGREES: f32 = 3.0;

/// Object size; objects rest on the floor at this height
const OBJECT_RADIUS: f32 = 0.4;

/// Eight objects at `(-6 + i, 0.4, -3 + 2i)` turning about +Y
pub struct ShowcaseScene {
    cube: Rc<Mesh>,
    sphere: Rc<Mesh>,
    instances: Vec<RenderableInstance>,
    frame: u64,
}

impl ShowcaseScene {
    /// Build the meshes and place the objects for frame 0
    pub fn new() -> Self {
        let mut scene = Self {
            cube: Rc::new(Mesh::cube(OBJECT_RADIUS)),
            sphere: Rc::new(Mesh::uv_sphere(OBJECT_RADIUS, 12, 16)),
            instances: Vec::with_capacity(SHOWCASE_MATERIALS.len()),
            frame: 0,
        };
        scene.rebuild();
        scene
    }

    /// Simulation steps taken since the last restart
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Back to frame 0
    pub fn restart(&mut self) {
        log::info!("Restarting showcase at frame {}", self.frame);
        self.frame = 0;
        self.rebuild();
    }

    /// Yaw applied to every object at the current frame, in degrees
    pub fn yaw_degrees(&self) -> f32 {
        (self.frame % TURN_PERIOD) as f32 * TURN_STEP_DEGREES
    }

    fn rebuild(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw_degrees());
        self.instances.clear();
        for (i, material) in SHOWCASE_MATERIALS.iter().enumerate() {
            let offset = i as f32;
            let position = Vec3::new(-6.0 + offset, OBJECT_RADIUS, -3.0 + 2.0 * offset);
            let mesh = if i % 2 == 0 { &self.cube } else { &self.sphere };
            self.instances.push(RenderableInstance::new(
                Rc::clone(mesh),
                Transform::from_position(position).with_yaw(yaw).to_matrix(),
                *material,
            ));
        }
    }
}

impl Default for ShowcaseScene {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryProvider for ShowcaseScene {
    fn update(&mut self, _dt: f32) {
        self.frame += 1;
        self.rebuild();
    }

    fn current_instances(&self) -> &[RenderableInstance] {
        &self.instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4;
    use approx::assert_relative_eq;

    #[test]
    fn test_placement() {
        let scene = ShowcaseScene::new();
        let instances = scene.current_instances();
        assert_eq!(instances.len(), 8);
        for (i, instance) in instances.iter().enumerate() {
            let [x, y, z] = instance.origin();
            assert_relative_eq!(x, -6.0 + i as f32);
            assert_relative_eq!(y, 0.4);
            assert_relative_eq!(z, -3.0 + 2.0 * i as f32);
            assert_eq!(instance.material, SHOWCASE_MATERIALS[i]);
        }
        assert!(Rc::ptr_eq(&instances[0].mesh, &instances[2].mesh));
        assert!(!Rc::ptr_eq(&instances[0].mesh, &instances[1].mesh));
    }

    #[test]
    fn test_rotation_wraps_every_120_frames() {
        let mut scene = ShowcaseScene::new();
        for _ in 0..30 {
            scene.update(1.0 / 60.0);
        }
        assert_eq!(scene.frame(), 30);
        assert_relative_eq!(scene.yaw_degrees(), 90.0);

        // +X of the object now points along -Z
        let axis = scene.current_instances()[0].transform.transform_vector(&Vec3::x());
        assert_relative_eq!(axis, -Vec3::z(), epsilon = 1e-5);

        for _ in 0..90 {
            scene.update(1.0 / 60.0);
        }
        assert_eq!(scene.frame(), 120);
        assert_relative_eq!(scene.yaw_degrees(), 0.0);
    }

    #[test]
    fn test_restart_resets_frame_and_pose() {
        let mut scene = ShowcaseScene::new();
        let initial: Vec<Mat4> = scene.current_instances().iter().map(|i| i.transform).collect();
        scene.update(1.0 / 60.0);
        scene.update(1.0 / 60.0);
        scene.restart();
        assert_eq!(scene.frame(), 0);
        let restored: Vec<Mat4> = scene.current_instances().iter().map(|i| i.transform).collect();
        assert_eq!(initial, restored);
    }
}
