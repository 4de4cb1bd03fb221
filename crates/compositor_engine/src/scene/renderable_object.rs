//! Renderable instance representation for the scene
//!
//! What the compositor draws: shared geometry, a world transform and a
//! material. Instances are rebuilt by the geometry provider every step and
//! read unchanged by every jitter sample of that step.

use std::rc::Rc;

use crate::foundation::math::Mat4;
use crate::render::material::Material;
use crate::render::primitives::Mesh;

/// One drawable object for the current step
#[derive(Debug, Clone)]
pub struct RenderableInstance {
    /// Geometry shared with every other instance of the same shape
    pub mesh: Rc<Mesh>,

    /// Model-to-world transform
    pub transform: Mat4,

    /// Surface material
    pub material: Material,
}

impl RenderableInstance {
    /// Create a new instance
    pub fn new(mesh: Rc<Mesh>, transform: Mat4, material: Material) -> Self {
        Self {
            mesh,
            transform,
            material,
        }
    }

    /// World-space origin of the instance
    pub fn origin(&self) -> [f32; 3] {
        let t = &self.transform;
        [t[(0, 3)], t[(1, 3)], t[(2, 3)]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::material::presets;

    #[test]
    fn test_instances_share_geometry() {
        let cube = Rc::new(Mesh::cube(0.4));
        let a = RenderableInstance::new(Rc::clone(&cube), Mat4::identity(), presets::JADE);
        let b = RenderableInstance::new(
            Rc::clone(&cube),
            Mat4::new_translation(&Vec3::new(1.0, 0.4, -1.0)),
            presets::RUBY,
        );
        assert!(Rc::ptr_eq(&a.mesh, &b.mesh));
        assert_eq!(Rc::strong_count(&cube), 3);
        assert_eq!(b.origin(), [1.0, 0.4, -1.0]);
    }
}
