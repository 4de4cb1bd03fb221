//! Coordinate-axis gizmo drawn ahead of the floor in every sub-frame

use std::rc::Rc;

use crate::foundation::math::{constants, Quat, Transform, Vec3};
use crate::render::material::Material;
use crate::render::primitives::Mesh;

use super::RenderableInstance;

/// Shaft radius
const SHAFT_RADIUS: f32 = 0.025;

/// Shaft tessellation
const SHAFT_SLICES: u32 = 8;

/// Arrow head length; the head base radius is a quarter of it
const HEAD_LENGTH: f32 = 0.3;

/// Arrow head tessellation
const HEAD_SLICES: u32 = 4;

/// One straight arrow from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    /// Tail
    pub start: Vec3,
    /// Tip
    pub end: Vec3,
    /// Ambient and diffuse color
    pub color: [f32; 4],
}

/// Red X, green Y and blue Z arrows through the origin
pub const AXIS_ARROWS: [Arrow; 3] = [
    Arrow {
        start: Vec3::new(-5.0, 0.1, 0.0),
        end: Vec3::new(5.0, 0.1, 0.0),
        color: [0.8, 0.0, 0.0, 1.0],
    },
    Arrow {
        start: Vec3::new(0.0, -3.0, 0.0),
        end: Vec3::new(0.0, 3.0, 0.0),
        color: [0.0, 0.8, 0.0, 1.0],
    },
    Arrow {
        start: Vec3::new(0.0, 0.1, -3.0),
        end: Vec3::new(0.0, 0.1, 3.0),
        color: [0.0, 0.0, 0.8, 1.0],
    },
];

/// Lit arrows drawn at their true positions, never mirrored or shadowed
///
/// Each arrow is a unit shaft stretched to the arrow length plus a cone
/// whose tip sits on the arrow end. Arrows no longer than the head get no
/// head.
#[derive(Debug, Clone)]
pub struct AxisGizmo {
    instances: Vec<RenderableInstance>,
}

impl AxisGizmo {
    /// Build the gizmo for the given arrows
    pub fn new(arrows: &[Arrow]) -> Self {
        let shaft = Rc::new(Mesh::cylinder(SHAFT_RADIUS, 1.0, SHAFT_SLICES));
        let head = Rc::new(Mesh::cone(HEAD_LENGTH * 0.25, HEAD_LENGTH, HEAD_SLICES));

        let mut instances = Vec::with_capacity(arrows.len() * 2);
        for arrow in arrows {
            let axis = arrow.end - arrow.start;
            let length = axis.norm();
            if length <= f32::EPSILON {
                log::warn!("Skipping zero-length axis arrow at {:?}", arrow.start);
                continue;
            }
            let dir = axis / length;
            let rotation = Quat::rotation_between(&Vec3::z(), &dir)
                .unwrap_or_else(|| Quat::from_axis_angle(&Vec3::x_axis(), constants::PI));
            let material = Material::ambient_and_diffuse(arrow.color);

            let shaft_transform = Transform::from_position(arrow.start)
                .with_rotation(rotation)
                .with_scale(Vec3::new(1.0, 1.0, length));
            instances.push(RenderableInstance::new(
                Rc::clone(&shaft),
                shaft_transform.to_matrix(),
                material,
            ));

            if length > HEAD_LENGTH {
                let head_transform =
                    Transform::from_position(arrow.start + dir * (length - HEAD_LENGTH)).with_rotation(rotation);
                instances.push(RenderableInstance::new(
                    Rc::clone(&head),
                    head_transform.to_matrix(),
                    material,
                ));
            }
        }

        Self { instances }
    }

    /// Instances in draw order: shaft then head, arrow by arrow
    pub fn instances(&self) -> &[RenderableInstance] {
        &self.instances
    }
}

impl Default for AxisGizmo {
    fn default() -> Self {
        Self::new(&AXIS_ARROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_gizmo_has_shaft_and_head_per_axis() {
        let gizmo = AxisGizmo::default();
        let instances = gizmo.instances();
        assert_eq!(instances.len(), 6);
        assert!(Rc::ptr_eq(&instances[0].mesh, &instances[2].mesh));
        assert!(Rc::ptr_eq(&instances[1].mesh, &instances[5].mesh));
        assert_eq!(instances[0].material.diffuse, [0.8, 0.0, 0.0, 1.0]);
        assert_eq!(instances[3].material.ambient, [0.0, 0.8, 0.0, 1.0]);
        assert_eq!(instances[4].material.specular, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_shafts_span_each_arrow() {
        let gizmo = AxisGizmo::default();
        for (arrow, pair) in AXIS_ARROWS.iter().zip(gizmo.instances().chunks(2)) {
            let shaft = &pair[0].transform;
            let tail = shaft.transform_point(&Point3::origin());
            let tip = shaft.transform_point(&Point3::new(0.0, 0.0, 1.0));
            assert_relative_eq!(tail.coords, arrow.start, epsilon = 1e-5);
            assert_relative_eq!(tip.coords, arrow.end, epsilon = 1e-5);

            let head = &pair[1].transform;
            let apex = head.transform_point(&Point3::new(0.0, 0.0, HEAD_LENGTH));
            assert_relative_eq!(apex.coords, arrow.end, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_short_and_degenerate_arrows() {
        let color = [1.0, 1.0, 1.0, 1.0];
        let gizmo = AxisGizmo::new(&[
            Arrow { start: Vec3::zeros(), end: Vec3::new(0.0, 0.0, -0.2), color },
            Arrow { start: Vec3::x(), end: Vec3::x(), color },
        ]);
        assert_eq!(gizmo.instances().len(), 1);
        let tip = gizmo.instances()[0].transform.transform_point(&Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(tip.coords, Vec3::new(0.0, 0.0, -0.2), epsilon = 1e-5);
    }
}
