//! Checkerboard floor acting as the mirror and shadow receiver

use std::rc::Rc;

use crate::foundation::math::{Mat4, Vec3};
use crate::render::compositor::{derive_plane, Plane};
use crate::render::material::Material;
use crate::render::primitives::Mesh;

use super::RenderableInstance;

/// Light and dark tile colors
pub const FLOOR_COLORS: [[f32; 4]; 2] = [[0.6, 0.6, 0.6, 1.0], [0.3, 0.3, 0.3, 1.0]];

/// The planar surface that receives reflection and shadow
///
/// Drawn as two meshes, one per tile color, lying in `y = 0` and centered on
/// the origin.
#[derive(Debug, Clone)]
pub struct ReceivingSurface {
    tiles: Vec<RenderableInstance>,
    plane: Plane,
    half_extent: (f32, f32),
}

impl ReceivingSurface {
    /// `num_w` x `num_d` tiles of `tile_w` x `tile_d` units
    pub fn checkerboard(tile_w: f32, tile_d: f32, num_w: u32, num_d: u32) -> Self {
        let tiles = FLOOR_COLORS
            .iter()
            .zip(0u32..)
            .map(|(color, parity)| {
                RenderableInstance::new(
                    Rc::new(Mesh::checkerboard(tile_w, tile_d, num_w, num_d, parity)),
                    Mat4::identity(),
                    Material::ambient_and_diffuse(*color),
                )
            })
            .collect();

        let plane = derive_plane(
            &Vec3::new(-1.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, -1.0),
        );

        log::debug!("Floor: {}x{} tiles of {}x{}", num_w, num_d, tile_w, tile_d);
        Self {
            tiles,
            plane,
            half_extent: (tile_w * num_w as f32 * 0.5, tile_d * num_d as f32 * 0.5),
        }
    }

    /// Tile meshes, one per color
    pub fn tiles(&self) -> &[RenderableInstance] {
        &self.tiles
    }

    /// Plane the tiles lie in
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Half width (x) and half depth (z)
    pub fn half_extent(&self) -> (f32, f32) {
        self.half_extent
    }
}

impl Default for ReceivingSurface {
    /// 24 x 28 unit tiles
    fn default() -> Self {
        Self::checkerboard(1.0, 1.0, 24, 28)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_floor_layout() {
        let floor = ReceivingSurface::default();
        assert_eq!(floor.tiles().len(), 2);
        assert_eq!(floor.half_extent(), (12.0, 14.0));

        let total: usize = floor.tiles().iter().map(|t| t.mesh.triangle_count()).sum();
        assert_eq!(total, 24 * 28 * 2);
        assert_eq!(floor.tiles()[0].material.diffuse, FLOOR_COLORS[0]);
        assert_eq!(floor.tiles()[1].material.diffuse, FLOOR_COLORS[1]);
    }

    #[test]
    fn test_tiles_lie_in_plane() {
        let floor = ReceivingSurface::checkerboard(1.0, 1.0, 3, 3);
        let unit = floor.plane().normalized().unwrap();
        assert_relative_eq!(unit.normal(), Vec3::y());
        for tile in floor.tiles() {
            for v in &tile.mesh.vertices {
                assert_relative_eq!(floor.plane().evaluate(&v.position_vec().push(1.0)), 0.0);
            }
        }
    }
}
