//! Mesh representation for 3D models
//!
//! Pure geometry containers with no backend dependencies. Triangles are wound
//! counter-clockwise when seen from the side their normals point to, which
//! is what the rasterizer treats as front-facing.

use crate::foundation::math::{constants, Vec3};

/// 3D vertex data structure for rendering
///
/// Position and normal are all the fixed-function lighting model needs.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],

    /// Unit normal in model space
    pub normal: [f32; 3],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// Position as a vector
    pub fn position_vec(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// Normal as a vector
    pub fn normal_vec(&self) -> Vec3 {
        Vec3::from(self.normal)
    }
}

/// 3D mesh containing vertices and indices for rendering
///
/// Meshes are immutable once built and are shared between instances through
/// `Rc<Mesh>`, so the showcase only ever builds one cube and one sphere.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Index data for triangles
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of triangles described by the index buffer
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over the triangles as vertex triples
    ///
    /// Trailing indices that do not form a full triangle and indices that
    /// point outside the vertex buffer are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [&Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(move |tri| {
            let a = self.vertices.get(tri[0] as usize)?;
            let b = self.vertices.get(tri[1] as usize)?;
            let c = self.vertices.get(tri[2] as usize)?;
            Some([a, b, c])
        })
    }

    /// Axis-aligned cube centered at the origin
    ///
    /// Each face has its own four vertices so normals stay flat.
    ///
    /// # Arguments
    /// * `half_extent` - Distance from the center to each face
    pub fn cube(half_extent: f32) -> Self {
        // (normal, u, v) with u x v = normal so every face winds counter-clockwise
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u, v) in faces {
            let n = Vec3::from(normal);
            let u = Vec3::from(u);
            let v = Vec3::from(v);
            let center = n * half_extent;
            let base = vertices.len() as u32;

            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let p = center + (u * su + v * sv) * half_extent;
                vertices.push(Vertex::new(p.into(), normal));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(vertices, indices)
    }

    /// Latitude/longitude sphere centered at the origin
    ///
    /// # Arguments
    /// * `radius` - Sphere radius
    /// * `stacks` - Number of latitude bands (at least 2)
    /// * `slices` - Number of longitude segments (at least 3)
    pub fn uv_sphere(radius: f32, stacks: u32, slices: u32) -> Self {
        let stacks = stacks.max(2);
        let slices = slices.max(3);

        let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
        for i in 0..=stacks {
            let theta = constants::PI * i as f32 / stacks as f32;
            let (sin_t, cos_t) = theta.sin_cos();
            for j in 0..=slices {
                let phi = 2.0 * constants::PI * j as f32 / slices as f32;
                let (sin_p, cos_p) = phi.sin_cos();
                let n = Vec3::new(sin_t * cos_p, cos_t, -sin_t * sin_p);
                vertices.push(Vertex::new((n * radius).into(), n.into()));
            }
        }

        let row = slices + 1;
        let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
        for i in 0..stacks {
            for j in 0..slices {
                let a = i * row + j;
                let b = (i + 1) * row + j;
                let c = b + 1;
                let d = a + 1;
                // Degenerate triangles at the poles are harmless; skip them anyway
                if i != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if i != stacks - 1 {
                    indices.extend_from_slice(&[d, b, c]);
                }
            }
        }

        Self::new(vertices, indices)
    }

    /// Closed cylinder along +Z from z = 0 to z = `length`
    ///
    /// Side normals are smooth; both caps are flat.
    pub fn cylinder(radius: f32, length: f32, slices: u32) -> Self {
        let slices = slices.max(3);
        let ring = |j: u32| {
            let phi = 2.0 * constants::PI * j as f32 / slices as f32;
            let (s, c) = phi.sin_cos();
            (c, s)
        };

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for j in 0..=slices {
            let (c, s) = ring(j);
            let normal = [c, s, 0.0];
            vertices.push(Vertex::new([radius * c, radius * s, 0.0], normal));
            vertices.push(Vertex::new([radius * c, radius * s, length], normal));
        }
        for j in 0..slices {
            let (a, d) = (2 * j, 2 * j + 1);
            let (b, c) = (2 * j + 2, 2 * j + 3);
            indices.extend_from_slice(&[a, b, c, a, c, d]);
        }

        for (z, normal) in [(length, [0.0, 0.0, 1.0]), (0.0, [0.0, 0.0, -1.0])] {
            let center = vertices.len() as u32;
            vertices.push(Vertex::new([0.0, 0.0, z], normal));
            for j in 0..=slices {
                let (c, s) = ring(j);
                vertices.push(Vertex::new([radius * c, radius * s, z], normal));
            }
            for j in 0..slices {
                let (p, q) = (center + 1 + j, center + 2 + j);
                if normal[2] > 0.0 {
                    indices.extend_from_slice(&[center, p, q]);
                } else {
                    indices.extend_from_slice(&[center, q, p]);
                }
            }
        }

        Self::new(vertices, indices)
    }

    /// Cone along +Z with its base disk at z = 0 and its apex at z = `height`
    pub fn cone(base_radius: f32, height: f32, slices: u32) -> Self {
        let slices = slices.max(3);
        let side_normal = |phi: f32| {
            let (s, c) = phi.sin_cos();
            Vec3::new(height * c, height * s, base_radius).normalize()
        };
        let step = 2.0 * constants::PI / slices as f32;

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for j in 0..slices {
            let (phi0, phi1) = (step * j as f32, step * (j + 1) as f32);
            let (s0, c0) = phi0.sin_cos();
            let (s1, c1) = phi1.sin_cos();
            let base = vertices.len() as u32;
            vertices.push(Vertex::new([base_radius * c0, base_radius * s0, 0.0], side_normal(phi0).into()));
            vertices.push(Vertex::new([base_radius * c1, base_radius * s1, 0.0], side_normal(phi1).into()));
            vertices.push(Vertex::new([0.0, 0.0, height], side_normal(0.5 * (phi0 + phi1)).into()));
            indices.extend_from_slice(&[base, base + 1, base + 2]);
        }

        let down = [0.0, 0.0, -1.0];
        let center = vertices.len() as u32;
        vertices.push(Vertex::new([0.0, 0.0, 0.0], down));
        for j in 0..=slices {
            let (s, c) = (step * j as f32).sin_cos();
            vertices.push(Vertex::new([base_radius * c, base_radius * s, 0.0], down));
        }
        for j in 0..slices {
            indices.extend_from_slice(&[center, center + 2 + j, center + 1 + j]);
        }

        Self::new(vertices, indices)
    }

    /// One color class of a checkerboard lying in the y = 0 plane
    ///
    /// The board is `num_w` tiles wide along X and `num_d` tiles deep along Z,
    /// centered at the origin, with normals along +Y. Only tiles whose
    /// `(i + j) & 1` equals `parity` are emitted, so the two parities together
    /// cover the full board.
    pub fn checkerboard(tile_w: f32, tile_d: f32, num_w: u32, num_d: u32, parity: u32) -> Self {
        let center_w = tile_w * num_w as f32 * 0.5;
        let center_d = tile_d * num_d as f32 * 0.5;
        let up = [0.0, 1.0, 0.0];

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for j in 0..num_d {
            let z0 = tile_d * j as f32 - center_d;
            let z1 = z0 + tile_d;
            for i in 0..num_w {
                if (i + j) & 1 != parity & 1 {
                    continue;
                }
                let x0 = tile_w * i as f32 - center_w;
                let x1 = x0 + tile_w;
                let base = vertices.len() as u32;
                vertices.push(Vertex::new([x0, 0.0, z0], up));
                vertices.push(Vertex::new([x0, 0.0, z1], up));
                vertices.push(Vertex::new([x1, 0.0, z1], up));
                vertices.push(Vertex::new([x1, 0.0, z0], up));
                indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
            }
        }

        Self::new(vertices, indices)
    }
}
