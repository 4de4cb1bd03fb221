//! Software pipeline device
//!
//! A CPU implementation of `RenderBackend`: Gouraud-lit triangles rasterized
//! into color, depth, stencil and accumulation planes, with the same state
//! semantics as a fixed-function GPU pipeline.

pub mod framebuffer;
pub mod rasterizer;
mod shading;

pub use framebuffer::Framebuffer;
pub use rasterizer::RasterStats;

use crate::foundation::math::{Mat3, Mat4, Vec3};
use crate::render::api::{BackendResult, ClearFlags, ColorSnapshot, DepthSnapshot, RenderBackend};
use crate::render::lighting::{Light, DEFAULT_GLOBAL_AMBIENT};
use crate::render::material::Material;
use crate::render::pipeline::PipelineState;
use crate::render::primitives::Mesh;
use crate::render::{RenderError, RenderResult};

use rasterizer::ClipVertex;
use shading::ShadingContext;

/// CPU rendering device
pub struct SoftwareDevice {
    framebuffer: Framebuffer,
    clear_color: [f32; 4],
    state: PipelineState,
    view: Mat4,
    projection: Mat4,
    matrix_stack: Vec<Mat4>,
    light: Light,
    global_ambient: [f32; 4],
    stats: RasterStats,
}

impl SoftwareDevice {
    /// Create a device with a `width` x `height` framebuffer
    ///
    /// # Errors
    /// Propagates framebuffer allocation failures.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        log::info!("Creating software device {}x{}", width, height);
        Ok(Self {
            framebuffer: Framebuffer::new(width, height)?,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            state: PipelineState::default(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            matrix_stack: vec![Mat4::identity()],
            light: Light::default(),
            global_ambient: DEFAULT_GLOBAL_AMBIENT,
            stats: RasterStats::default(),
        })
    }

    /// Override the global ambient term
    pub fn with_global_ambient(mut self, ambient: [f32; 4]) -> Self {
        self.global_ambient = ambient;
        self
    }

    /// Rasterizer counters since the last `reset_stats`
    pub fn stats(&self) -> RasterStats {
        self.stats
    }

    /// Zero the rasterizer counters
    pub fn reset_stats(&mut self) {
        self.stats = RasterStats::default();
    }
}

impl RenderBackend for SoftwareDevice {
    fn extent(&self) -> (u32, u32) {
        (self.framebuffer.width(), self.framebuffer.height())
    }

    fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }

    fn clear(&mut self, flags: ClearFlags) {
        if flags.contains(ClearFlags::COLOR) {
            self.framebuffer.clear_color(self.clear_color);
        }
        if flags.contains(ClearFlags::DEPTH) {
            self.framebuffer.clear_depth();
        }
        if flags.contains(ClearFlags::STENCIL) {
            self.framebuffer.clear_stencil();
        }
        if flags.contains(ClearFlags::ACCUM) {
            self.framebuffer.clear_accum();
        }
    }

    fn pipeline_state(&self) -> PipelineState {
        self.state
    }

    fn set_pipeline_state(&mut self, state: PipelineState) {
        self.state = state;
    }

    fn set_view_projection(&mut self, view: Mat4, projection: Mat4) {
        self.view = view;
        self.projection = projection;
    }

    fn view_matrix(&self) -> Mat4 {
        self.view
    }

    fn push_matrix(&mut self) {
        let top = self.current_matrix();
        self.matrix_stack.push(top);
    }

    fn pop_matrix(&mut self) -> BackendResult<()> {
        if self.matrix_stack.len() <= 1 {
            return Err(RenderError::MatrixStackUnderflow);
        }
        self.matrix_stack.pop();
        Ok(())
    }

    fn multiply_matrix(&mut self, matrix: &Mat4) {
        if let Some(top) = self.matrix_stack.last_mut() {
            *top *= matrix;
        }
    }

    fn current_matrix(&self) -> Mat4 {
        self.matrix_stack.last().copied().unwrap_or_else(Mat4::identity)
    }

    fn light(&self) -> Light {
        self.light
    }

    fn set_light(&mut self, light: Light) {
        self.light = light;
    }

    fn draw_mesh(&mut self, mesh: &Mesh, transform: &Mat4, material: &Material) -> BackendResult<()> {
        let state = self.state;
        let model = self.current_matrix() * transform;
        let mvp = self.projection * self.view * model;

        let shading = state
            .lighting
            .then(|| ShadingContext::new(self.light, self.global_ambient, &self.view));
        let linear: Mat3 = model.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = linear.try_inverse().map_or(linear, |m| m.transpose());

        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(mesh.vertices.len())
            .map_err(|e| RenderError::BufferAllocation(format!("vertex stream: {e}")))?;
        vertices.extend(mesh.vertices.iter().map(|v| {
            let local = v.position_vec().push(1.0);
            let color = match &shading {
                Some(ctx) => {
                    let world = model * local;
                    let position = if world.w == 0.0 { world.xyz() } else { world.xyz() / world.w };
                    let normal = (normal_matrix * v.normal_vec())
                        .try_normalize(f32::EPSILON)
                        .unwrap_or_else(Vec3::zeros);
                    ctx.shade(material, &position, &normal)
                }
                None => state.flat_color,
            };
            ClipVertex {
                clip: mvp * local,
                color,
            }
        }));

        let mut stats = RasterStats::default();
        for tri in mesh.indices.chunks_exact(3) {
            let (Some(a), Some(b), Some(c)) = (
                vertices.get(tri[0] as usize),
                vertices.get(tri[1] as usize),
                vertices.get(tri[2] as usize),
            ) else {
                log::warn!("Skipping triangle with out-of-range index {:?}", tri);
                continue;
            };
            stats += rasterizer::draw_triangle(&mut self.framebuffer, &state, [*a, *b, *c]);
        }
        log::trace!(
            "draw_mesh: {} triangles, {} culled, {} fragments",
            stats.triangles,
            stats.culled,
            stats.fragments
        );
        self.stats += stats;
        Ok(())
    }

    fn accumulate(&mut self, weight: f32) {
        self.framebuffer.accumulate(weight);
    }

    fn resolve_accumulation(&mut self, scale: f32) {
        self.framebuffer.resolve(scale);
    }

    fn color_snapshot(&self) -> ColorSnapshot {
        self.framebuffer.color_snapshot()
    }

    fn depth_snapshot(&self) -> DepthSnapshot {
        self.framebuffer.depth_snapshot()
    }
}
