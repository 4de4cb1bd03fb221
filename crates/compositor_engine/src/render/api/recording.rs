//! Call-recording backend for pass tests

use crate::foundation::math::Mat4;
use crate::render::api::frame_data::{ColorSnapshot, DepthSnapshot};
use crate::render::api::render_backend::{BackendResult, ClearFlags, RenderBackend};
use crate::render::lighting::Light;
use crate::render::material::Material;
use crate::render::pipeline::PipelineState;
use crate::render::primitives::Mesh;
use crate::render::RenderError;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Clear(ClearFlags),
    SetPipeline(PipelineState),
    SetViewProjection { view: Mat4, projection: Mat4 },
    Push,
    Pop,
    Multiply(Mat4),
    SetLight(Light),
    Draw {
        state: PipelineState,
        model: Mat4,
        light: Light,
        alpha: f32,
        triangles: usize,
    },
    Accumulate(f32),
    Resolve(f32),
}

/// Backend that renders nothing and remembers every call
pub(crate) struct RecordingBackend {
    pub calls: Vec<Call>,
    state: PipelineState,
    stack: Vec<Mat4>,
    view: Mat4,
    light: Light,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            state: PipelineState::default(),
            stack: vec![Mat4::identity()],
            view: Mat4::identity(),
            light: Light::default(),
        }
    }

    pub fn draws(&self) -> impl Iterator<Item = (&PipelineState, &Mat4, &Light, f32)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            Call::Draw { state, model, light, alpha, .. } => Some((state, model, light, *alpha)),
            _ => None,
        })
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }
}

impl RenderBackend for RecordingBackend {
    fn extent(&self) -> (u32, u32) {
        (64, 48)
    }

    fn set_clear_color(&mut self, _color: [f32; 4]) {}

    fn clear(&mut self, flags: ClearFlags) {
        self.calls.push(Call::Clear(flags));
    }

    fn pipeline_state(&self) -> PipelineState {
        self.state
    }

    fn set_pipeline_state(&mut self, state: PipelineState) {
        self.state = state;
        self.calls.push(Call::SetPipeline(state));
    }

    fn set_view_projection(&mut self, view: Mat4, projection: Mat4) {
        self.view = view;
        self.calls.push(Call::SetViewProjection { view, projection });
    }

    fn view_matrix(&self) -> Mat4 {
        self.view
    }

    fn push_matrix(&mut self) {
        let top = self.current_matrix();
        self.stack.push(top);
        self.calls.push(Call::Push);
    }

    fn pop_matrix(&mut self) -> BackendResult<()> {
        if self.stack.len() <= 1 {
            return Err(RenderError::MatrixStackUnderflow);
        }
        self.stack.pop();
        self.calls.push(Call::Pop);
        Ok(())
    }

    fn multiply_matrix(&mut self, matrix: &Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top *= matrix;
        }
        self.calls.push(Call::Multiply(*matrix));
    }

    fn current_matrix(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or_else(Mat4::identity)
    }

    fn light(&self) -> Light {
        self.light
    }

    fn set_light(&mut self, light: Light) {
        self.light = light;
        self.calls.push(Call::SetLight(light));
    }

    fn draw_mesh(&mut self, mesh: &Mesh, transform: &Mat4, material: &Material) -> BackendResult<()> {
        self.calls.push(Call::Draw {
            state: self.state,
            model: self.current_matrix() * transform,
            light: self.light,
            alpha: material.alpha(),
            triangles: mesh.triangle_count(),
        });
        Ok(())
    }

    fn accumulate(&mut self, weight: f32) {
        self.calls.push(Call::Accumulate(weight));
    }

    fn resolve_accumulation(&mut self, scale: f32) {
        self.calls.push(Call::Resolve(scale));
    }

    fn color_snapshot(&self) -> ColorSnapshot {
        ColorSnapshot { width: 0, height: 0, pixels: Vec::new() }
    }

    fn depth_snapshot(&self) -> DepthSnapshot {
        DepthSnapshot { width: 0, height: 0, depth: Vec::new() }
    }
}
