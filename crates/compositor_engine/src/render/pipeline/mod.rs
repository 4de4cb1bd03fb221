//! Pipeline state definitions
//!
//! Depth, stencil, culling, blending and lighting switches shared by every
//! backend and manipulated by the compositor passes.

pub mod pipeline_config;

pub use pipeline_config::{
    BlendMode, CompareFunc, CullMode, DepthBiasConfig, PipelineState, StencilOp, StencilState,
};
