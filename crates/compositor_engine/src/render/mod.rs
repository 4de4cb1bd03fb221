//! # Rendering System
//!
//! Fixed-function rendering for the frame compositor.
//!
//! ## Architecture
//!
//! - **api**: the `RenderBackend` trait the passes are written against, and
//!   read-only snapshots of the frame
//! - **backends**: the CPU `SoftwareDevice` implementing that trait
//! - **compositor**: stencil mask, reflection, shadow and direct passes, and
//!   the jittered accumulation loop tying them together
//! - **pipeline**: the device state every pass toggles and restores
//! - **primitives / material / lighting**: meshes, camera, fixed-function
//!   materials and the single scene light
//! - **capture**: PNG export of color and depth
//!
//! ## Error Model
//!
//! Pipeline state changes cannot fail. Running out of memory, popping an
//! empty matrix stack and asking for an unsupported sample count are
//! `RenderError`s and abandon the frame being drawn.

pub mod api;
pub mod backends;
pub mod capture;
pub mod compositor;
pub mod lighting;
pub mod material;
pub mod pipeline;
pub mod primitives;

pub use api::{BackendResult, ClearFlags, ColorSnapshot, DepthSnapshot, RenderBackend};
pub use backends::software::SoftwareDevice;
pub use compositor::{CompositorParams, FrameCompositor, Plane};
pub use lighting::Light;
pub use material::Material;
pub use pipeline::{BlendMode, CompareFunc, CullMode, DepthBiasConfig, PipelineState, StencilOp, StencilState};
pub use primitives::{Camera, Mesh, Vertex};

use thiserror::Error;

/// High-level rendering error types
#[derive(Error, Debug)]
pub enum RenderError {
    /// A frame, depth, stencil or accumulation buffer could not be allocated
    #[error("Buffer allocation failed: {0}")]
    BufferAllocation(String),

    /// `pop_matrix` with only the base matrix left
    #[error("Matrix stack underflow")]
    MatrixStackUnderflow,

    /// No jitter table exists for this many samples
    #[error("Unsupported accumulation sample count {0} (expected 1, 2, 3, 4 or 8)")]
    UnsupportedSampleCount(usize),

    /// Zero-sized viewport
    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// PNG encoding failed
    #[error("Frame capture failed: {0}")]
    Capture(#[from] image::ImageError),

    /// Filesystem error while writing a capture
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
