//! Public rendering API
//!
//! The render backend trait and the readback types it produces.

pub mod frame_data;
pub mod render_backend;

#[cfg(test)]
pub(crate) mod recording;

// Re-export commonly used types
pub use frame_data::{ColorSnapshot, DepthSnapshot};
pub use render_backend::{BackendResult, ClearFlags, RenderBackend};
