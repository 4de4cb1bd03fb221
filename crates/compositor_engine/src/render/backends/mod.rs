//! Backend implementations for the render module
//!
//! The software device is the reference implementation of `RenderBackend`;
//! it runs headless and makes every buffer observable.

/// CPU rendering backend implementation
pub mod software;
