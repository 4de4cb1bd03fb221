//! # Core Module
//!
//! Session-level pieces shared by every frame.
//!
//! ## Organization
//!
//! - **Config**: the `CompositorConfig` file format and the builders turning
//!   it into a camera, compositor, floor and pacer
//! - **Pacer**: fixed-timestep stepping with run / pause / single-step

pub mod config;
pub mod pacer;

pub use config::{
    AccumulationConfig, CameraConfig, CompositorConfig, Config, ConfigError, FloorConfig, LightConfig,
    PacingConfig, ViewportConfig,
};
pub use pacer::{FramePacer, DEFAULT_FIXED_DT};
