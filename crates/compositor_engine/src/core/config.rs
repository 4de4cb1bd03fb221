//! # Compositor Configuration
//!
//! Everything the showcase reads at startup, grouped by subsystem and
//! loadable from TOML or RON through the [`Config`] trait. Missing sections
//! and fields fall back to the defaults of the demo scene.
//!
//! ```toml
//! clear_color = [0.2, 0.2, 0.2, 1.0]
//! reflection_opacity = 0.1
//!
//! [viewport]
//! width = 640
//! height = 480
//!
//! [accumulation]
//! samples = 8
//! dof_radius = 0.1
//! ```

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Vec3, Vec4};
use crate::input::{CameraBounds, CameraController, CameraState};
use crate::render::compositor::params::{DOF_RANGE, FOCUS_RANGE};
use crate::render::compositor::{
    CompositorParams, FrameCompositor, JitteredAccumulator, ReflectionPass, ShadowPass, SUPPORTED_COUNTS,
};
use crate::render::lighting::{Light, DEFAULT_GLOBAL_AMBIENT};
use crate::render::primitives::Camera;
use crate::scene::{AxisGizmo, ReceivingSurface};

use super::pacer::FramePacer;

pub use crate::config::{Config, ConfigError};

/// Output size and lens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Framebuffer width in pixels
    pub width: u32,
    /// Framebuffer height in pixels
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fov_degrees: 70.0,
            near: 0.01,
            far: 100.0,
        }
    }
}

impl ViewportConfig {
    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Jittered accumulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccumulationConfig {
    /// Sub-frames per frame; one of 1, 2, 3, 4, 8
    pub samples: usize,
    /// Depth-of-field eye displacement
    pub dof_radius: f32,
    /// World z of the focal plane
    pub focus_depth: f32,
    /// Shift the projection by the sub-pixel offset as well
    pub subpixel_jitter: bool,
}

impl Default for AccumulationConfig {
    fn default() -> Self {
        Self {
            samples: 8,
            dof_radius: 0.1,
            focus_depth: 0.0,
            subpixel_jitter: true,
        }
    }
}

/// Camera home pose, bounds and input rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Zoom input to distance factor
    pub zoom_rate: f32,
    /// Pan input to world units
    pub pan_sensitivity: f32,
    /// Pose at startup and after a reset
    pub home: CameraState,
    /// Admissible boxes and zoom range
    pub bounds: CameraBounds,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom_rate: 0.03,
            pan_sensitivity: 0.01,
            home: CameraState::default(),
            bounds: CameraBounds::default(),
        }
    }
}

/// The single scene light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Homogeneous position; `w` must be 1
    pub position: Vec4,
    /// Global ambient term
    pub global_ambient: [f32; 4],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: Vec4::new(15.0, 15.0, 15.0, 1.0),
            global_ambient: DEFAULT_GLOBAL_AMBIENT,
        }
    }
}

/// Checkerboard receiving surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    /// Tile size along X
    pub tile_width: f32,
    /// Tile size along Z
    pub tile_depth: f32,
    /// Tiles along X
    pub tiles_wide: u32,
    /// Tiles along Z
    pub tiles_deep: u32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            tile_width: 1.0,
            tile_depth: 1.0,
            tiles_wide: 24,
            tiles_deep: 28,
        }
    }
}

/// Simulation pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Seconds per simulation step
    pub fixed_dt: f32,
    /// Start with stepping paused
    pub start_paused: bool,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            start_paused: false,
        }
    }
}

/// Complete compositor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Background color
    pub clear_color: [f32; 4],
    /// Alpha multiplier of the mirrored scene
    pub reflection_opacity: f32,
    /// Alpha of the shadow decal
    pub shadow_opacity: f32,
    /// Draw the coordinate-axis gizmo
    pub show_axes: bool,
    /// Output size and lens
    pub viewport: ViewportConfig,
    /// Accumulation settings
    pub accumulation: AccumulationConfig,
    /// Camera settings
    pub camera: CameraConfig,
    /// Light settings
    pub light: LightConfig,
    /// Floor settings
    pub floor: FloorConfig,
    /// Pacing settings
    pub pacing: PacingConfig,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.2, 0.2, 1.0],
            reflection_opacity: 0.1,
            shadow_opacity: 0.5,
            show_axes: true,
            viewport: ViewportConfig::default(),
            accumulation: AccumulationConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            floor: FloorConfig::default(),
            pacing: PacingConfig::default(),
        }
    }
}

impl Config for CompositorConfig {}

impl CompositorConfig {
    /// Check every value against its admissible range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let v = &self.viewport;
        if v.width == 0 || v.height == 0 {
            return invalid(format!("viewport must be non-empty, got {}x{}", v.width, v.height));
        }
        if !(v.fov_degrees > 0.0 && v.fov_degrees < 180.0) {
            return invalid(format!("fov_degrees must be in (0, 180), got {}", v.fov_degrees));
        }
        if !(v.near > 0.0 && v.far > v.near) {
            return invalid(format!("clip range must satisfy 0 < near < far, got {}..{}", v.near, v.far));
        }

        let a = &self.accumulation;
        if !SUPPORTED_COUNTS.contains(&a.samples) {
            return invalid(format!("samples must be one of {:?}, got {}", SUPPORTED_COUNTS, a.samples));
        }
        if !DOF_RANGE.contains(&a.dof_radius) {
            return invalid(format!("dof_radius must be in {:?}, got {}", DOF_RANGE, a.dof_radius));
        }
        if !FOCUS_RANGE.contains(&a.focus_depth) {
            return invalid(format!("focus_depth must be in {:?}, got {}", FOCUS_RANGE, a.focus_depth));
        }

        let c = &self.camera;
        let b = &c.bounds;
        if !(b.min_distance > 0.0 && b.max_distance > b.min_distance) {
            return invalid(format!(
                "zoom range must satisfy 0 < min < max, got {}..{}",
                b.min_distance, b.max_distance
            ));
        }
        if (0..3).any(|i| b.position_min[i] > b.position_max[i] || b.target_min[i] > b.target_max[i]) {
            return invalid("camera bound boxes have min above max".to_string());
        }
        let home = b.clamp(&c.home);
        if !b.distance_in_range(home.distance()) {
            return invalid(format!(
                "home pose distance {:.3} is outside the zoom range",
                home.distance()
            ));
        }
        if !(c.zoom_rate > 0.0 && c.pan_sensitivity > 0.0) {
            return invalid("zoom_rate and pan_sensitivity must be positive".to_string());
        }

        if self.light.position.w != 1.0 {
            return invalid(format!(
                "light must be positional (w = 1), got w = {}",
                self.light.position.w
            ));
        }

        let f = &self.floor;
        if f.tiles_wide == 0 || f.tiles_deep == 0 || !(f.tile_width > 0.0 && f.tile_depth > 0.0) {
            return invalid("floor needs at least one tile of positive size".to_string());
        }

        if !(self.pacing.fixed_dt > 0.0) {
            return invalid(format!("fixed_dt must be positive, got {}", self.pacing.fixed_dt));
        }
        for (name, value) in [
            ("reflection_opacity", self.reflection_opacity),
            ("shadow_opacity", self.shadow_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!("{name} must be in [0, 1], got {value}"));
            }
        }
        Ok(())
    }

    /// Render camera at the home pose
    pub fn camera(&self) -> Camera {
        let v = &self.viewport;
        let mut camera = Camera::perspective(self.camera.home.position, v.fov_degrees, v.aspect(), v.near, v.far);
        camera.look_at(self.camera.home.target, Vec3::y());
        camera
    }

    /// Camera controller at the home pose
    pub fn camera_controller(&self) -> CameraController {
        let mut controller = CameraController::new(self.camera.home, self.camera.bounds);
        controller.zoom_rate = self.camera.zoom_rate;
        controller.pan_sensitivity = self.camera.pan_sensitivity;
        controller
    }

    /// Compositor with every pass configured
    pub fn compositor(&self) -> Result<FrameCompositor, ConfigError> {
        let a = &self.accumulation;
        let params = CompositorParams::new(a.samples, a.dof_radius, a.focus_depth)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let light = Light {
            position: self.light.position,
            ..Light::default()
        };

        Ok(FrameCompositor {
            params,
            accumulator: JitteredAccumulator {
                subpixel_jitter: a.subpixel_jitter,
            },
            reflection: ReflectionPass::new(self.reflection_opacity),
            shadow: ShadowPass::with_opacity(self.shadow_opacity),
            light,
            clear_color: self.clear_color,
            axes: self.show_axes.then(AxisGizmo::default),
            ..FrameCompositor::default()
        })
    }

    /// Floor described by the floor section
    pub fn surface(&self) -> ReceivingSurface {
        let f = &self.floor;
        ReceivingSurface::checkerboard(f.tile_width, f.tile_depth, f.tiles_wide, f.tiles_deep)
    }

    /// Pacer described by the pacing section
    pub fn pacer(&self) -> FramePacer {
        let mut pacer = FramePacer::from_secs(self.pacing.fixed_dt);
        if self.pacing.start_paused {
            pacer.pause();
        }
        pacer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = CompositorConfig::default();
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.viewport.aspect(), 4.0 / 3.0);

        let compositor = config.compositor().unwrap();
        assert_eq!(compositor.params.samples(), 8);
        assert_eq!(compositor.light.position, Vec4::new(15.0, 15.0, 15.0, 1.0));
        assert_eq!(compositor.reflection.opacity, 0.1);
        assert_eq!(compositor.shadow.color[3], 0.5);
        assert_eq!(compositor.axes.as_ref().map(|a| a.instances().len()), Some(6));

        let camera = config.camera();
        assert_eq!(camera.target, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(config.surface().half_extent(), (12.0, 14.0));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let text = r#"
            reflection_opacity = 0.25

            [viewport]
            width = 320
            height = 240

            [accumulation]
            samples = 4
            focus_depth = 2.0

            [camera.home]
            position = [1.0, 2.0, 10.0]
            target = [0.0, 1.0, 0.0]
        "#;
        let config = CompositorConfig::from_str_with(text, ConfigFormat::Toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.viewport.width, 320);
        assert_eq!(config.viewport.fov_degrees, 70.0);
        assert_eq!(config.accumulation.samples, 4);
        assert_eq!(config.accumulation.dof_radius, 0.1);
        assert_eq!(config.camera.home.position, Vec3::new(1.0, 2.0, 10.0));
        assert_eq!(config.camera.bounds, CameraBounds::default());
        assert_eq!(config.reflection_opacity, 0.25);
        assert!(config.show_axes);

        let hidden = CompositorConfig::from_str_with("show_axes = false", ConfigFormat::Toml).unwrap();
        assert!(hidden.compositor().unwrap().axes.is_none());
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = CompositorConfig::default();
        config.accumulation.samples = 3;
        config.pacing.start_paused = true;
        let text = config.to_string_with(ConfigFormat::Ron).unwrap();
        let back = CompositorConfig::from_str_with(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(back, config);
        assert!(back.pacer().is_paused());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = CompositorConfig::default();
        config.accumulation.samples = 5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = CompositorConfig::default();
        config.light.position.w = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = CompositorConfig::default();
        config.camera.bounds.max_distance = 5.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = CompositorConfig::default();
        config.viewport.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = CompositorConfig::default();
        config.shadow_opacity = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("compositor_config_{}.toml", std::process::id()));
        let mut config = CompositorConfig::default();
        config.floor.tiles_wide = 10;
        config.save_to_file(&path).unwrap();
        let loaded = CompositorConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.floor.tiles_wide, 10);
        let _ = std::fs::remove_file(&path);
    }
}
