//! Headless showcase session
//!
//! Owns every piece of session state and applies input events to it the way
//! an interactive front end would, then renders through the software device
//! and writes captures to disk.

use std::path::{Path, PathBuf};

use compositor_engine::core::{CompositorConfig, ConfigError, FramePacer};
use compositor_engine::input::{CameraController, DragTracker, InputEvent, MouseButton};
use compositor_engine::render::backends::software::RasterStats;
use compositor_engine::render::{capture, Camera, FrameCompositor, RenderError, SoftwareDevice};
use compositor_engine::scene::{GeometryProvider, ReceivingSurface, ShowcaseScene};
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is out of range
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A frame or capture failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Bad command line
    #[error("Usage: {0}")]
    Usage(String),
}

/// Scripted session parameters
#[derive(Debug, Clone)]
pub struct SessionPlan {
    /// Frames to render
    pub frames: u32,
    /// Capture every this many frames; 0 captures only the last one
    pub capture_every: u32,
    /// Horizontal right-drag per frame, in pixels
    pub orbit_pixels_per_frame: i32,
}

impl Default for SessionPlan {
    fn default() -> Self {
        Self {
            frames: 120,
            capture_every: 30,
            orbit_pixels_per_frame: 4,
        }
    }
}

/// The showcase application state
pub struct ShowcaseApp {
    device: SoftwareDevice,
    compositor: FrameCompositor,
    surface: ReceivingSurface,
    scene: ShowcaseScene,
    pacer: FramePacer,
    controller: CameraController,
    camera: Camera,
    drag: DragTracker,
    output_dir: PathBuf,
    rendered: RasterStats,
    quit: bool,
}

impl ShowcaseApp {
    /// Build the session from a validated configuration
    pub fn new(config: &CompositorConfig, output_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        config.validate()?;

        let device = SoftwareDevice::new(config.viewport.width, config.viewport.height)?
            .with_global_ambient(config.light.global_ambient);
        let controller = config.camera_controller();
        let mut camera = config.camera();
        controller.apply_to(&mut camera);

        log::info!(
            "Showcase: {}x{}, {} samples, dof {:.3}, focus {:.2}",
            config.viewport.width,
            config.viewport.height,
            config.accumulation.samples,
            config.accumulation.dof_radius,
            config.accumulation.focus_depth
        );

        Ok(Self {
            device,
            compositor: config.compositor()?,
            surface: config.surface(),
            scene: ShowcaseScene::new(),
            pacer: config.pacer(),
            controller,
            camera,
            drag: DragTracker::new(),
            output_dir: output_dir.into(),
            rendered: RasterStats::default(),
            quit: false,
        })
    }

    /// Where captures are written
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether a quit event arrived
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// React to one input event
    pub fn handle_event(&mut self, event: InputEvent) -> Result<(), AppError> {
        if event.is_camera_event() {
            if self.controller.handle_event(&event) {
                self.controller.apply_to(&mut self.camera);
            }
            return Ok(());
        }

        match event {
            InputEvent::Restart => {
                self.scene.restart();
                self.pacer.reset_frame_count();
            }
            InputEvent::Step => self.pacer.step_once(&mut self.scene),
            InputEvent::Run => self.pacer.run(),
            InputEvent::Pause => self.pacer.pause(),
            InputEvent::Quit => {
                log::info!("Quit requested");
                self.quit = true;
            }
            InputEvent::CaptureColor => {
                capture::capture_color_frame(&self.device, &self.output_dir, self.pacer.frame())?;
            }
            InputEvent::CaptureDepth => {
                capture::capture_depth_frame(&self.device, &self.output_dir, self.pacer.frame())?;
            }
            InputEvent::Pan { .. } | InputEvent::Zoom { .. } | InputEvent::ResetCamera => {}
        }
        Ok(())
    }

    /// Advance the simulation if running and render one frame
    pub fn frame(&mut self) -> Result<(), AppError> {
        self.pacer.tick(&mut self.scene);
        self.compositor.render_frame(
            &mut self.device,
            &self.camera,
            &self.surface,
            self.scene.current_instances(),
        )?;

        let stats = self.device.stats();
        log::debug!(
            "Frame {}: {} triangles, {} culled, {} fragments",
            self.pacer.frame(),
            stats.triangles,
            stats.culled,
            stats.fragments
        );
        self.rendered += stats;
        self.device.reset_stats();
        Ok(())
    }

    /// Rasterizer totals over every frame rendered so far
    pub fn rendered(&self) -> RasterStats {
        self.rendered
    }

    /// Capture whatever the depth toggle selects
    fn capture_current(&mut self) -> Result<(), AppError> {
        let event = if self.compositor.params.show_depth {
            InputEvent::CaptureDepth
        } else {
            InputEvent::CaptureColor
        };
        self.handle_event(event)
    }

    /// Run a scripted session: a slow right-drag orbit with periodic captures
    pub fn run_script(&mut self, plan: &SessionPlan) -> Result<(), AppError> {
        log::info!(
            "Running {} frames, capturing into {}",
            plan.frames,
            self.output_dir.display()
        );

        let (mut x, y) = (320, 240);
        self.drag.button(MouseButton::Right, true, x, y);

        for i in 0..plan.frames {
            if self.should_quit() {
                break;
            }
            x += plan.orbit_pixels_per_frame;
            for event in self.drag.motion(x, y) {
                self.handle_event(event)?;
            }

            self.frame()?;

            let last = i + 1 == plan.frames;
            let due = plan.capture_every > 0 && (i + 1) % plan.capture_every == 0;
            if due || last {
                self.capture_current()?;
            }
        }
        self.drag.button(MouseButton::Right, false, x, y);

        let stats = self.pacer.stats();
        log::info!(
            "Session done: {} steps, {:.2} ms average busy, {} over budget",
            stats.frames(),
            stats.average_busy_millis(),
            stats.overruns()
        );
        log::info!(
            "Rasterized {} triangles into {} fragments",
            self.rendered.triangles,
            self.rendered.fragments
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> CompositorConfig {
        let mut config = CompositorConfig::default();
        config.viewport.width = 64;
        config.viewport.height = 48;
        config.accumulation.samples = 1;
        config
    }

    #[test]
    fn test_frame_counters_roll_into_session_totals() {
        let mut app = ShowcaseApp::new(&small_config(), "captures").unwrap();
        assert_eq!(app.rendered(), RasterStats::default());

        app.frame().unwrap();
        let first = app.rendered();
        assert!(first.triangles > 0);
        assert!(first.fragments > 0);
        assert_eq!(app.device.stats(), RasterStats::default());

        app.frame().unwrap();
        assert!(app.rendered().triangles > first.triangles);
        assert_eq!(app.device.stats(), RasterStats::default());
    }
}
