//! Scene content consumed by the compositor
//!
//! A scene is anything that can advance by a fixed step and then list what
//! to draw. The compositor never mutates instances; it re-reads the same
//! list for every jitter sample of a step.
//!
//! ```text
//! FramePacer ── update(dt) ──> GeometryProvider ── current_instances() ──> FrameCompositor
//! ```

mod axes;
mod floor;
mod renderable_object;
mod showcase;

pub use axes::{Arrow, AxisGizmo, AXIS_ARROWS};
pub use floor::{ReceivingSurface, FLOOR_COLORS};
pub use renderable_object::RenderableInstance;
pub use showcase::{ShowcaseScene, SHOWCASE_MATERIALS};

/// Source of per-step geometry
pub trait GeometryProvider {
    /// Advance the simulation by a fixed `dt` seconds
    fn update(&mut self, dt: f32);

    /// Instances to draw for the current step
    fn current_instances(&self) -> &[RenderableInstance];
}
