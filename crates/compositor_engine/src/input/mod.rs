//! Input vocabulary and camera control
//!
//! Raw key presses and mouse drags are turned into `InputEvent`s, which the
//! application applies to the camera, the pacer and the scene before the
//! next frame is rendered.

pub mod camera_controller;

pub use camera_controller::{CameraBounds, CameraController, CameraState};

/// Zoom input per pixel of vertical middle-button drag
pub const ZOOM_PER_PIXEL: f32 = 0.1;

/// Everything the application reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Slide the camera across the view plane
    Pan {
        /// Horizontal drag in pixels
        dx: f32,
        /// Vertical drag in pixels, positive downward
        dy: f32,
    },
    /// Move the camera along its view axis
    Zoom {
        /// Positive moves closer
        delta: f32,
    },
    /// Camera back to its home pose
    ResetCamera,
    /// Restart the simulation
    Restart,
    /// Pause and advance one step
    Step,
    /// Resume continuous stepping
    Run,
    /// Stop continuous stepping
    Pause,
    /// Leave the application
    Quit,
    /// Save the color buffer
    CaptureColor,
    /// Save the depth buffer
    CaptureDepth,
}

impl InputEvent {
    /// Event bound to a key, if any
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::S => Some(Self::CaptureColor),
            KeyCode::D => Some(Self::CaptureDepth),
            KeyCode::R => Some(Self::Restart),
            KeyCode::Escape => Some(Self::Quit),
            _ => None,
        }
    }

    /// Whether the event changes the camera
    pub fn is_camera_event(&self) -> bool {
        matches!(self, Self::Pan { .. } | Self::Zoom { .. } | Self::ResetCamera)
    }
}

impl CameraController {
    /// Apply a camera event; returns whether the pose changed
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Pan { dx, dy } => self.pan(dx, dy),
            InputEvent::Zoom { delta } => self.zoom(delta),
            InputEvent::ResetCamera => {
                self.reset();
                true
            }
            _ => false,
        }
    }
}

/// Keys with a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// D key
    D,
    /// R key
    R,
    /// S key
    S,
    /// Escape key
    Escape,
    /// Any other key
    Other,
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        match c.to_ascii_lowercase() {
            'd' => Self::D,
            'r' => Self::R,
            's' => Self::S,
            '\u{1b}' => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Turns button-held mouse motion into camera events
///
/// Middle drag zooms by `dy * 0.1`, right drag pans by the pixel delta.
/// Each motion report is measured from the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragTracker {
    zoom_anchor: Option<(i32, i32)>,
    pan_anchor: Option<(i32, i32)>,
}

impl DragTracker {
    /// Create a tracker with no drag in progress
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a button press or release at (`x`, `y`)
    pub fn button(&mut self, button: MouseButton, pressed: bool, x: i32, y: i32) {
        let anchor = pressed.then_some((x, y));
        match button {
            MouseButton::Middle => self.zoom_anchor = anchor,
            MouseButton::Right => self.pan_anchor = anchor,
            MouseButton::Left => {}
        }
    }

    /// Report pointer motion; returns the camera events it produced
    pub fn motion(&mut self, x: i32, y: i32) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if let Some(anchor) = self.zoom_anchor.as_mut() {
            let (_, y0) = std::mem::replace(anchor, (x, y));
            events.push(InputEvent::Zoom {
                delta: (y - y0) as f32 * ZOOM_PER_PIXEL,
            });
        }
        if let Some(anchor) = self.pan_anchor.as_mut() {
            let (x0, y0) = std::mem::replace(anchor, (x, y));
            events.push(InputEvent::Pan {
                dx: (x - x0) as f32,
                dy: (y - y0) as f32,
            });
        }
        events
    }

    /// Whether any drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.zoom_anchor.is_some() || self.pan_anchor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_key_bindings() {
        assert_eq!(InputEvent::from_key(KeyCode::from('s')), Some(InputEvent::CaptureColor));
        assert_eq!(InputEvent::from_key(KeyCode::from('D')), Some(InputEvent::CaptureDepth));
        assert_eq!(InputEvent::from_key(KeyCode::from('r')), Some(InputEvent::Restart));
        assert_eq!(InputEvent::from_key(KeyCode::from('\u{1b}')), Some(InputEvent::Quit));
        assert_eq!(InputEvent::from_key(KeyCode::from('x')), None);
    }

    #[test]
    fn test_middle_drag_zooms() {
        let mut drag = DragTracker::new();
        assert!(drag.motion(10, 10).is_empty());

        drag.button(MouseButton::Middle, true, 100, 200);
        let events = drag.motion(100, 230);
        assert_eq!(events.len(), 1);
        match events[0] {
            InputEvent::Zoom { delta } => assert_relative_eq!(delta, 3.0),
            other => panic!("unexpected {other:?}"),
        }

        // Measured from the last report, not the press
        let events = drag.motion(100, 220);
        assert_eq!(events, vec![InputEvent::Zoom { delta: -1.0 }]);

        drag.button(MouseButton::Middle, false, 100, 220);
        assert!(!drag.is_dragging());
        assert!(drag.motion(0, 0).is_empty());
    }

    #[test]
    fn test_right_drag_pans() {
        let mut drag = DragTracker::new();
        drag.button(MouseButton::Right, true, 5, 5);
        assert_eq!(drag.motion(8, 1), vec![InputEvent::Pan { dx: 3.0, dy: -4.0 }]);
        drag.button(MouseButton::Left, true, 0, 0);
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_controller_handles_camera_events() {
        let mut controller = CameraController::default();
        assert!(InputEvent::Zoom { delta: 2.0 }.is_camera_event());
        assert!(!InputEvent::Quit.is_camera_event());

        assert!(controller.handle_event(&InputEvent::Zoom { delta: 2.0 }));
        assert!(controller.state().distance() < CameraState::default().distance());
        assert!(!controller.handle_event(&InputEvent::Restart));
        assert!(controller.handle_event(&InputEvent::ResetCamera));
        assert_eq!(*controller.state(), CameraState::default());
    }
}
