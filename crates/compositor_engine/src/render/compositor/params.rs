//! Live-tunable compositor parameters
//!
//! The debug surface of the renderer: sample count, depth-of-field radius,
//! focal depth and the depth-view toggle. Setters clamp to the ranges the
//! tuning sliders expose.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::render::{RenderError, RenderResult};

use super::jitter::{JitterTable, SUPPORTED_COUNTS};

/// Admissible depth-of-field radius
pub const DOF_RANGE: RangeInclusive<f32> = 0.0..=0.2;

/// Admissible focal plane depth
pub const FOCUS_RANGE: RangeInclusive<f32> = -5.0..=3.5;

/// Parameters read by every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorParams {
    samples: usize,
    dof_radius: f32,
    focus_depth: f32,

    /// Show the depth buffer instead of the color image
    pub show_depth: bool,
}

impl Default for CompositorParams {
    fn default() -> Self {
        Self {
            samples: 8,
            dof_radius: 0.1,
            focus_depth: 0.0,
            show_depth: false,
        }
    }
}

impl CompositorParams {
    /// Parameters with the given values, clamped like the setters
    ///
    /// Fails only for an unsupported sample count.
    pub fn new(samples: usize, dof_radius: f32, focus_depth: f32) -> RenderResult<Self> {
        Self {
            samples,
            dof_radius,
            focus_depth,
            show_depth: false,
        }
        .sanitized()
    }

    /// Jitter samples per frame
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Eye displacement radius
    pub fn dof_radius(&self) -> f32 {
        self.dof_radius
    }

    /// World z of the in-focus plane
    pub fn focus_depth(&self) -> f32 {
        self.focus_depth
    }

    /// Jitter table for the current sample count
    pub fn jitter_table(&self) -> RenderResult<JitterTable> {
        JitterTable::for_count(self.samples)
    }

    /// Change the sample count; unsupported counts are rejected and leave
    /// the current value in place
    pub fn set_samples(&mut self, samples: usize) -> RenderResult<()> {
        if !SUPPORTED_COUNTS.contains(&samples) {
            return Err(RenderError::UnsupportedSampleCount(samples));
        }
        self.samples = samples;
        Ok(())
    }

    /// Set the depth-of-field radius, clamped into [`DOF_RANGE`]
    pub fn set_dof_radius(&mut self, radius: f32) {
        self.dof_radius = clamp_into(radius, &DOF_RANGE);
    }

    /// Set the focal depth, clamped into [`FOCUS_RANGE`]
    pub fn set_focus_depth(&mut self, focus: f32) {
        self.focus_depth = clamp_into(focus, &FOCUS_RANGE);
    }

    /// Flip between color and depth display
    pub fn toggle_depth_view(&mut self) {
        self.show_depth = !self.show_depth;
    }

    /// Re-apply every range; used after deserializing
    pub fn sanitized(mut self) -> RenderResult<Self> {
        let samples = self.samples;
        self.set_samples(samples)?;
        self.set_dof_radius(self.dof_radius);
        self.set_focus_depth(self.focus_depth);
        Ok(self)
    }
}

fn clamp_into(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = CompositorParams::default();
        assert_eq!(params.samples(), 8);
        assert_eq!(params.dof_radius(), 0.1);
        assert_eq!(params.focus_depth(), 0.0);
        assert!(!params.show_depth);
        assert_eq!(params.jitter_table().unwrap().len(), 8);
    }

    #[test]
    fn test_setters_clamp_to_slider_ranges() {
        let mut params = CompositorParams::default();
        params.set_dof_radius(1.0);
        assert_eq!(params.dof_radius(), 0.2);
        params.set_dof_radius(-0.5);
        assert_eq!(params.dof_radius(), 0.0);
        params.set_dof_radius(f32::NAN);
        assert_eq!(params.dof_radius(), 0.0);

        params.set_focus_depth(10.0);
        assert_eq!(params.focus_depth(), 3.5);
        params.set_focus_depth(-10.0);
        assert_eq!(params.focus_depth(), -5.0);
        params.set_focus_depth(1.25);
        assert_eq!(params.focus_depth(), 1.25);
    }

    #[test]
    fn test_unsupported_sample_count_keeps_previous() {
        let mut params = CompositorParams::default();
        assert!(params.set_samples(4).is_ok());
        assert!(matches!(
            params.set_samples(6),
            Err(RenderError::UnsupportedSampleCount(6))
        ));
        assert_eq!(params.samples(), 4);
    }

    #[test]
    fn test_new_clamps_and_rejects() {
        let params = CompositorParams::new(4, 0.5, -9.0).unwrap();
        assert_eq!(params.samples(), 4);
        assert_eq!(params.dof_radius(), 0.2);
        assert_eq!(params.focus_depth(), -5.0);
        assert!(!params.show_depth);

        assert!(matches!(
            CompositorParams::new(7, 0.1, 0.0),
            Err(RenderError::UnsupportedSampleCount(7))
        ));
    }

    #[test]
    fn test_sanitized_repairs_deserialized_values() {
        let loaded: CompositorParams =
            ron::from_str("(samples: 2, dof_radius: 3.0, focus_depth: 7.0, show_depth: true)").unwrap();
        let params = loaded.sanitized().unwrap();
        assert_eq!(params.dof_radius(), 0.2);
        assert_eq!(params.focus_depth(), 3.5);
        assert!(params.show_depth);

        let bad: CompositorParams = ron::from_str("(samples: 6)").unwrap();
        assert!(bad.sanitized().is_err());
    }

    #[test]
    fn test_toggle_depth_view() {
        let mut params = CompositorParams::default();
        params.toggle_depth_view();
        assert!(params.show_depth);
        params.toggle_depth_view();
        assert!(!params.show_depth);
    }
}
