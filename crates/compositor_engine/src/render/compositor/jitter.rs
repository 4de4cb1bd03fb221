//! Sub-pixel jitter tables
//!
//! Offsets are in pixels within [-0.5, 0.5] and spread so that any prefix of
//! samples covers the pixel evenly. The same offsets drive the eye jitter for
//! depth of field and the projection shift for anti-aliasing.

use crate::render::{RenderError, RenderResult};

/// One jitter offset in pixel units
pub type JitterSample = (f32, f32);

const J1: [JitterSample; 1] = [(0.0, 0.0)];

const J2: [JitterSample; 2] = [(0.246490, 0.249999), (-0.246490, -0.249999)];

const J3: [JitterSample; 3] = [
    (-0.373411, -0.250550),
    (0.256263, 0.368119),
    (0.117148, -0.117570),
];

const J4: [JitterSample; 4] = [
    (-0.208147, 0.353730),
    (0.203849, -0.353780),
    (-0.292626, -0.149945),
    (0.296924, 0.149994),
];

const J8: [JitterSample; 8] = [
    (-0.334818, 0.435331),
    (0.286438, -0.393495),
    (0.459462, 0.141540),
    (-0.414498, -0.192829),
    (-0.183790, 0.082102),
    (-0.079263, -0.317383),
    (0.102254, 0.299133),
    (0.164216, -0.054399),
];

/// Sample counts with a table
pub const SUPPORTED_COUNTS: [usize; 5] = [1, 2, 3, 4, 8];

/// An ordered, immutable set of jitter offsets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterTable {
    samples: &'static [JitterSample],
}

impl JitterTable {
    /// Table for `count` samples
    ///
    /// Fails with `UnsupportedSampleCount` for anything outside
    /// [`SUPPORTED_COUNTS`].
    pub fn for_count(count: usize) -> RenderResult<Self> {
        let samples: &'static [JitterSample] = match count {
            1 => &J1,
            2 => &J2,
            3 => &J3,
            4 => &J4,
            8 => &J8,
            other => return Err(RenderError::UnsupportedSampleCount(other)),
        };
        Ok(Self { samples })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; every table has at least one sample
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The offsets in order
    pub fn samples(&self) -> &'static [JitterSample] {
        self.samples
    }

    /// Iterate over the offsets
    pub fn iter(&self) -> impl Iterator<Item = JitterSample> + 'static {
        self.samples.iter().copied()
    }

    /// Accumulation weight of each sample
    pub fn weight(&self) -> f32 {
        1.0 / self.samples.len() as f32
    }
}

impl Default for JitterTable {
    fn default() -> Self {
        Self { samples: &J8 }
    }
}
