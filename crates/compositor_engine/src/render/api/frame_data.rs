//! Frame readback data
//!
//! Read-only copies of the color and depth buffers. Rows are stored top-down
//! (row 0 is the top of the image) regardless of how the backend stores them.

/// Copy of the color buffer, RGBA in [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSnapshot {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major, top-down pixels
    pub pixels: Vec<[f32; 4]>,
}

impl ColorSnapshot {
    /// Pixel at (`x`, `y`), `y` counted from the top
    pub fn get(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Quantize to 8-bit RGBA bytes
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|px| px.map(quantize))
            .collect()
    }

    /// Mean of each channel over the whole image
    pub fn mean(&self) -> [f32; 4] {
        if self.pixels.is_empty() {
            return [0.0; 4];
        }
        let mut sum = [0.0f64; 4];
        for px in &self.pixels {
            for (acc, c) in sum.iter_mut().zip(px) {
                *acc += f64::from(*c);
            }
        }
        let n = self.pixels.len() as f64;
        sum.map(|s| (s / n) as f32)
    }
}

/// Copy of the depth buffer, window depth in [0, 1] (1 is the far plane)
#[derive(Debug, Clone, PartialEq)]
pub struct DepthSnapshot {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major, top-down depth values
    pub depth: Vec<f32>,
}

impl DepthSnapshot {
    /// Depth at (`x`, `y`), `y` counted from the top
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.depth.get((y * self.width + x) as usize).copied()
    }

    /// 8-bit luminance image of the depth values, as shown by the depth overlay
    pub fn to_luminance(&self) -> Vec<u8> {
        self.depth.iter().map(|d| quantize(*d)).collect()
    }

    /// Number of pixels covered by geometry (depth below the far plane)
    pub fn covered_pixels(&self) -> usize {
        self.depth.iter().filter(|d| **d < 1.0).count()
    }
}

fn quantize(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
