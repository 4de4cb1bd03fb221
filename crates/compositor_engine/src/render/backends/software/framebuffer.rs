//! Framebuffer storage for the software device
//!
//! Color, depth, stencil and accumulation planes of identical extent, stored
//! row-major with row 0 at the top of the image.

use crate::render::api::{ColorSnapshot, DepthSnapshot};
use crate::render::{RenderError, RenderResult};

/// Depth the depth buffer is cleared to (the far plane)
pub const CLEAR_DEPTH: f32 = 1.0;

/// CPU framebuffer with every plane the fixed-function pipeline needs
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pub(crate) color: Vec<[f32; 4]>,
    pub(crate) depth: Vec<f32>,
    pub(crate) stencil: Vec<u8>,
    pub(crate) accum: Vec<[f32; 4]>,
}

impl Framebuffer {
    /// Allocate all four planes
    ///
    /// # Errors
    /// `InvalidViewport` for a zero extent, `BufferAllocation` when a plane
    /// cannot be reserved.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidViewport { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| RenderError::BufferAllocation(format!("{width}x{height} overflows")))?;

        log::debug!("Allocating {}x{} software framebuffer", width, height);

        Ok(Self {
            width,
            height,
            color: allocate("color", len, [0.0; 4])?,
            depth: allocate("depth", len, CLEAR_DEPTH)?,
            stencil: allocate("stencil", len, 0u8)?,
            accum: allocate("accumulation", len, [0.0; 4])?,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Linear index of a pixel; callers guarantee the bounds
    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Fill the color plane
    pub fn clear_color(&mut self, color: [f32; 4]) {
        self.color.fill(color);
    }

    /// Reset every depth value to the far plane
    pub fn clear_depth(&mut self) {
        self.depth.fill(CLEAR_DEPTH);
    }

    /// Zero the stencil plane
    pub fn clear_stencil(&mut self) {
        self.stencil.fill(0);
    }

    /// Zero the accumulation plane
    pub fn clear_accum(&mut self) {
        self.accum.fill([0.0; 4]);
    }

    /// `accum += weight * color`
    pub fn accumulate(&mut self, weight: f32) {
        for (acc, src) in self.accum.iter_mut().zip(&self.color) {
            for (a, c) in acc.iter_mut().zip(src) {
                *a += weight * c;
            }
        }
    }

    /// `color = scale * accum`, clamped to [0, 1]
    pub fn resolve(&mut self, scale: f32) {
        for (dst, acc) in self.color.iter_mut().zip(&self.accum) {
            *dst = acc.map(|a| (a * scale).clamp(0.0, 1.0));
        }
    }

    /// Stencil value at a pixel, `y` from the top
    pub fn stencil_at(&self, x: u32, y: u32) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.stencil[self.index(x, y)])
    }

    /// Copy of the color plane
    pub fn color_snapshot(&self) -> ColorSnapshot {
        ColorSnapshot {
            width: self.width,
            height: self.height,
            pixels: self.color.clone(),
        }
    }

    /// Copy of the depth plane
    pub fn depth_snapshot(&self) -> DepthSnapshot {
        DepthSnapshot {
            width: self.width,
            height: self.height,
            depth: self.depth.clone(),
        }
    }
}

fn allocate<T: Clone>(plane: &str, len: usize, value: T) -> RenderResult<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|e| RenderError::BufferAllocation(format!("{plane} plane of {len} pixels: {e}")))?;
    buffer.resize(len, value);
    Ok(buffer)
}
