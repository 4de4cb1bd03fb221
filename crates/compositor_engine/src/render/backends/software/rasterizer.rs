//! Triangle rasterization and per-fragment operations
//!
//! Triangles arrive in clip space. They are clipped against the near plane,
//! culled by their winding in NDC (counter-clockwise is front), mapped to
//! the viewport and scanned with edge functions. Pixels centered exactly on
//! an edge belong to only one of the two triangles sharing it.

use crate::foundation::math::Vec4;
use crate::render::pipeline::{BlendMode, CullMode, PipelineState};

use super::framebuffer::Framebuffer;

/// Vertex after transformation, with its shaded color
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ClipVertex {
    pub clip: Vec4,
    pub color: [f32; 4],
}

impl ClipVertex {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let mut color = [0.0; 4];
        for (i, c) in color.iter_mut().enumerate() {
            *c = self.color[i] + (other.color[i] - self.color[i]) * t;
        }
        Self {
            clip: self.clip + (other.clip - self.clip) * t,
            color,
        }
    }
}

/// Counters for one draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Triangles handed to the rasterizer
    pub triangles: u64,
    /// Triangles rejected by face culling
    pub culled: u64,
    /// Triangles entirely behind the near plane
    pub clipped: u64,
    /// Fragments that passed every test
    pub fragments: u64,
}

impl std::ops::AddAssign for RasterStats {
    fn add_assign(&mut self, rhs: Self) {
        self.triangles += rhs.triangles;
        self.culled += rhs.culled;
        self.clipped += rhs.clipped;
        self.fragments += rhs.fragments;
    }
}

/// Smallest `w` accepted after clipping
const MIN_W: f32 = 1e-6;

/// Clip a polygon against the near plane `z + w >= 0`
fn clip_near(polygon: &[ClipVertex]) -> Vec<ClipVertex> {
    let mut out = Vec::with_capacity(polygon.len() + 1);
    for (i, current) in polygon.iter().enumerate() {
        let next = &polygon[(i + 1) % polygon.len()];
        let d_cur = current.clip.z + current.clip.w;
        let d_next = next.clip.z + next.clip.w;

        if d_cur >= 0.0 {
            out.push(*current);
        }
        if (d_cur >= 0.0) != (d_next >= 0.0) {
            let t = d_cur / (d_cur - d_next);
            out.push(current.lerp(next, t));
        }
    }
    out
}

/// Vertex in window coordinates
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    /// Window depth in [0, 1]
    z: f32,
    /// 1 / w for perspective-correct interpolation
    inv_w: f32,
    color: [f32; 4],
}

fn to_screen(v: &ClipVertex, width: f32, height: f32) -> ScreenVertex {
    let inv_w = 1.0 / v.clip.w;
    let ndc_x = v.clip.x * inv_w;
    let ndc_y = v.clip.y * inv_w;
    let ndc_z = v.clip.z * inv_w;
    ScreenVertex {
        x: (ndc_x * 0.5 + 0.5) * width,
        // Row 0 is the top of the image
        y: (0.5 - ndc_y * 0.5) * height,
        z: ndc_z * 0.5 + 0.5,
        inv_w,
        color: v.color,
    }
}

#[inline]
fn edge(a: &ScreenVertex, b: &ScreenVertex, px: f32, py: f32) -> f32 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

/// Whether a pixel center lying exactly on edge `a -> b` belongs to this triangle
///
/// Antisymmetric in the edge direction, so of two triangles sharing an edge
/// (and therefore walking it in opposite directions) exactly one owns it.
#[inline]
fn owns_edge(a: &ScreenVertex, b: &ScreenVertex) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dy > 0.0 || (dy == 0.0 && dx < 0.0)
}

#[inline]
fn inside(w: f32, owned: bool) -> bool {
    w > 0.0 || (w == 0.0 && owned)
}

/// Rasterize one clip-space triangle into the framebuffer
pub(crate) fn draw_triangle(fb: &mut Framebuffer, state: &PipelineState, tri: [ClipVertex; 3]) -> RasterStats {
    let mut stats = RasterStats {
        triangles: 1,
        ..RasterStats::default()
    };

    let polygon = clip_near(&tri);
    if polygon.len() < 3 || polygon.iter().any(|v| v.clip.w <= MIN_W) {
        stats.clipped = 1;
        return stats;
    }

    // Winding in NDC, counter-clockwise positive
    let ndc: Vec<(f32, f32)> = polygon
        .iter()
        .map(|v| (v.clip.x / v.clip.w, v.clip.y / v.clip.w))
        .collect();
    let area: f32 = (0..ndc.len())
        .map(|i| {
            let (x0, y0) = ndc[i];
            let (x1, y1) = ndc[(i + 1) % ndc.len()];
            x0 * y1 - x1 * y0
        })
        .sum();
    if area == 0.0 {
        stats.culled = 1;
        return stats;
    }
    let front = area > 0.0;
    let culled = match state.cull_mode {
        CullMode::None => false,
        CullMode::Back => !front,
        CullMode::Front => front,
    };
    if culled {
        stats.culled = 1;
        return stats;
    }

    let width = fb.width() as f32;
    let height = fb.height() as f32;
    let screen: Vec<ScreenVertex> = polygon.iter().map(|v| to_screen(v, width, height)).collect();
    for i in 1..screen.len() - 1 {
        stats.fragments += rasterize(fb, state, screen[0], screen[i], screen[i + 1]);
    }
    stats
}

fn rasterize(fb: &mut Framebuffer, state: &PipelineState, a: ScreenVertex, b: ScreenVertex, c: ScreenVertex) -> u64 {
    // Orient positively in window space (y down flips the NDC winding)
    let (a, b, c) = if edge(&a, &b, c.x, c.y) < 0.0 { (a, c, b) } else { (a, b, c) };
    let area = edge(&a, &b, c.x, c.y);
    if area <= 0.0 || !area.is_finite() {
        return 0;
    }

    let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
    let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
    let max_x = (a.x.max(b.x).max(c.x).ceil().min(fb.width() as f32) as u32).min(fb.width());
    let max_y = (a.y.max(b.y).max(c.y).ceil().min(fb.height() as f32) as u32).min(fb.height());
    if min_x >= max_x || min_y >= max_y {
        return 0;
    }

    let owns_bc = owns_edge(&b, &c);
    let owns_ca = owns_edge(&c, &a);
    let owns_ab = owns_edge(&a, &b);

    let bias = state.depth_bias.map_or(0.0, |bias| {
        let dzdx = ((b.z - a.z) * (c.y - a.y) + (c.z - a.z) * (a.y - b.y)) / area;
        let dzdy = ((b.z - a.z) * (a.x - c.x) + (c.z - a.z) * (b.x - a.x)) / area;
        bias.offset(dzdx.abs().max(dzdy.abs()))
    });

    let mut written = 0;
    for y in min_y..max_y {
        let py = y as f32 + 0.5;
        for x in min_x..max_x {
            let px = x as f32 + 0.5;
            let w0 = edge(&b, &c, px, py);
            let w1 = edge(&c, &a, px, py);
            let w2 = edge(&a, &b, px, py);
            if !(inside(w0, owns_bc) && inside(w1, owns_ca) && inside(w2, owns_ab)) {
                continue;
            }

            let l0 = w0 / area;
            let l1 = w1 / area;
            let l2 = w2 / area;

            let z = l0 * a.z + l1 * b.z + l2 * c.z;
            if !(0.0..=1.0).contains(&z) {
                continue;
            }

            let p0 = l0 * a.inv_w;
            let p1 = l1 * b.inv_w;
            let p2 = l2 * c.inv_w;
            let norm = p0 + p1 + p2;
            let mut color = [0.0f32; 4];
            for (i, out) in color.iter_mut().enumerate() {
                *out = (p0 * a.color[i] + p1 * b.color[i] + p2 * c.color[i]) / norm;
            }

            if shade_fragment(fb, state, x, y, (z + bias).clamp(0.0, 1.0), color) {
                written += 1;
            }
        }
    }
    written
}

/// Stencil test, depth test, stencil update, blended color write, depth write
fn shade_fragment(fb: &mut Framebuffer, state: &PipelineState, x: u32, y: u32, z: f32, color: [f32; 4]) -> bool {
    let idx = fb.index(x, y);
    let stencil = &state.stencil;

    if stencil.enabled && !stencil.test(fb.stencil[idx]) {
        fb.stencil[idx] = stencil.fail.apply(fb.stencil[idx], stencil.reference);
        return false;
    }

    if state.depth_test && !state.depth_func.compare(z, fb.depth[idx]) {
        if stencil.enabled {
            fb.stencil[idx] = stencil.depth_fail.apply(fb.stencil[idx], stencil.reference);
        }
        return false;
    }

    if stencil.enabled {
        fb.stencil[idx] = stencil.pass.apply(fb.stencil[idx], stencil.reference);
    }

    if state.color_write {
        let dst = &mut fb.color[idx];
        match state.blend {
            BlendMode::Replace => *dst = color,
            BlendMode::Alpha => {
                let alpha = color[3];
                for (d, s) in dst.iter_mut().zip(color) {
                    *d = s * alpha + *d * (1.0 - alpha);
                }
            }
        }
    }

    if state.depth_test && state.depth_write {
        fb.depth[idx] = z;
    }
    true
}
