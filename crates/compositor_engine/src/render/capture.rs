//! PNG export of the color and depth buffers
//!
//! Snapshots are already top-down, so rows are written as they come.
//! Files are named after the frame counter so a session's captures sort in
//! order.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ColorType, ImageFormat};

use crate::render::api::RenderBackend;
use crate::render::RenderResult;

/// `{frame:08}_screen.png`
pub fn color_capture_name(frame: u64) -> String {
    format!("{frame:08}_screen.png")
}

/// `{frame:08}_depth.png`
pub fn depth_capture_name(frame: u64) -> String {
    format!("{frame:08}_depth.png")
}

/// Write the color buffer as an RGBA8 PNG
pub fn capture_color<B: RenderBackend>(backend: &B, path: &Path) -> RenderResult<()> {
    let snapshot = backend.color_snapshot();
    ensure_parent(path)?;
    image::save_buffer_with_format(
        path,
        &snapshot.to_rgba8(),
        snapshot.width,
        snapshot.height,
        ColorType::Rgba8,
        ImageFormat::Png,
    )?;
    log::info!("Saved color capture {}", path.display());
    Ok(())
}

/// Write the depth buffer as an 8-bit grayscale PNG; white is the far plane
pub fn capture_depth<B: RenderBackend>(backend: &B, path: &Path) -> RenderResult<()> {
    let snapshot = backend.depth_snapshot();
    ensure_parent(path)?;
    image::save_buffer_with_format(
        path,
        &snapshot.to_luminance(),
        snapshot.width,
        snapshot.height,
        ColorType::L8,
        ImageFormat::Png,
    )?;
    log::info!("Saved depth capture {}", path.display());
    Ok(())
}

/// Capture color into `dir` under the frame's file name
pub fn capture_color_frame<B: RenderBackend>(backend: &B, dir: &Path, frame: u64) -> RenderResult<PathBuf> {
    let path = dir.join(color_capture_name(frame));
    capture_color(backend, &path)?;
    Ok(path)
}

/// Capture depth into `dir` under the frame's file name
pub fn capture_depth_frame<B: RenderBackend>(backend: &B, dir: &Path, frame: u64) -> RenderResult<PathBuf> {
    let path = dir.join(depth_capture_name(frame));
    capture_depth(backend, &path)?;
    Ok(path)
}

fn ensure_parent(path: &Path) -> RenderResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
