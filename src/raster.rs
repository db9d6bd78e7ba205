//! View capture.
//!
//! A [`Rasterizer`] turns a rendered [`TicketView`] into an opaque RGB
//! [`Raster`] at an oversampled resolution. [`SnapshotRasterizer`] works
//! from the screenshot the host attaches to the view.

use crate::config::ExportConfig;
use crate::error::{CaptureError, Result};
use crate::model::{Raster, TicketView};
use image::imageops::{self, FilterType};
use image::GenericImageView;

/// Parameters of a single capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// Oversampling factor applied to the view's CSS size
    pub scale: f64,
    /// Opaque background painted under transparent pixels
    pub background: [u8; 3],
    /// Load cross-origin images that carry CORS permission
    pub use_cors: bool,
    /// Largest raster side in pixels
    pub max_side: u32,
    /// Largest raster area in pixels
    pub max_area: u64,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for CaptureOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            scale: config.oversampling,
            background: config.background,
            use_cors: config.use_cors,
            max_side: config.max_canvas_side,
            max_area: config.max_canvas_area,
        }
    }
}

/// Turns a rendered view into pixels.
pub trait Rasterizer: Send + Sync {
    /// Capture the view at `options.scale` times its CSS size.
    fn capture(&self, view: &TicketView, options: &CaptureOptions) -> Result<Raster>;
}

/// Rasterizer backed by the host screenshot attached to the view.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotRasterizer {
    filter: Option<FilterType>,
}

impl SnapshotRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific resampling filter (default: triangle).
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = Some(filter);
        self
    }
}

impl Rasterizer for SnapshotRasterizer {
    fn capture(&self, view: &TicketView, options: &CaptureOptions) -> Result<Raster> {
        if view.is_empty() {
            return Err(CaptureError::EmptyView {
                width: view.scroll_width,
                height: view.scroll_height,
            }
            .into());
        }
        check_taint(view, options)?;
        let (width, height) = target_size(view, options)?;

        let snapshot = view
            .snapshot
            .as_ref()
            .ok_or(CaptureError::MissingSnapshot)?;
        let decoded = image::load_from_memory(&snapshot.data)
            .map_err(|e| CaptureError::Decode(e.to_string()))?;

        let (src_w, src_h) = decoded.dimensions();
        if src_w == 0 || src_h == 0 {
            return Err(CaptureError::EmptyView {
                width: src_w,
                height: src_h,
            }
            .into());
        }

        log::debug!(
            "capturing {}x{} snapshot into {}x{} raster (scale {})",
            src_w,
            src_h,
            width,
            height,
            options.scale
        );

        let rgba = decoded.to_rgba8();
        let resized = if (src_w, src_h) == (width, height) {
            rgba
        } else {
            imageops::resize(
                &rgba,
                width,
                height,
                self.filter.unwrap_or(FilterType::Triangle),
            )
        };

        let [br, bg, bb] = options.background;
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in resized.pixels() {
            let [r, g, b, a] = pixel.0;
            pixels.extend_from_slice(&[
                composite(r, br, a),
                composite(g, bg, a),
                composite(b, bb, a),
            ]);
        }

        Ok(Raster::from_rgb(width, height, pixels).ok_or(CaptureError::DegenerateSize)?)
    }
}

/// A visible cross-origin image taints the canvas unless it was loaded
/// with CORS permission and CORS loading is enabled.
fn check_taint(view: &TicketView, options: &CaptureOptions) -> Result<()> {
    for (src, cors) in view.root.visible_images() {
        if is_cross_origin(src) && !(options.use_cors && cors) {
            return Err(CaptureError::TaintedCanvas(src.to_string()).into());
        }
    }
    Ok(())
}

fn is_cross_origin(src: &str) -> bool {
    let lower = src.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}

/// Oversampled raster size, checked against the canvas limits before any
/// pixel buffer is allocated.
fn target_size(view: &TicketView, options: &CaptureOptions) -> Result<(u32, u32)> {
    let scale = options.scale;
    if !(scale.is_finite() && scale > 0.0) {
        return Err(CaptureError::DegenerateSize.into());
    }
    let width = (view.scroll_width as f64 * scale).round();
    let height = (view.scroll_height as f64 * scale).round();
    if width < 1.0 || height < 1.0 {
        return Err(CaptureError::DegenerateSize.into());
    }

    let side = options.max_side as f64;
    if width > side || height > side || width * height > options.max_area as f64 {
        return Err(CaptureError::TooLarge {
            width: width as u64,
            height: height as u64,
        }
        .into());
    }
    Ok((width as u32, height as u32))
}

fn composite(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
}
