//! Raster images produced by capture and embedded into pages.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB raster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raster {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Row-major RGB samples, three bytes per pixel
    #[serde(skip)]
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a raster from RGB samples.
    ///
    /// Returns `None` if the sample count does not match the dimensions.
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize * 3 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a raster filled with a single colour.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// PDF colour space of the samples.
    pub fn color_space(&self) -> &'static str {
        "DeviceRGB"
    }

    /// Bits per colour component.
    pub fn bits_per_component(&self) -> u8 {
        8
    }

    /// Get the size of the sample data in bytes.
    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Sample at (x, y), if inside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        Some([
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ])
    }
}
