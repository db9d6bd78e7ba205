//! Fit-and-center placement of a raster on a page.

use crate::error::{CaptureError, Result};
use serde::{Deserialize, Serialize};

/// Where an image lands on a page, in page units from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Factor applied to the image's native size
    pub scale: f64,
}

impl Placement {
    /// Fit an image into a page, preserving aspect ratio.
    ///
    /// Each axis is scaled independently to fit, the smaller factor wins,
    /// the result is shrunk by `margin_factor`, then centered on both axes.
    /// Page and image sizes may use different units; the placement is in
    /// page units.
    pub fn fit(
        page_width: f64,
        page_height: f64,
        image_width: f64,
        image_height: f64,
        margin_factor: f64,
    ) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if ![page_width, page_height, image_width, image_height, margin_factor]
            .into_iter()
            .all(valid)
        {
            return Err(CaptureError::DegenerateSize.into());
        }

        let scale_x = page_width / image_width;
        let scale_y = page_height / image_height;
        let scale = scale_x.min(scale_y) * margin_factor;

        let width = image_width * scale;
        let height = image_height * scale;

        Ok(Self {
            x: (page_width - width) / 2.0,
            y: (page_height - height) / 2.0,
            width,
            height,
            scale,
        })
    }

    /// Check that the rectangle lies inside a page of the given size.
    pub fn fits_within(&self, page_width: f64, page_height: f64) -> bool {
        const EPS: f64 = 1e-9;
        self.x >= -EPS
            && self.y >= -EPS
            && self.x + self.width <= page_width + EPS
            && self.y + self.height <= page_height + EPS
    }
}
