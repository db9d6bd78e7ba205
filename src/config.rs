//! Export configuration.
//!
//! Every constant the export pipeline depends on lives here, so the
//! placement and pagination math can be exercised with injected values
//! instead of a real rendering environment.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Millimetres per PDF point.
pub const MM_PER_POINT: f64 = 25.4 / 72.0;

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Height greater than width
    #[default]
    Portrait,
    /// Width greater than height
    Landscape,
}

/// Fixed page size of the exported document, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageFormat {
    /// Page width in mm
    pub width_mm: f64,

    /// Page height in mm
    pub height_mm: f64,
}

impl PageFormat {
    /// Create a page format from explicit dimensions.
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// ISO A4 (210 x 297 mm).
    pub fn a4() -> Self {
        Self::new(210.0, 297.0)
    }

    /// US Letter (8.5 x 11 inches).
    pub fn letter() -> Self {
        Self::new(215.9, 279.4)
    }

    /// Return this format in the requested orientation.
    pub fn oriented(self, orientation: Orientation) -> Self {
        let (short, long) = if self.width_mm <= self.height_mm {
            (self.width_mm, self.height_mm)
        } else {
            (self.height_mm, self.width_mm)
        };
        match orientation {
            Orientation::Portrait => Self::new(short, long),
            Orientation::Landscape => Self::new(long, short),
        }
    }

    /// Page width in PDF points.
    pub fn width_pt(&self) -> f64 {
        self.width_mm / MM_PER_POINT
    }

    /// Page height in PDF points.
    pub fn height_pt(&self) -> f64 {
        self.height_mm / MM_PER_POINT
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width_mm > self.height_mm
    }
}

impl Default for PageFormat {
    fn default() -> Self {
        Self::a4()
    }
}

/// Options controlling both export strategies and the orchestrator.
///
/// Distances are in millimetres from the top-left corner of the page,
/// font sizes in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output page size
    pub format: PageFormat,

    /// Raster oversampling factor applied to the view's CSS size
    pub oversampling: f64,

    /// Shrink applied after fitting the raster to the page
    pub margin_factor: f64,

    /// Opaque background painted under the raster
    pub background: [u8; 3],

    /// Largest raster side in pixels
    pub max_canvas_side: u32,

    /// Largest raster area in pixels
    pub max_canvas_area: u64,

    /// Load cross-origin images that carry CORS permission
    pub use_cors: bool,

    /// Wait before capture so asynchronous rendering can settle
    pub settle_delay_ms: u64,

    /// Title line of the text fallback
    pub title: String,

    /// Title font size
    pub title_font_size: f64,

    /// Baseline of the title line
    pub title_y: f64,

    /// Vertical position of the separator rule
    pub rule_y: f64,

    /// Body font size
    pub body_font_size: f64,

    /// Left margin of body lines (and inset of the separator rule)
    pub left_margin: f64,

    /// Baseline of the first body line on page one
    pub body_start_y: f64,

    /// Distance between consecutive baselines
    pub line_height: f64,

    /// A new page starts once the cursor passes `height - bottom_margin`
    pub bottom_margin: f64,

    /// Baseline of the first line on continuation pages
    pub continuation_y: f64,

    /// Word-wrap lines wider than the printable width
    pub wrap_long_lines: bool,

    /// Marker wrapped around heading lines
    pub heading_marker: String,

    /// Artifact filename stem
    pub filename_stem: String,
}

impl ExportConfig {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parse options from a JSON string. Missing fields take their defaults.
    pub fn from_json(data: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the page format.
    pub fn with_format(mut self, format: PageFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the oversampling factor.
    pub fn with_oversampling(mut self, factor: f64) -> Self {
        self.oversampling = factor;
        self
    }

    /// Set the margin factor.
    pub fn with_margin_factor(mut self, factor: f64) -> Self {
        self.margin_factor = factor;
        self
    }

    /// Set the largest raster the capture may allocate.
    pub fn with_canvas_limits(mut self, max_side: u32, max_area: u64) -> Self {
        self.max_canvas_side = max_side;
        self.max_canvas_area = max_area;
        self
    }

    /// Set the background colour.
    pub fn with_background(mut self, rgb: [u8; 3]) -> Self {
        self.background = rgb;
        self
    }

    /// Enable or disable CORS loading of cross-origin images.
    pub fn with_cors(mut self, use_cors: bool) -> Self {
        self.use_cors = use_cors;
        self
    }

    /// Set the settle delay.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Set the title of the text fallback.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the body line height.
    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    /// Enable or disable wrapping of long lines.
    pub fn with_wrapping(mut self, wrap: bool) -> Self {
        self.wrap_long_lines = wrap;
        self
    }

    /// Set the artifact filename stem.
    pub fn with_filename_stem(mut self, stem: impl Into<String>) -> Self {
        self.filename_stem = stem.into();
        self
    }

    /// The settle delay as a [`Duration`].
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Lowest baseline that may still receive a line.
    pub fn printable_bottom(&self) -> f64 {
        self.format.height_mm - self.bottom_margin
    }

    /// Usable width for body lines.
    pub fn printable_width(&self) -> f64 {
        self.format.width_mm - 2.0 * self.left_margin
    }

    /// Check that the options describe a usable page.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!("{} must be positive, got {}", name, value)))
            }
        };

        positive("format.width_mm", self.format.width_mm)?;
        positive("format.height_mm", self.format.height_mm)?;
        positive("oversampling", self.oversampling)?;
        positive("line_height", self.line_height)?;
        positive("title_font_size", self.title_font_size)?;
        positive("body_font_size", self.body_font_size)?;

        if self.max_canvas_side == 0 || self.max_canvas_area == 0 {
            return Err(Error::InvalidConfig("canvas limits must be non-zero".into()));
        }
        if !(self.margin_factor > 0.0 && self.margin_factor <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "margin_factor must be in (0, 1], got {}",
                self.margin_factor
            )));
        }
        if self.printable_width() <= 0.0 {
            return Err(Error::InvalidConfig(
                "left_margin leaves no printable width".into(),
            ));
        }
        if self.continuation_y > self.printable_bottom() {
            return Err(Error::InvalidConfig(
                "continuation_y lies below the printable area".into(),
            ));
        }
        if self.filename_stem.trim().is_empty() {
            return Err(Error::InvalidConfig("filename_stem is empty".into()));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: PageFormat::a4(),
            oversampling: 2.0,
            margin_factor: 0.95,
            background: [0xff, 0xff, 0xff],
            max_canvas_side: 32_767,
            max_canvas_area: 268_435_456,
            use_cors: true,
            settle_delay_ms: 100,
            title: "Aero Link - Flight Ticket".to_string(),
            title_font_size: 20.0,
            title_y: 20.0,
            rule_y: 30.0,
            body_font_size: 12.0,
            left_margin: 20.0,
            body_start_y: 50.0,
            line_height: 8.0,
            bottom_margin: 20.0,
            continuation_y: 20.0,
            wrap_long_lines: false,
            heading_marker: "**".to_string(),
            filename_stem: "aero-link-flight-ticket".to_string(),
        }
    }
}
