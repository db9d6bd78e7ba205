//! Rasterize-and-embed strategy.

use super::{artifact_filename, Artifact, ExportStrategy};
use crate::config::ExportConfig;
use crate::error::Result;
use crate::layout::Placement;
use crate::model::{Element, ExportedDocument, PageContent, StrategyKind, TicketView};
use crate::pdf::write_document;
use crate::raster::{CaptureOptions, Rasterizer, SnapshotRasterizer};
use std::sync::Arc;

/// Captures the view as an image and places it, fitted and centered, on
/// a single page.
pub struct RasterStrategy {
    rasterizer: Arc<dyn Rasterizer>,
}

impl RasterStrategy {
    /// Create the strategy backed by [`SnapshotRasterizer`].
    pub fn new() -> Self {
        Self::with_rasterizer(Arc::new(SnapshotRasterizer::new()))
    }

    /// Create the strategy with a custom rasterizer.
    pub fn with_rasterizer(rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self { rasterizer }
    }
}

impl Default for RasterStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportStrategy for RasterStrategy {
    fn name(&self) -> &str {
        "raster"
    }

    fn render(&self, view: &TicketView, config: &ExportConfig) -> Result<Artifact> {
        let raster = self.rasterizer.capture(view, &CaptureOptions::from(config))?;

        let format = config.format;
        let placement = Placement::fit(
            format.width_mm,
            format.height_mm,
            raster.width as f64,
            raster.height as f64,
            config.margin_factor,
        )?;
        log::debug!(
            "placing {}x{} raster at ({:.2}, {:.2}) size {:.2}x{:.2} mm",
            raster.width,
            raster.height,
            placement.x,
            placement.y,
            placement.width,
            placement.height
        );

        let mut page = PageContent::new(1);
        page.push(Element::Image { placement, raster });

        let filename = artifact_filename(&config.filename_stem, view.reference.as_deref(), None);
        let mut document = ExportedDocument::new(filename, StrategyKind::Raster, format)
            .with_title(config.title.clone());
        document.add_page(page);

        let bytes = write_document(&document)?;
        Ok(Artifact::new(document, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CaptureError, Error};
    use crate::model::{Raster, ViewNode};

    struct Fixed(u32, u32);

    impl Rasterizer for Fixed {
        fn capture(&self, _view: &TicketView, _options: &CaptureOptions) -> Result<Raster> {
            Ok(Raster::filled(self.0, self.1, [0, 0, 255]))
        }
    }

    fn view() -> TicketView {
        TicketView::new(1000, 640, ViewNode::text("x"))
    }

    #[test]
    fn test_single_centered_page() {
        let strategy = RasterStrategy::with_rasterizer(Arc::new(Fixed(2000, 1280)));
        let config = ExportConfig::default();
        let artifact = strategy.render(&view(), &config).unwrap();

        assert_eq!(artifact.filename, "aero-link-flight-ticket.pdf");
        assert_eq!(artifact.page_count(), 1);
        assert_eq!(artifact.document.strategy, StrategyKind::Raster);

        let placement = artifact.document.image_placement().unwrap();
        let expected = (210.0f64 / 2000.0).min(297.0 / 1280.0) * 0.95;
        assert!((placement.scale - expected).abs() < 1e-12);
        assert!(placement.fits_within(210.0, 297.0));
        assert!(artifact.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_filename_uses_reference() {
        let strategy = RasterStrategy::with_rasterizer(Arc::new(Fixed(10, 10)));
        let artifact = strategy
            .render(&view().with_reference("AL7788"), &ExportConfig::default())
            .unwrap();
        assert_eq!(artifact.filename, "aero-link-flight-ticket-AL7788.pdf");
    }

    #[test]
    fn test_capture_failure_propagates() {
        let err = RasterStrategy::new()
            .render(&view(), &ExportConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Capture(CaptureError::MissingSnapshot)));
    }
}
