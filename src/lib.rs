//! # ticketpdf
//!
//! Flight e-ticket export to PDF.
//!
//! A rendered ticket view is turned into a downloadable PDF by trying two
//! strategies in order: capture the view as an image and place it on an
//! A4 page, or, if that fails, extract the view's visible text and flow
//! it over as many pages as needed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ticketpdf::{load_view, DirectoryHost, Exporter};
//!
//! fn main() -> ticketpdf::Result<()> {
//!     let view = load_view("ticket.json", Some("ticket.png"))?;
//!     let host = DirectoryHost::new("./out");
//!     let outcome = Exporter::with_defaults().export(Some(&view), &host);
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Raster export**: oversampled capture, fit-and-center placement
//! - **Text fallback**: heading markers, hidden content skipped, pagination
//! - **Single side effect**: exactly one download or one alert per export
//! - **Pluggable**: custom strategies, rasterizers, hosts and view lookups
//! - **Async**: `export_async` behind the `async` feature

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod raster;

// Re-export commonly used types
pub use config::{ExportConfig, Orientation, PageFormat};
pub use error::{CaptureError, Error, Result};
pub use export::{
    artifact_filename, Artifact, DirectoryHost, ExportOutcome, ExportStrategy, Exporter, Host,
    MemoryHost, RasterStrategy, TextStrategy, ViewLookup, ViewRegistry,
};
pub use extract::{extract_lines, extract_view_lines};
pub use layout::Placement;
pub use model::{
    Element, ExportedDocument, PageContent, Raster, Snapshot, StrategyKind, Ticket, TicketView,
    ViewNode,
};
pub use raster::{CaptureOptions, Rasterizer, SnapshotRasterizer};

use std::path::Path;

/// Load a view from a JSON file, optionally attaching a PNG screenshot.
///
/// # Example
///
/// ```no_run
/// let view = ticketpdf::load_view("ticket.json", None::<&str>).unwrap();
/// println!("{}x{}", view.scroll_width, view.scroll_height);
/// ```
pub fn load_view<P: AsRef<Path>, S: AsRef<Path>>(path: P, snapshot: Option<S>) -> Result<TicketView> {
    let data = std::fs::read_to_string(path)?;
    let mut view = TicketView::from_json(&data)?;
    if let Some(snapshot) = snapshot {
        view.snapshot = Some(Snapshot::from_file(snapshot)?);
    }
    Ok(view)
}

/// Export a view with the default strategies and configuration.
pub fn export_view(view: &TicketView, host: &dyn Host) -> ExportOutcome {
    Exporter::with_defaults().export(Some(view), host)
}

/// Render a view to PDF bytes without host side effects.
///
/// Runs the default strategies and returns the first artifact.
pub fn render_view(view: &TicketView, config: &ExportConfig) -> Result<Artifact> {
    Exporter::with_defaults()
        .with_config(config.clone())
        .render(view)
}

/// Compute where a view of the given CSS size would land on the page.
///
/// # Example
///
/// ```
/// use ticketpdf::{placement_for, ExportConfig};
///
/// let p = placement_for(1000, 640, &ExportConfig::default()).unwrap();
/// assert!(p.fits_within(210.0, 297.0));
/// ```
pub fn placement_for(width: u32, height: u32, config: &ExportConfig) -> Result<Placement> {
    Placement::fit(
        config.format.width_mm,
        config.format.height_mm,
        width as f64 * config.oversampling,
        height as f64 * config.oversampling,
        config.margin_factor,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn quick() -> ExportConfig {
        ExportConfig::default().with_settle_delay(Duration::ZERO)
    }

    #[test]
    fn test_render_view_falls_back_to_text() {
        let view = TicketView::new(800, 600, ViewNode::heading(1, "Aero Link"));
        let artifact = render_view(&view, &quick()).unwrap();
        assert_eq!(artifact.document.strategy, StrategyKind::Text);
        assert_eq!(artifact.filename, "aero-link-flight-ticket-basic.pdf");
    }

    #[test]
    fn test_placement_for_matches_fit() {
        let config = ExportConfig::default();
        let p = placement_for(1000, 640, &config).unwrap();
        let direct = Placement::fit(210.0, 297.0, 2000.0, 1280.0, 0.95).unwrap();
        assert_eq!(p, direct);
        assert!(placement_for(0, 640, &config).is_err());
    }

    #[test]
    fn test_load_view_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("view.json");
        let view = TicketView::new(300, 200, ViewNode::text("hello")).with_reference("AB12");
        std::fs::write(&path, view.to_json().unwrap()).unwrap();

        let loaded = load_view(&path, None::<&Path>).unwrap();
        assert_eq!(loaded, view);
    }

    #[test]
    fn test_load_view_missing_file() {
        let err = load_view("/nonexistent/view.json", None::<&Path>).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_export_view_downloads_once() {
        let view = TicketView::new(800, 600, ViewNode::text("x"));
        let host = MemoryHost::new();
        let exporter = Exporter::with_defaults().with_config(quick());
        let outcome = exporter.export(Some(&view), &host);
        assert!(outcome.is_downloaded());
        assert_eq!(host.downloads().len(), 1);
        assert!(host.alerts().is_empty());
    }
}
