//! Text-extraction fallback strategy.

use super::{artifact_filename, Artifact, ExportStrategy};
use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::extract::extract_view_lines;
use crate::layout::flow_lines;
use crate::model::{ExportedDocument, StrategyKind, TicketView};
use crate::pdf::write_document;

/// Suffix distinguishing fallback artifacts.
pub const BASIC_SUFFIX: &str = "basic";

/// Extracts the view's visible text and flows it over pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextStrategy;

impl TextStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl ExportStrategy for TextStrategy {
    fn name(&self) -> &str {
        "text"
    }

    fn render(&self, view: &TicketView, config: &ExportConfig) -> Result<Artifact> {
        let lines = extract_view_lines(view, config);
        log::debug!("extracted {} line(s) from view {}", lines.len(), view.id);

        let filename = artifact_filename(
            &config.filename_stem,
            view.reference.as_deref(),
            Some(BASIC_SUFFIX),
        );
        let mut document = ExportedDocument::new(filename, StrategyKind::Text, config.format)
            .with_title(config.title.clone());
        for page in flow_lines(&lines, config) {
            document.add_page(page);
        }

        let bytes = write_document(&document).map_err(|e| Error::Extraction(e.to_string()))?;
        Ok(Artifact::new(document, bytes))
    }
}
