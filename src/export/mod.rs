//! Export orchestration.
//!
//! An [`Exporter`] holds an ordered list of [`ExportStrategy`]
//! implementations and tries them in turn until one produces an artifact.
//! The outcome is reported to a [`Host`] as exactly one side effect: a
//! download on success, an alert otherwise.
//!
//! # Example
//!
//! ```no_run
//! use ticketpdf::export::{Exporter, MemoryHost};
//! use ticketpdf::model::{TicketView, ViewNode};
//!
//! let view = TicketView::new(800, 600, ViewNode::heading(2, "Route Information"));
//! let host = MemoryHost::new();
//! let outcome = Exporter::with_defaults().export(Some(&view), &host);
//! println!("{:?}", outcome);
//! ```

mod host;
mod lookup;
mod raster;
mod text;

pub use host::{DirectoryHost, Download, Host, MemoryHost};
pub use lookup::{ViewLookup, ViewRegistry};
pub use raster::RasterStrategy;
pub use text::TextStrategy;

use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::model::{ExportedDocument, TicketView, TICKET_VIEW_ID};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Alert shown when no ticket view can be located.
pub const VIEW_NOT_FOUND_MESSAGE: &str = "Ticket element not found!";

/// Alert shown when every strategy failed.
pub const EXPORT_FAILED_MESSAGE: &str =
    "Failed to generate PDF. Please try again or use browser print function (Ctrl+P).";

/// A rendered PDF ready to hand to the host.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Filename offered to the user
    pub filename: String,

    /// Document model the bytes were written from
    pub document: ExportedDocument,

    /// Serialized PDF
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Create an artifact named after its document.
    pub fn new(document: ExportedDocument, bytes: Vec<u8>) -> Self {
        Self {
            filename: document.filename.clone(),
            document,
            bytes,
        }
    }

    /// Number of pages in the artifact.
    pub fn page_count(&self) -> u32 {
        self.document.page_count()
    }
}

/// A way of turning a ticket view into a PDF.
///
/// Implement this trait to add a strategy to an [`Exporter`].
pub trait ExportStrategy: Send + Sync {
    /// Short name used in logs and failure reports.
    fn name(&self) -> &str;

    /// Render the view. An error hands control to the next strategy.
    fn render(&self, view: &TicketView, config: &ExportConfig) -> Result<Artifact>;
}

/// Result of one export invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The host received the artifact.
    Downloaded {
        filename: String,
        strategy: String,
        page_count: u32,
        byte_len: usize,
    },

    /// The user was alerted and nothing was downloaded.
    Alerted {
        message: String,
        /// Per-strategy failure messages, in attempt order
        causes: Vec<String>,
    },

    /// Another export was already running on this exporter.
    Busy,
}

impl ExportOutcome {
    /// Check if the export ended in a download.
    pub fn is_downloaded(&self) -> bool {
        matches!(self, ExportOutcome::Downloaded { .. })
    }

    /// Name of the strategy that produced the download, if any.
    pub fn strategy(&self) -> Option<&str> {
        match self {
            ExportOutcome::Downloaded { strategy, .. } => Some(strategy),
            _ => None,
        }
    }
}

/// Build an artifact filename: `<stem>[-<reference>][-<suffix>].pdf`.
///
/// The reference is reduced to ASCII letters, digits, `-` and `_`; an
/// empty result is treated as no reference.
pub fn artifact_filename(stem: &str, reference: Option<&str>, suffix: Option<&str>) -> String {
    let mut name = stem.to_string();
    if let Some(reference) = reference {
        let clean: String = reference
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if !clean.is_empty() {
            name.push('-');
            name.push_str(&clean);
        }
    }
    if let Some(suffix) = suffix {
        name.push('-');
        name.push_str(suffix);
    }
    name.push_str(".pdf");
    name
}

/// Clears the in-flight flag when an export finishes.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Runs export strategies in order and reports to the host.
pub struct Exporter {
    strategies: Vec<Arc<dyn ExportStrategy>>,
    config: ExportConfig,
    lookup: Option<Arc<dyn ViewLookup>>,
    in_flight: AtomicBool,
}

impl Exporter {
    /// Create an exporter with no strategies.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
            config: ExportConfig::default(),
            lookup: None,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Create an exporter with the raster strategy followed by the text
    /// fallback.
    pub fn with_defaults() -> Self {
        let mut exporter = Self::new();
        exporter.register(Arc::new(RasterStrategy::new()));
        exporter.register(Arc::new(TextStrategy::new()));
        exporter
    }

    /// Append a strategy to the end of the attempt order.
    pub fn register(&mut self, strategy: Arc<dyn ExportStrategy>) {
        self.strategies.push(strategy);
    }

    /// Set the export configuration.
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the lookup used when no view is passed to [`Exporter::export`].
    pub fn with_lookup(mut self, lookup: Arc<dyn ViewLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Registered strategy names, in attempt order.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Check if an export is currently running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run the strategies in order and return the first artifact.
    ///
    /// No host side effects and no settle delay. Fails with
    /// [`Error::TerminalFailure`] when every strategy fails.
    pub fn render(&self, view: &TicketView) -> Result<Artifact> {
        let mut causes = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            match strategy.render(view, &self.config) {
                Ok(artifact) => {
                    if !causes.is_empty() {
                        log::info!("{} strategy succeeded after fallback", strategy.name());
                    }
                    return Ok(artifact);
                }
                Err(e) => {
                    log::warn!("{} strategy failed: {}", strategy.name(), e);
                    causes.push(format!("{}: {}", strategy.name(), e));
                }
            }
        }
        Err(Error::TerminalFailure(causes))
    }

    /// Export a view and hand the result to the host.
    ///
    /// With `None`, the view is resolved through the configured lookup by
    /// its well-known identity. Exactly one of download or alert happens,
    /// except when another export is running, in which case nothing
    /// happens and [`ExportOutcome::Busy`] is returned.
    pub fn export(&self, view: Option<&TicketView>, host: &dyn Host) -> ExportOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            log::debug!("export already in progress");
            return ExportOutcome::Busy;
        };
        let Some(view) = self.resolve(view) else {
            return self.not_found(host);
        };

        let delay = self.config.settle_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        self.finish(view, host)
    }

    /// Async variant of [`Exporter::export`]; the settle delay is awaited.
    #[cfg(feature = "async")]
    pub async fn export_async(&self, view: Option<&TicketView>, host: &dyn Host) -> ExportOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            log::debug!("export already in progress");
            return ExportOutcome::Busy;
        };
        let Some(view) = self.resolve(view) else {
            return self.not_found(host);
        };

        let delay = self.config.settle_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.finish(view, host)
    }

    fn resolve<'a>(&'a self, view: Option<&'a TicketView>) -> Option<&'a TicketView> {
        view.or_else(|| {
            self.lookup
                .as_ref()
                .and_then(|lookup| lookup.find_view(TICKET_VIEW_ID))
        })
    }

    fn not_found(&self, host: &dyn Host) -> ExportOutcome {
        let err = Error::ViewNotFound(TICKET_VIEW_ID.to_string());
        log::error!("{}", err);
        host.alert(VIEW_NOT_FOUND_MESSAGE);
        ExportOutcome::Alerted {
            message: VIEW_NOT_FOUND_MESSAGE.to_string(),
            causes: vec![err.to_string()],
        }
    }

    fn finish(&self, view: &TicketView, host: &dyn Host) -> ExportOutcome {
        let causes = match self.render(view) {
            Ok(artifact) => match host.download(&artifact.filename, &artifact.bytes) {
                Ok(()) => {
                    log::info!(
                        "exported {} ({} page(s), {} bytes) via {}",
                        artifact.filename,
                        artifact.page_count(),
                        artifact.bytes.len(),
                        artifact.document.strategy
                    );
                    return ExportOutcome::Downloaded {
                        filename: artifact.filename,
                        strategy: artifact.document.strategy.to_string(),
                        page_count: artifact.document.page_count(),
                        byte_len: artifact.bytes.len(),
                    };
                }
                Err(e) => vec![format!("download: {}", e)],
            },
            Err(Error::TerminalFailure(causes)) => causes,
            Err(e) => vec![e.to_string()],
        };

        log::error!("{}", Error::TerminalFailure(causes.clone()));
        host.alert(EXPORT_FAILED_MESSAGE);
        ExportOutcome::Alerted {
            message: EXPORT_FAILED_MESSAGE.to_string(),
            causes,
        }
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
