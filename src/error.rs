//! Error types for ticketpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for ticketpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons the raster capture strategy can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    /// The view has no host screenshot to rasterize.
    #[error("no snapshot attached to view")]
    MissingSnapshot,

    /// The view (or its snapshot) has a zero dimension.
    #[error("cannot capture an empty view ({width}x{height})")]
    EmptyView { width: u32, height: u32 },

    /// A cross-origin image without CORS permission tainted the canvas.
    #[error("canvas tainted by cross-origin image: {0}")]
    TaintedCanvas(String),

    /// The snapshot could not be decoded.
    #[error("snapshot decode failed: {0}")]
    Decode(String),

    /// Placement math received non-positive or non-finite dimensions.
    #[error("degenerate dimensions for placement")]
    DegenerateSize,

    /// The oversampled raster exceeds the canvas limits.
    #[error("raster of {width}x{height} px exceeds the canvas limit")]
    TooLarge { width: u64, height: u64 },
}

/// Error types that can occur while exporting a ticket.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No ticket view could be located.
    #[error("Ticket view not found: {0}")]
    ViewNotFound(String),

    /// Raster capture or image embedding failed.
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// The text fallback failed.
    #[error("Text extraction error: {0}")]
    Extraction(String),

    /// Every registered strategy failed.
    #[error("All PDF generation methods failed: {}", .0.join("; "))]
    TerminalFailure(Vec<String>),

    /// Error building or serializing the PDF.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Error decoding or resampling an image.
    #[error("Image error: {0}")]
    Image(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid export configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The host refused a side effect.
    #[error("Host error: {0}")]
    Host(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
