//! Exported document: fixed-size pages of positioned elements.

use super::Raster;
use crate::config::PageFormat;
use crate::layout::Placement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which strategy produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Rasterize-and-embed
    Raster,
    /// Text-extraction fallback
    Text,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Raster => write!(f, "raster"),
            StrategyKind::Text => write!(f, "text"),
        }
    }
}

/// Base-14 font used by text elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript name of the font.
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }
}

/// Horizontal anchor of a text element's `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// A positioned element on a page. Coordinates are mm from the top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// An embedded raster image
    Image {
        /// Where the image lands on the page
        placement: Placement,
        /// The image itself
        raster: Raster,
    },

    /// A single line of text; `y` is the baseline
    Text {
        x: f64,
        y: f64,
        text: String,
        font: Font,
        /// Font size in points
        size: f64,
        #[serde(default)]
        align: Align,
    },

    /// A straight stroked line
    Rule {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        /// Stroke width in points
        width: f64,
    },
}

impl Element {
    /// Check if this element is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Element::Image { .. })
    }

    /// Check if this element is text.
    pub fn is_text(&self) -> bool {
        matches!(self, Element::Text { .. })
    }

    /// Text content, if this is a text element.
    pub fn text(&self) -> Option<&str> {
        match self {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }
}

/// A single page of the exported document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// Page number (1-indexed)
    pub number: u32,

    /// Elements in paint order
    pub elements: Vec<Element>,
}

impl PageContent {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }

    /// Add an element to the page.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Text lines on the page, in paint order.
    pub fn text_lines(&self) -> Vec<&str> {
        self.elements.iter().filter_map(Element::text).collect()
    }

    /// Check if the page has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// The artifact handed to the host's download facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedDocument {
    /// Artifact filename
    pub filename: String,

    /// Strategy that produced the document
    pub strategy: StrategyKind,

    /// Page size shared by every page
    pub format: PageFormat,

    /// Document title written to the PDF info dictionary
    pub title: String,

    /// Pages in order
    pub pages: Vec<PageContent>,
}

impl ExportedDocument {
    /// Create an empty document.
    pub fn new(filename: impl Into<String>, strategy: StrategyKind, format: PageFormat) -> Self {
        Self {
            filename: filename.into(),
            strategy,
            format,
            title: String::new(),
            pages: Vec::new(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&PageContent> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: PageContent) {
        self.pages.push(page);
    }

    /// Every text line in the document, page by page.
    pub fn text_lines(&self) -> Vec<&str> {
        self.pages.iter().flat_map(PageContent::text_lines).collect()
    }

    /// Placement of the first embedded image, if any.
    pub fn image_placement(&self) -> Option<&Placement> {
        self.pages
            .iter()
            .flat_map(|page| page.elements.iter())
            .find_map(|element| match element {
                Element::Image { placement, .. } => Some(placement),
                _ => None,
            })
    }
}
