//! Ticket view tree: the rendered on-screen ticket as the pipeline sees it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known identity of the ticket view on the ticket screen.
pub const TICKET_VIEW_ID: &str = "ticket";

/// Element tag of a view node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tag {
    H1,
    H2,
    H3,
    Div,
    Span,
    P,
    Other(String),
}

impl Tag {
    /// Headings get a marker line in the text fallback.
    pub fn is_heading(&self) -> bool {
        matches!(self, Tag::H1 | Tag::H2 | Tag::H3)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::P => "p",
            Tag::Other(name) => name.as_str(),
        }
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "div" => Tag::Div,
            "span" => Tag::Span,
            "p" => Tag::P,
            other => Tag::Other(other.to_string()),
        }
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::from(name.to_string())
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSS `display` of a node. `None` means the node is not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    #[default]
    Block,
    Inline,
    Flex,
    Grid,
    None,
}

/// CSS `visibility` of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// A text leaf
    Text {
        /// Raw text content
        text: String,
    },

    /// A container element
    Element {
        /// Element tag
        tag: Tag,
        /// Element identity, if any
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// An image element
    Image {
        /// Image source (URL, data URI or relative path)
        src: String,
        /// Whether the image was loaded with CORS permission
        #[serde(default)]
        cors: bool,
    },
}

/// A node of the rendered view tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewNode {
    /// Node kind
    #[serde(flatten)]
    pub kind: NodeKind,

    /// Computed display
    #[serde(default, skip_serializing_if = "is_default")]
    pub display: Display,

    /// Computed visibility
    #[serde(default, skip_serializing_if = "is_default")]
    pub visibility: Visibility,

    /// Child nodes in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

impl ViewNode {
    fn from_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            display: Display::default(),
            visibility: Visibility::default(),
            children: Vec::new(),
        }
    }

    /// Create a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::Text { text: text.into() })
    }

    /// Create an empty element.
    pub fn element(tag: impl Into<Tag>) -> Self {
        Self::from_kind(NodeKind::Element {
            tag: tag.into(),
            id: None,
        })
    }

    /// Create a `div` element.
    pub fn div() -> Self {
        Self::element(Tag::Div)
    }

    /// Create a heading (level 1-3, clamped) holding a single text leaf.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let tag = match level {
            0 | 1 => Tag::H1,
            2 => Tag::H2,
            _ => Tag::H3,
        };
        Self::element(tag).with_child(Self::text(text))
    }

    /// Create an image element.
    pub fn image(src: impl Into<String>, cors: bool) -> Self {
        Self::from_kind(NodeKind::Image {
            src: src.into(),
            cors,
        })
    }

    /// Set the element identity. No effect on text or image nodes.
    pub fn with_id(mut self, new_id: impl Into<String>) -> Self {
        if let NodeKind::Element { ref mut id, .. } = self.kind {
            *id = Some(new_id.into());
        }
        self
    }

    /// Append a child.
    pub fn with_child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set `display`.
    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    /// Shorthand for `display: none`.
    pub fn display_none(self) -> Self {
        self.with_display(Display::None)
    }

    /// Shorthand for `visibility: hidden`.
    pub fn hidden(mut self) -> Self {
        self.visibility = Visibility::Hidden;
        self
    }

    /// Whether this node (and therefore its subtree) is suppressed.
    pub fn is_suppressed(&self) -> bool {
        self.display == Display::None || self.visibility == Visibility::Hidden
    }

    /// Element tag, if this is an element.
    pub fn tag(&self) -> Option<&Tag> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Element identity, if any.
    pub fn id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { id, .. } => id.as_deref(),
            _ => None,
        }
    }

    /// Whether this is a heading element.
    pub fn is_heading(&self) -> bool {
        self.tag().is_some_and(Tag::is_heading)
    }

    /// Concatenated text of all rendered descendants.
    ///
    /// Suppressed subtrees contribute nothing.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        self.collect_visible_text(&mut out);
        out
    }

    fn collect_visible_text(&self, out: &mut String) {
        if self.is_suppressed() {
            return;
        }
        if let NodeKind::Text { text } = &self.kind {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_visible_text(out);
        }
    }

    /// Rendered image nodes, with their ancestors' suppression applied.
    pub fn visible_images(&self) -> Vec<(&str, bool)> {
        let mut images = Vec::new();
        self.collect_images(&mut images);
        images
    }

    fn collect_images<'a>(&'a self, out: &mut Vec<(&'a str, bool)>) {
        if self.is_suppressed() {
            return;
        }
        if let NodeKind::Image { src, cors } = &self.kind {
            out.push((src.as_str(), *cors));
        }
        for child in &self.children {
            child.collect_images(out);
        }
    }

    /// Total number of nodes in the subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ViewNode::node_count).sum::<usize>()
    }
}

/// Host-provided screenshot of a view at 1x device scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Encoded image bytes (PNG)
    pub data: Vec<u8>,
}

impl Snapshot {
    /// Wrap encoded image bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Read a screenshot from disk.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::new(std::fs::read(path)?))
    }

    /// Size of the encoded data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A rendered ticket view.
///
/// Owned by the calling UI; the export pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketView {
    /// View identity
    #[serde(default = "default_view_id")]
    pub id: String,

    /// Scroll width in CSS pixels
    pub scroll_width: u32,

    /// Scroll height in CSS pixels
    pub scroll_height: u32,

    /// Root of the node tree
    pub root: ViewNode,

    /// Booking reference shown on the ticket, used to name artifacts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Screenshot supplied by the host, if it can take one
    #[serde(skip)]
    pub snapshot: Option<Snapshot>,
}

fn default_view_id() -> String {
    TICKET_VIEW_ID.to_string()
}

impl TicketView {
    /// Create a view with the well-known ticket identity.
    pub fn new(scroll_width: u32, scroll_height: u32, root: ViewNode) -> Self {
        Self {
            id: default_view_id(),
            scroll_width,
            scroll_height,
            root,
            reference: None,
            snapshot: None,
        }
    }

    /// Parse a view from JSON.
    pub fn from_json(data: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Serialize the view to pretty JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the view identity.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the booking reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Attach a host screenshot.
    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// View dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.scroll_width, self.scroll_height)
    }

    /// Check if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.scroll_width == 0 || self.scroll_height == 0
    }
}
