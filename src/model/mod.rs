//! Model types for ticket export.
//!
//! The input side is the rendered ticket view (a node tree plus optional
//! host screenshot). The output side is the exported document: fixed-size
//! pages of positioned images, text lines and rules that the PDF writer
//! serializes.

mod document;
mod raster;
mod ticket;
mod view;

pub use document::{Align, Element, ExportedDocument, Font, PageContent, StrategyKind};
pub use raster::Raster;
pub use ticket::Ticket;
pub use view::{Display, NodeKind, Snapshot, Tag, TicketView, ViewNode, Visibility, TICKET_VIEW_ID};
