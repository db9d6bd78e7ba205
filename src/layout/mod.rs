//! Page layout for exported documents.
//!
//! Everything here is a pure function of its inputs and the
//! [`ExportConfig`](crate::ExportConfig), so placement and pagination can
//! be tested without a rendering environment.

mod flow;
pub mod metrics;
mod placement;

pub use flow::{flow_lines, wrap_line};
pub use placement::Placement;
