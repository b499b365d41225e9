//! Markdown rendering for help pages and their navigation summaries.
//!
//! The help view assembler treats rendering as a black box: markdown text
//! in, [`RenderedContent`] out. The [`Render`] trait is that seam, and
//! [`HtmlRenderer`] is the pulldown-cmark implementation used in production.
//!
//! # Example
//!
//! ```
//! use helpdocs_renderer::{HtmlRenderer, Render};
//!
//! let rendered = HtmlRenderer::new().render("# Billing\n\n## Invoices\n");
//! assert_eq!(rendered.title.as_deref(), Some("Billing"));
//! assert_eq!(rendered.toc[0].id, "invoices");
//! ```

mod heading;
mod html;
mod render;

pub use heading::{TocEntry, slugify};
pub use html::HtmlRenderer;
pub use render::{Render, RenderedContent};
