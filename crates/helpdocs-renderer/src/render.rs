//! Rendering seam between the help pages and the markdown engine.

use crate::heading::TocEntry;

/// Result of rendering one markdown document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedContent {
    /// Rendered HTML.
    pub html: String,
    /// Text of the first H1 heading, if any.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,
    /// Headings below the title, in document order.
    pub toc: Vec<TocEntry>,
}

impl RenderedContent {
    /// Check whether nothing was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// Markdown-to-content function.
///
/// Implementations must be pure: the same input always yields the same output
/// and rendering never touches the filesystem.
pub trait Render: Send + Sync {
    /// Render markdown text. Empty input yields empty content.
    fn render(&self, markdown: &str) -> RenderedContent;
}
