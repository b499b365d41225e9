//! HTML renderer built on pulldown-cmark.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::heading::HeadingState;
use crate::render::{Render, RenderedContent};

/// Renders markdown to HTML with anchored headings.
///
/// Every heading gets an `id` attribute (slugified text, or an explicit
/// `{#id}`), and headings are collected into a table of contents. The
/// first H1 is reported as the page title but still rendered.
#[derive(Debug, Clone, Copy)]
pub struct HtmlRenderer {
    gfm: bool,
    extract_title: bool,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    /// Create a renderer with GFM and title extraction enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            extract_title: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Enable or disable title extraction from the first H1.
    #[must_use]
    pub fn with_title_extraction(mut self, enabled: bool) -> Self {
        self.extract_title = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let base = Options::ENABLE_HEADING_ATTRIBUTES;
        if self.gfm {
            base | Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            base
        }
    }
}

impl Render for HtmlRenderer {
    fn render(&self, markdown: &str) -> RenderedContent {
        if markdown.trim().is_empty() {
            return RenderedContent::default();
        }

        let mut headings = HeadingState::new(self.extract_title);
        let mut events: Vec<Event<'_>> = Vec::new();
        // Index of the open heading's start event and its plain text so far.
        let mut open_heading: Option<usize> = None;
        let mut heading_text = String::new();

        for event in Parser::new_ext(markdown, self.parser_options()) {
            match &event {
                Event::Start(Tag::Heading { .. }) => {
                    open_heading = Some(events.len());
                    heading_text.clear();
                }
                Event::Text(text) | Event::Code(text) if open_heading.is_some() => {
                    heading_text.push_str(text);
                }
                Event::End(TagEnd::Heading(level)) => {
                    if let Some(start) = open_heading.take()
                        && let Some(Event::Start(Tag::Heading { id, .. })) = events.get_mut(start)
                    {
                        let anchor = headings.complete_heading(
                            heading_level_to_num(*level),
                            &heading_text,
                            id.as_deref(),
                        );
                        *id = Some(anchor.into());
                    }
                }
                _ => {}
            }
            events.push(event);
        }

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        let (title, toc) = headings.into_parts();
        RenderedContent { html, title, toc }
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
