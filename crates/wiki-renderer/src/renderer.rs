//! Markdown renderer built on `pulldown-cmark`.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::state::{HeadingState, TocEntry};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Text of the first H1 heading (if title extraction was enabled and the
    /// heading was not blank).
    pub title: Option<String>,
    /// Table of contents entries (every heading except the title).
    pub toc: Vec<TocEntry>,
}

/// Markdown renderer producing HTML.
///
/// Headings receive unique slug anchors. Raw HTML in the source is emitted as
/// escaped text, so entry bodies cannot inject markup into the page.
pub struct MarkdownRenderer {
    heading: HeadingState,
    gfm: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heading: HeadingState::new(false),
            gfm: true,
        }
    }

    /// Enable title extraction from first H1 heading.
    ///
    /// The heading is still rendered; its text is additionally returned as
    /// [`RenderResult::title`].
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.heading = HeadingState::new(true);
        self
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

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown text using the configured parser options.
    ///
    /// Each call starts from a clean heading state, so a renderer can be
    /// reused across bodies.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        self.heading.reset();
        let parser = Parser::new_ext(markdown, self.parser_options());

        let mut events: Vec<Event<'_>> = Vec::new();
        // Heading start tag and its inline events, held until the anchor is known
        let mut pending: Option<(Tag<'_>, Vec<Event<'_>>)> = None;

        for event in parser {
            let event = neutralize_html(event);
            match event {
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    self.heading.start_heading(heading_level_to_num(level));
                    let tag = Tag::Heading {
                        level,
                        id,
                        classes,
                        attrs,
                    };
                    pending = Some((tag, Vec::new()));
                }
                Event::End(TagEnd::Heading(level)) => {
                    let id = self.heading.complete_heading();
                    if let Some((tag, inner)) = pending.take() {
                        events.push(Event::Start(with_heading_id(tag, id)));
                        events.extend(inner);
                    }
                    events.push(Event::End(TagEnd::Heading(level)));
                }
                other => {
                    if let Some((_, inner)) = pending.as_mut() {
                        if let Event::Text(text) | Event::Code(text) = &other {
                            self.heading.push_text(text);
                        }
                        inner.push(other);
                    } else {
                        events.push(other);
                    }
                }
            }
        }

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());

        RenderResult {
            html: output,
            title: self.heading.take_title(),
            toc: self.heading.take_toc(),
        }
    }
}

/// Render an entry body with title extraction and default options.
///
/// # Examples
///
/// ```
/// let result = wiki_renderer::render("# CSS\n\nStyles.");
///
/// assert_eq!(result.title.as_deref(), Some("CSS"));
/// ```
pub fn render(body: &str) -> RenderResult {
    MarkdownRenderer::new()
        .with_title_extraction()
        .render_markdown(body)
}

/// Turn raw HTML events into text so they are escaped on output.
fn neutralize_html(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    }
}

/// Attach a generated anchor to a heading tag unless the source provided one.
fn with_heading_id<'a>(tag: Tag<'a>, generated: Option<String>) -> Tag<'a> {
    match tag {
        Tag::Heading {
            level,
            id,
            classes,
            attrs,
        } => Tag::Heading {
            level,
            id: id.or_else(|| generated.map(CowStr::from)),
            classes,
            attrs,
        },
        other => other,
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
