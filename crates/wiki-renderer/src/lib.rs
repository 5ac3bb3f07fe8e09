//! Markdown to HTML rendering for wiki entries.
//!
//! This crate turns raw entry markup into HTML with [`MarkdownRenderer`].
//! Rendering is deterministic and has no side effects. With title extraction
//! enabled, the plain text of the first level-1 heading is returned as the
//! entry's canonical title.
//!
//! # Example
//!
//! ```
//! use wiki_renderer::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new()
//!     .with_title_extraction()
//!     .render_markdown("# Python\n\n**Python** is a language.");
//!
//! assert_eq!(result.title.as_deref(), Some("Python"));
//! assert!(result.html.contains("<strong>Python</strong>"));
//! ```

mod renderer;
mod state;

pub use renderer::{MarkdownRenderer, RenderResult, render};
pub use state::{TocEntry, escape_html, slugify};
