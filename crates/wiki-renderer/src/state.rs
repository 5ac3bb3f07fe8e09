//! Heading bookkeeping for a single render pass.

use std::collections::HashMap;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// State for tracking headings and title extraction.
pub(crate) struct HeadingState {
    /// Whether to extract title from first H1.
    extract_title: bool,
    /// Extracted title from first H1.
    title: Option<String>,
    /// Whether the first H1 has been seen (blank or not).
    seen_first_h1: bool,
    /// Current heading level being processed (None if not in a heading).
    current_level: Option<u8>,
    /// Buffer for heading plain text.
    text: String,
    /// Table of contents entries.
    toc: Vec<TocEntry>,
    /// Counter for generating unique heading IDs.
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    pub(crate) fn new(extract_title: bool) -> Self {
        Self {
            extract_title,
            title: None,
            seen_first_h1: false,
            current_level: None,
            text: String::new(),
            toc: Vec::new(),
            id_counts: HashMap::new(),
        }
    }

    /// Forget everything seen in a previous render.
    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.extract_title);
    }

    /// Start tracking a heading.
    pub(crate) fn start_heading(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
    }

    /// Append text to the heading buffer.
    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Complete the current heading.
    ///
    /// Returns the unique anchor ID, or `None` if not in a heading.
    pub(crate) fn complete_heading(&mut self) -> Option<String> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let text = text.trim();
        let id = self.generate_id(text);

        // Only the first H1 is a title candidate; a blank one yields no title
        let is_title = self.extract_title && level == 1 && !self.seen_first_h1;
        if level == 1 {
            self.seen_first_h1 = true;
        }
        if is_title && !text.is_empty() {
            self.title = Some(text.to_owned());
        } else if !is_title {
            self.toc.push(TocEntry {
                level,
                title: text.to_owned(),
                id: id.clone(),
            });
        }

        Some(id)
    }

    /// Generate a unique ID for a heading.
    fn generate_id(&mut self, text: &str) -> String {
        let base_id = match slugify(text) {
            slug if slug.is_empty() => "section".to_owned(),
            slug => slug,
        };
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    /// Take the extracted title.
    pub(crate) fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }

    /// Take the table of contents entries.
    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single dashes,
/// and removes other non-alphanumeric characters.
///
/// # Examples
///
/// ```
/// use wiki_renderer::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("snake_case"), "snake-case");
        assert_eq!(slugify("Café"), "café");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_heading_state_extracts_first_h1() {
        let mut state = HeadingState::new(true);

        state.start_heading(1);
        state.push_text("My Title");
        assert_eq!(state.complete_heading().as_deref(), Some("my-title"));

        state.start_heading(2);
        state.push_text("Section");
        assert_eq!(state.complete_heading().as_deref(), Some("section"));

        state.start_heading(1);
        state.push_text("Second Top");
        state.complete_heading();

        assert_eq!(state.take_title().as_deref(), Some("My Title"));
        let toc = state.take_toc();
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[1].title, "Second Top");
    }

    #[test]
    fn test_heading_state_blank_h1_yields_no_title() {
        let mut state = HeadingState::new(true);

        state.start_heading(1);
        state.push_text("   ");
        state.complete_heading();
        state.start_heading(1);
        state.push_text("Later");
        state.complete_heading();

        assert_eq!(state.take_title(), None);
    }

    #[test]
    fn test_heading_state_without_extraction() {
        let mut state = HeadingState::new(false);

        state.start_heading(1);
        state.push_text("Title");
        state.complete_heading();

        assert_eq!(state.take_title(), None);
        assert_eq!(state.take_toc().len(), 1);
    }

    #[test]
    fn test_heading_state_unique_ids() {
        let mut state = HeadingState::new(false);

        for _ in 0..3 {
            state.start_heading(2);
            state.push_text("Usage");
            state.complete_heading();
        }

        let ids: Vec<_> = state.take_toc().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["usage", "usage-1", "usage-2"]);
    }

    #[test]
    fn test_complete_outside_heading() {
        let mut state = HeadingState::new(true);

        assert_eq!(state.complete_heading(), None);
    }
}
