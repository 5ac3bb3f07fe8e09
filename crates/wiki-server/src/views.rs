//! HTML views.
//!
//! Every page shares one layout: a sidebar with the search box and site
//! links, and a main column with the page content. All user-supplied text
//! is escaped here. Entry bodies arrive already rendered.

use std::fmt::Write;

use axum::http::StatusCode;
use wiki_renderer::{TocEntry, escape_html as escape};

use crate::handlers::{edit_path, entry_path};

/// Inline stylesheet shared by all pages.
const STYLE: &str = "\
body { margin: 0; font-family: system-ui, sans-serif; color: #1f2937; }
.layout { display: flex; min-height: 100vh; }
aside { width: 240px; flex-shrink: 0; padding: 1.5rem 1rem; border-right: 1px solid #e5e7eb; }
aside ul { list-style: none; padding: 0; }
aside li { margin: 0.5rem 0; }
main { flex: 1; min-width: 0; padding: 1.5rem 2rem; max-width: 56rem; }
.toc { font-size: 0.875rem; border-left: 2px solid #e5e7eb; padding-left: 1rem; }
textarea { width: 100%; min-height: 20rem; font-family: ui-monospace, monospace; }
input[type=text] { width: 100%; box-sizing: border-box; }
";

/// Wrap page content in the shared layout.
fn layout(title: &str, content: &str) -> String {
    let mut html = String::with_capacity(content.len() + 2048);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(title));
    let _ = writeln!(html, "<style>\n{STYLE}</style>");
    html.push_str("</head>\n<body>\n<div class=\"layout\">\n");

    render_sidebar(&mut html);

    html.push_str("<main>\n");
    html.push_str(content);
    html.push_str("\n</main>\n</div>\n</body>\n</html>");
    html
}

/// Search box and site links.
///
/// The search form always posts to `/`, so it works from pages served by
/// GET-only routes.
fn render_sidebar(html: &mut String) {
    html.push_str("<aside>\n");
    html.push_str("<h2><a href=\"/\">Wiki</a></h2>\n");
    html.push_str("<form method=\"post\" action=\"/\">\n");
    html.push_str(
        "<input type=\"text\" name=\"q\" placeholder=\"Search Encyclopedia\" aria-label=\"Search\">\n",
    );
    html.push_str("</form>\n");
    html.push_str("<ul>\n");
    html.push_str("<li><a href=\"/\">Home</a></li>\n");
    html.push_str("<li><a href=\"/wiki/create/\">Create New Page</a></li>\n");
    html.push_str("<li><a href=\"/wiki/random/\">Random Page</a></li>\n");
    html.push_str("</ul>\n</aside>\n");
}

/// Render a list of entry links.
fn render_title_list(html: &mut String, titles: &[String]) {
    html.push_str("<ul>\n");
    for title in titles {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape(&entry_path(title)),
            escape(title)
        );
    }
    html.push_str("</ul>\n");
}

/// Render the table of contents for an entry.
fn render_toc(html: &mut String, toc: &[TocEntry]) {
    if toc.is_empty() {
        return;
    }
    html.push_str("<nav class=\"toc\">\n<h4>On this page</h4>\n<ul>\n");
    for entry in toc {
        let _ = writeln!(
            html,
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>",
            entry.level,
            escape(&entry.id),
            escape(&entry.title)
        );
    }
    html.push_str("</ul>\n</nav>\n");
}

/// Home page listing every entry.
pub(crate) fn index(titles: &[String]) -> String {
    let mut content = String::from("<h1>All Pages</h1>\n");
    if titles.is_empty() {
        content.push_str(
            "<p>The wiki is empty. <a href=\"/wiki/create/\">Create the first page</a>.</p>\n",
        );
    } else {
        render_title_list(&mut content, titles);
    }
    layout("Encyclopedia", &content)
}

/// Rendered entry with its table of contents and an edit link.
pub(crate) fn entry(title: &str, entry_title: &str, html: &str, toc: &[TocEntry]) -> String {
    let mut content = String::with_capacity(html.len() + 512);
    render_toc(&mut content, toc);
    content.push_str("<article>\n");
    content.push_str(html);
    content.push_str("\n</article>\n");
    let _ = writeln!(
        content,
        "<p><a href=\"{}\">Edit this page</a></p>",
        escape(&edit_path(entry_title))
    );
    layout(title, &content)
}

/// Titles related to a search query.
pub(crate) fn search_results(query: &str, matches: &[String]) -> String {
    let mut content = String::from("<h1>Search Results</h1>\n");
    if matches.is_empty() {
        let _ = writeln!(
            content,
            "<p>No pages match <strong>{}</strong>.</p>",
            escape(query)
        );
    } else {
        if !query.is_empty() {
            let _ = writeln!(
                content,
                "<p>Pages containing <strong>{}</strong>:</p>",
                escape(query)
            );
        }
        render_title_list(&mut content, matches);
    }
    layout("Search Results", &content)
}

/// Informational page for a title with no entry.
pub(crate) fn not_found(query: &str, matches: &[String]) -> String {
    let mut content = String::from("<h1>Page Not Found</h1>\n");
    let _ = writeln!(
        content,
        "<p>There is no page named <strong>{}</strong>. \
         <a href=\"/wiki/create/\">Create it</a>.</p>",
        escape(query)
    );
    if !matches.is_empty() {
        content.push_str("<h2>Related pages</h2>\n");
        render_title_list(&mut content, matches);
    }
    layout("Page Not Found", &content)
}

/// Create was rejected because the title is taken.
pub(crate) fn conflict(title: &str) -> String {
    let content = format!(
        "<h1>Page Already Exists</h1>\n\
         <p>A page named <a href=\"{}\">{}</a> already exists. \
         <a href=\"{}\">Edit it</a> instead.</p>\n",
        escape(&entry_path(title)),
        escape(title),
        escape(&edit_path(title))
    );
    layout("Page Already Exists", &content)
}

/// Form for a new entry.
pub(crate) fn create_form() -> String {
    let content = "<h1>Create New Page</h1>\n\
                   <form method=\"post\" action=\"/wiki/create/\">\n\
                   <p><label>Title <input type=\"text\" name=\"title\" required></label></p>\n\
                   <p><textarea name=\"content\" aria-label=\"Content\" \
                   placeholder=\"# Title\"></textarea></p>\n\
                   <p><button type=\"submit\">Save</button></p>\n\
                   </form>\n";
    layout("Create New Page", content)
}

/// Form for editing an entry, pre-filled with its stored body.
pub(crate) fn edit_form(title: &str, body: &str) -> String {
    let mut content = String::with_capacity(body.len() + 512);
    let _ = writeln!(content, "<h1>Edit {}</h1>", escape(title));
    content.push_str("<form method=\"post\" action=\"/wiki/edit/\">\n");
    let _ = writeln!(
        content,
        "<input type=\"hidden\" name=\"title\" value=\"{}\">",
        escape(title)
    );
    let _ = writeln!(
        content,
        "<p><textarea name=\"content\" aria-label=\"Content\">{}</textarea></p>",
        escape(body)
    );
    content.push_str("<p><button type=\"submit\">Save</button></p>\n</form>\n");
    layout(&format!("Edit {title}"), &content)
}

/// Generic failure page.
pub(crate) fn error_page(status: StatusCode, message: &str) -> String {
    let heading = status.canonical_reason().unwrap_or("Error");
    let content = format!(
        "<h1>{}</h1>\n<p>{}</p>\n",
        escape(heading),
        escape(message)
    );
    layout(heading, &content)
}
