//! Entry resolution for the wiki.
//!
//! [`Wiki`] sits between the HTTP handlers and the entry [`Storage`] and
//! decides what a request means:
//!
//! - [`Wiki::resolve_view`]: render an exact match, or list related titles
//! - [`Wiki::resolve_search`]: redirect to an exact match, or list related titles
//! - [`Wiki::resolve_create`]: save a new entry, or report a conflict
//! - [`Wiki::resolve_edit`]: save unconditionally
//! - [`Wiki::resolve_random`]: pick a title uniformly at random
//!
//! Expected outcomes (no match, title taken) are decision variants. Only
//! storage failures surface as [`WikiError`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use wiki_site::{ViewDecision, Wiki};
//! use wiki_storage_fs::FsStorage;
//!
//! let wiki = Wiki::new(Arc::new(FsStorage::new(PathBuf::from("entries"))));
//! match wiki.resolve_view("python")? {
//!     ViewDecision::Found { title, html, .. } => println!("{title}: {html}"),
//!     ViewDecision::NotFoundButRelated { matches, .. } => println!("see also: {matches:?}"),
//! }
//! ```

mod search;
mod wiki;

pub use search::matching_titles;
pub use wiki::{CreateDecision, SearchDecision, ViewDecision, Wiki, WikiError};
pub use wiki_storage::{Entry, Storage};
