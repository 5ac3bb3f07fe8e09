//! Naive title search.

/// Titles containing `query` as a case-insensitive substring.
///
/// Keeps the order of `titles` and drops repeated titles. An empty query
/// matches every title.
///
/// # Examples
///
/// ```
/// use wiki_site::matching_titles;
///
/// let titles = vec!["Python".to_owned(), "Pythonic History".to_owned(), "CSS".to_owned()];
///
/// assert_eq!(matching_titles(&titles, "PYTHON"), vec!["Python", "Pythonic History"]);
/// ```
pub fn matching_titles(titles: &[String], query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    let mut matches: Vec<String> = Vec::new();
    for title in titles {
        if title.to_lowercase().contains(&needle) && !matches.contains(title) {
            matches.push(title.clone());
        }
    }
    matches
}
