//! Title filtering for site listings.
//!
//! Matching is a plain substring test on Unicode-lowercased text: case is
//! ignored, accents are not ("café" matches "CAFÉ", "cafe" does not).
//! Query text is never interpreted as a pattern.

use crate::models::Titled;
use tracing::debug;

/// A parsed search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteQuery {
    /// No term, or only whitespace: every site is shown.
    All,
    /// Lowercased, trimmed term to look for inside titles.
    Contains(String),
}

impl SiteQuery {
    pub fn parse(term: Option<&str>) -> Self {
        match term.map(str::trim) {
            None | Some("") => SiteQuery::All,
            Some(t) => SiteQuery::Contains(fold(t)),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteQuery::All)
    }

    /// Untitled sites only pass the show-all query.
    pub fn matches(&self, title: Option<&str>) -> bool {
        match self {
            SiteQuery::All => true,
            SiteQuery::Contains(needle) => title.is_some_and(|t| fold(t).contains(needle.as_str())),
        }
    }
}

/// Lowercases one char at a time so a letter folds the same wherever it
/// sits in a word (`str::to_lowercase` maps a final capital sigma to `ς`).
fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Borrowing form of [`filter_sites`].
pub fn matching<'a, T: Titled>(
    sites: &'a [T],
    term: Option<&str>,
) -> impl Iterator<Item = &'a T> + 'a {
    let query = SiteQuery::parse(term);
    sites.iter().filter(move |s| query.matches(s.title()))
}

/// Returns the sites whose title contains `term`, in their original order.
/// An absent or blank term returns every site.
pub fn filter_sites<T: Titled + Clone>(sites: &[T], term: Option<&str>) -> Vec<T> {
    let query = SiteQuery::parse(term);
    if query.is_all() {
        return sites.to_vec();
    }
    let filtered: Vec<T> = sites
        .iter()
        .filter(|s| query.matches(s.title()))
        .cloned()
        .collect();
    debug!(
        total = sites.len(),
        matched = filtered.len(),
        "filtered sites by title"
    );
    filtered
}
