//! Provider-agnostic search result types
//!
//! These are the only result types callers see. They deliberately carry no
//! serde attributes: the provider's JSON shape stays inside the backend that
//! decodes it.

/// A single normalized search hit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// The title of the result
    pub title: String,
    /// The URL of the result
    pub link: String,
    /// A plain-text snippet of the result
    pub snippet: String,
}

/// The results of a single query, in the provider's order
///
/// `SearchResults::default()` is the canonical empty result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub results: Vec<SearchResult>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.results.iter()
    }
}

impl FromIterator<SearchResult> for SearchResults {
    fn from_iter<I: IntoIterator<Item = SearchResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SearchResults {
    type Item = SearchResult;
    type IntoIter = std::vec::IntoIter<SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a SearchResults {
    type Item = &'a SearchResult;
    type IntoIter = std::slice::Iter<'a, SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
