/// Shortest query that is sent to a search endpoint.
pub const MIN_SEARCH_LEN: usize = 2;

/// What a search box's current text asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// Too short to search; views fall back to their unfiltered (or empty)
    /// listing without calling the API.
    Browse,
    Query(String),
}

impl SearchTerm {
    pub fn classify(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.chars().count() < MIN_SEARCH_LEN {
            SearchTerm::Browse
        } else {
            SearchTerm::Query(trimmed.to_string())
        }
    }

    pub fn is_browse(&self) -> bool {
        matches!(self, SearchTerm::Browse)
    }
}
