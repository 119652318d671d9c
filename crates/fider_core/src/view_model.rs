use crate::{FilterState, Phase, Post};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchViewModel {
    pub filter: FilterState,
    pub phase: Phase,
    /// `None` while a fresh search is loading after a filter change.
    pub posts: Option<Vec<Post>>,
    pub loading: bool,
    pub can_show_more: bool,
    pub last_error: Option<String>,
    pub dirty: bool,
}

impl SearchViewModel {
    /// Whether the filter column is shown; it hides while free text is active.
    pub fn shows_filters(&self) -> bool {
        self.filter.query.is_empty()
    }

    pub fn post_count(&self) -> usize {
        self.posts.as_ref().map_or(0, Vec::len)
    }
}
