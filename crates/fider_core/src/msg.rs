use std::collections::BTreeSet;

use crate::{Generation, Post};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User typed in the search box.
    QueryChanged(String),
    /// User clicked the cancel icon of the search box.
    SearchCleared,
    /// User picked a named view (trending, recent, ...).
    ViewChanged(String),
    /// User flipped a single tag in the tags filter.
    TagToggled(String),
    /// Tags filter reported its whole selection.
    TagsChanged(BTreeSet<String>),
    /// User clicked "view more posts".
    ShowMoreClicked,
    /// Debounce timer armed for `generation` ran out.
    DebounceElapsed { generation: Generation },
    /// Search request issued for `generation` finished.
    SearchCompleted {
        generation: Generation,
        result: Result<Vec<Post>, String>,
    },
    /// Page is going away.
    Unmounted,
}
