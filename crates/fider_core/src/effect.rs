use std::time::Duration;

use crate::{Generation, SearchRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Abort any armed timer and in-flight request.
    CancelPending,
    /// Replace the current history entry; never pushes a new one.
    ReplaceUrl { location: String },
    /// Arm the debounce timer; report back with `Msg::DebounceElapsed`.
    ScheduleSearch {
        generation: Generation,
        delay: Duration,
    },
    /// Query the server now; report back with `Msg::SearchCompleted`.
    SearchPosts {
        generation: Generation,
        request: SearchRequest,
    },
}
