use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::querystring::{self, FilterState, DEFAULT_LIMIT};
use crate::view_model::SearchViewModel;

/// Token identifying one debounce/request cycle. Only the latest may commit.
pub type Generation = u64;

/// Post summary as returned by the search endpoint; the shape is owned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Post(Value);

impl Post {
    pub fn number(&self) -> Option<u64> {
        self.0.get("number").and_then(Value::as_u64)
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Post {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Debouncing,
    AwaitingResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Quiet interval before a filter change turns into a request.
    pub debounce: Duration,
    pub page_size: u32,
    /// Growth of the limit on every "show more".
    pub page_step: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(200),
            page_size: DEFAULT_LIMIT,
            page_step: 10,
        }
    }
}

/// Parameters sent to the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    pub query: String,
    pub view: String,
    pub limit: Option<u32>,
    pub tags: BTreeSet<String>,
}

impl SearchRequest {
    /// Query string for the request, using the same rules as the page URL.
    pub fn to_query_string(&self) -> String {
        querystring::encode(&FilterState {
            query: self.query.clone(),
            view: self.view.clone(),
            tags: self.tags.clone(),
            limit: self.limit,
        })
    }
}

impl From<&FilterState> for SearchRequest {
    fn from(filter: &FilterState) -> Self {
        let filter = filter.normalized();
        Self {
            query: filter.query,
            view: filter.view,
            limit: filter.limit,
            tags: filter.tags,
        }
    }
}

/// Search state of one mounted listing page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    path: String,
    settings: SearchSettings,
    filter: FilterState,
    phase: Phase,
    generation: Generation,
    posts: Option<Vec<Post>>,
    /// Last committed list, hidden while a filter change loads.
    stashed: Option<Vec<Post>>,
    loading: bool,
    last_error: Option<String>,
    unmounted: bool,
    dirty: bool,
}

impl SearchState {
    /// Mounts a page at `path`, seeding the filter from `query_string`.
    pub fn mount(
        path: impl Into<String>,
        query_string: &str,
        initial_posts: Vec<Post>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            path: path.into(),
            settings,
            filter: querystring::decode(query_string),
            posts: Some(initial_posts),
            ..Self::default()
        }
    }

    pub fn view(&self) -> SearchViewModel {
        SearchViewModel {
            filter: self.filter.clone(),
            phase: self.phase,
            posts: self.posts.clone(),
            loading: self.loading,
            can_show_more: self.can_show_more(),
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    pub fn effective_limit(&self) -> u32 {
        self.filter.limit.unwrap_or(self.settings.page_size)
    }

    /// A full page suggests the server may have more.
    pub fn can_show_more(&self) -> bool {
        self.posts
            .as_ref()
            .is_some_and(|posts| posts.len() as u64 >= u64::from(self.effective_limit()))
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Page location for the current filter. A limit equal to the configured
    /// page size is left out, since remounting without one yields that size.
    pub(crate) fn location(&self) -> String {
        querystring::location_with_default(
            &self.path,
            &self.filter.normalized(),
            self.settings.page_size,
        )
    }

    /// The server falls back to [`DEFAULT_LIMIT`], which need not match the
    /// configured page size, so any other effective limit is sent explicitly.
    pub(crate) fn request(&self) -> SearchRequest {
        let mut request = SearchRequest::from(&self.filter);
        request.limit = Some(self.effective_limit()).filter(|limit| *limit != DEFAULT_LIMIT);
        request
    }

    pub(crate) fn filter_mut(&mut self) -> &mut FilterState {
        &mut self.filter
    }

    /// Invalidates the live token and returns the new one.
    pub(crate) fn next_generation(&mut self) -> Generation {
        self.generation += 1;
        self.generation
    }

    /// Filter changed: start over from the first page, hiding the list until
    /// the new one arrives.
    pub(crate) fn restart(&mut self) -> Generation {
        self.filter.limit = None;
        if let Some(posts) = self.posts.take() {
            self.stashed = Some(posts);
        }
        self.loading = true;
        self.last_error = None;
        self.phase = Phase::Debouncing;
        self.dirty = true;
        self.next_generation()
    }

    /// Grow the page, keeping the current list visible meanwhile.
    pub(crate) fn grow(&mut self) -> Generation {
        self.filter.limit = Some(self.effective_limit().saturating_add(self.settings.page_step));
        self.loading = true;
        self.last_error = None;
        self.phase = Phase::AwaitingResponse;
        self.dirty = true;
        self.next_generation()
    }

    pub(crate) fn begin_request(&mut self) {
        self.phase = Phase::AwaitingResponse;
    }

    pub(crate) fn commit(&mut self, posts: Vec<Post>) {
        self.posts = Some(posts);
        self.stashed = None;
        self.loading = false;
        self.phase = Phase::Idle;
        self.dirty = true;
    }

    /// The request failed: bring back whatever was last shown.
    pub(crate) fn fail(&mut self, message: String) {
        if self.posts.is_none() {
            self.posts = self.stashed.take();
        }
        self.loading = false;
        self.last_error = Some(message);
        self.phase = Phase::Idle;
        self.dirty = true;
    }

    pub(crate) fn unmount(&mut self) {
        self.next_generation();
        self.unmounted = true;
        self.loading = false;
        self.phase = Phase::Idle;
    }
}
