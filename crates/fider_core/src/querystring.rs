//! Mapping between [`FilterState`] and the URL query string.
//!
//! Keys are emitted in a fixed order (`tags`, `query`, `view`, `limit`) and
//! default values are left out, so an untouched filter encodes to `""`.
//! Tag identifiers are joined with literal commas and must not contain one.
//! Each identifier is form-urlencoded before the join, so a tag with `&` or
//! a space survives the round trip; the raw join used by the site's own
//! frontend would split or mangle it.

use std::collections::BTreeSet;

use url::form_urlencoded;

/// Page size used when the URL carries no explicit limit.
pub const DEFAULT_LIMIT: u32 = 30;

const KEY_TAGS: &str = "tags";
const KEY_QUERY: &str = "query";
const KEY_VIEW: &str = "view";
const KEY_LIMIT: &str = "limit";

/// What the user is currently asking to see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub query: String,
    pub view: String,
    pub tags: BTreeSet<String>,
    pub limit: Option<u32>,
}

impl FilterState {
    /// Copy with the free text trimmed and lowercased, as sent to the server.
    pub fn normalized(&self) -> Self {
        Self {
            query: self.query.trim().to_lowercase(),
            ..self.clone()
        }
    }
}

/// Encodes with the site-wide default page size ([`DEFAULT_LIMIT`]).
pub fn encode(state: &FilterState) -> String {
    encode_with_default(state, DEFAULT_LIMIT)
}

/// Encodes, omitting a limit equal to `default_limit`, i.e. whatever a reader
/// of this query string falls back to when no limit is given.
pub fn encode_with_default(state: &FilterState, default_limit: u32) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::with_capacity(4);

    if !state.tags.is_empty() {
        let joined = state
            .tags
            .iter()
            .map(|tag| form_urlencoded::byte_serialize(tag.as_bytes()).collect::<String>())
            .collect::<Vec<_>>()
            .join(",");
        pairs.push((KEY_TAGS, joined));
    }
    if !state.query.is_empty() {
        pairs.push((KEY_QUERY, encode_component(&state.query)));
    }
    if !state.view.is_empty() {
        pairs.push((KEY_VIEW, encode_component(&state.view)));
    }
    if let Some(limit) = state.limit.filter(|limit| *limit != default_limit) {
        pairs.push((KEY_LIMIT, limit.to_string()));
    }

    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decodes a query string, with or without its leading `?`.
///
/// Never fails: unknown keys are ignored and malformed values fall back to the
/// field default. When a key repeats, the first occurrence wins.
pub fn decode(query_string: &str) -> FilterState {
    let raw = query_string.strip_prefix('?').unwrap_or(query_string);
    let mut state = FilterState::default();
    let mut seen = [false; 4];

    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        let slot = match &*key {
            KEY_TAGS => 0,
            KEY_QUERY => 1,
            KEY_VIEW => 2,
            KEY_LIMIT => 3,
            _ => continue,
        };
        if std::mem::replace(&mut seen[slot], true) {
            continue;
        }
        match slot {
            0 => {
                state.tags = value
                    .split(',')
                    .filter(|segment| !segment.is_empty())
                    .map(ToOwned::to_owned)
                    .collect();
            }
            1 => state.query = value.into_owned(),
            2 => state.view = value.into_owned(),
            _ => state.limit = parse_limit(&value),
        }
    }

    state
}

/// Path plus encoded state, as handed to the history. The `?` is dropped when
/// nothing is encoded so that clearing every filter clears the URL.
pub fn location(path: &str, state: &FilterState) -> String {
    location_with_default(path, state, DEFAULT_LIMIT)
}

pub fn location_with_default(path: &str, state: &FilterState, default_limit: u32) -> String {
    let query = encode_with_default(state, default_limit);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn parse_limit(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|limit| *limit > 0)
}
