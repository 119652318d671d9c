use std::collections::BTreeSet;

use fider_core::querystring::{decode, encode, location};
use fider_core::FilterState;
use pretty_assertions::assert_eq;

fn tags(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[test]
fn default_state_encodes_to_empty() {
    assert_eq!(encode(&FilterState::default()), "");
}

#[test]
fn default_limit_and_empty_view_are_omitted() {
    let state = FilterState {
        query: "hi there".into(),
        view: String::new(),
        tags: tags(&["b", "a"]),
        limit: Some(30),
    };
    let encoded = encode(&state);
    assert_eq!(encoded, "tags=a,b&query=hi+there");
    assert!(!encoded.contains("view"));
    assert!(!encoded.contains("limit"));
}

#[test]
fn non_default_fields_round_trip() {
    let state = FilterState {
        query: "single sign-on & saml?".into(),
        view: "most-wanted".into(),
        tags: tags(&["bug", "ux", "açaí"]),
        limit: Some(50),
    };
    let encoded = encode(&state);
    assert_eq!(decode(&encoded), state);
    assert_eq!(decode(&format!("?{encoded}")), state);
}

#[test]
fn keys_follow_fixed_order() {
    let state = FilterState {
        query: "q".into(),
        view: "recent".into(),
        tags: tags(&["x"]),
        limit: Some(40),
    };
    assert_eq!(encode(&state), "tags=x&query=q&view=recent&limit=40");
}

#[test]
fn decode_missing_keys_yields_defaults() {
    assert_eq!(decode(""), FilterState::default());
    assert_eq!(decode("?"), FilterState::default());
    assert_eq!(decode("?utm_source=mail"), FilterState::default());
}

#[test]
fn decode_degrades_on_malformed_input() {
    let state = decode("?limit=lots&tags=,,a,,b,&query=%ZZ&&=&view");
    assert_eq!(state.limit, None);
    assert_eq!(state.tags, tags(&["a", "b"]));
    assert_eq!(state.view, "");
    assert!(!state.query.is_empty());
}

#[test]
fn decode_handles_plus_and_percent() {
    let state = decode("?query=hello+world%21&limit=60");
    assert_eq!(state.query, "hello world!");
    assert_eq!(state.limit, Some(60));
}

#[test]
fn first_repeated_key_wins() {
    let state = decode("?view=recent&view=trending");
    assert_eq!(state.view, "recent");
}

#[test]
fn location_drops_question_mark_when_empty() {
    assert_eq!(location("/", &FilterState::default()), "/");
    let state = FilterState {
        view: "recent".into(),
        ..FilterState::default()
    };
    assert_eq!(location("/", &state), "/?view=recent");
}
