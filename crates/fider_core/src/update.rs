use std::collections::BTreeSet;

use crate::{Effect, Msg, Phase, SearchState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SearchState, msg: Msg) -> (SearchState, Vec<Effect>) {
    if state.is_unmounted() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::QueryChanged(query) => {
            if state.filter().query == query {
                return (state, Vec::new());
            }
            state.filter_mut().query = query;
            restart_search(&mut state)
        }
        Msg::SearchCleared => {
            if state.filter().query.is_empty() {
                return (state, Vec::new());
            }
            state.filter_mut().query.clear();
            restart_search(&mut state)
        }
        Msg::ViewChanged(view) => {
            if state.filter().view == view {
                return (state, Vec::new());
            }
            state.filter_mut().view = view;
            restart_search(&mut state)
        }
        Msg::TagToggled(tag) => {
            if tag.is_empty() {
                return (state, Vec::new());
            }
            let tags = &mut state.filter_mut().tags;
            if !tags.remove(&tag) {
                tags.insert(tag);
            }
            restart_search(&mut state)
        }
        Msg::TagsChanged(tags) => {
            let tags: BTreeSet<String> = tags.into_iter().filter(|tag| !tag.is_empty()).collect();
            if state.filter().tags == tags {
                return (state, Vec::new());
            }
            state.filter_mut().tags = tags;
            restart_search(&mut state)
        }
        Msg::ShowMoreClicked => {
            let generation = state.grow();
            vec![
                Effect::CancelPending,
                Effect::ReplaceUrl {
                    location: state.location(),
                },
                Effect::SearchPosts {
                    generation,
                    request: state.request(),
                },
            ]
        }
        Msg::DebounceElapsed { generation } => {
            if generation != state.generation() || state.phase() != Phase::Debouncing {
                return (state, Vec::new());
            }
            state.begin_request();
            vec![Effect::SearchPosts {
                generation,
                request: state.request(),
            }]
        }
        Msg::SearchCompleted { generation, result } => {
            if generation != state.generation() || state.phase() != Phase::AwaitingResponse {
                return (state, Vec::new());
            }
            match result {
                Ok(posts) => state.commit(posts),
                Err(message) => state.fail(message),
            }
            Vec::new()
        }
        Msg::Unmounted => {
            state.unmount();
            vec![Effect::CancelPending]
        }
    };

    (state, effects)
}

fn restart_search(state: &mut SearchState) -> Vec<Effect> {
    let generation = state.restart();
    vec![
        Effect::CancelPending,
        Effect::ReplaceUrl {
            location: state.location(),
        },
        Effect::ScheduleSearch {
            generation,
            delay: state.settings().debounce,
        },
    ]
}
