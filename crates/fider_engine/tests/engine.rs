use std::sync::{Arc, Mutex};
use std::time::Duration;

use fider_core::{update, Effect, Msg, Phase, Post, SearchRequest, SearchSettings, SearchState};
use fider_engine::{EngineEvent, EngineHandle, FailureKind, SearchClient, SearchError};
use serde_json::json;

const WAIT: Duration = Duration::from_secs(2);

/// Answers after a per-query delay so tests can force out-of-order completion.
struct ScriptedClient {
    seen: Mutex<Vec<String>>,
}

impl ScriptedClient {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SearchClient for ScriptedClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Post>, SearchError> {
        self.seen.lock().unwrap().push(request.query.clone());
        match request.query.as_str() {
            "slow" => {
                tokio::time::sleep(Duration::from_millis(150)).await;
                Ok(vec![Post::from(json!({ "title": "slow" }))])
            }
            "broken" => Err(SearchError {
                kind: FailureKind::HttpStatus(500),
                message: "500 Internal Server Error".into(),
            }),
            other => Ok(vec![Post::from(json!({ "title": other }))]),
        }
    }
}

fn request(query: &str) -> SearchRequest {
    SearchRequest {
        query: query.into(),
        ..SearchRequest::default()
    }
}

#[test]
fn scheduled_timer_fires_once() {
    let engine = EngineHandle::with_client(ScriptedClient::new()).unwrap();
    engine.schedule(4, Duration::from_millis(20));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::DebounceElapsed { generation: 4 })
    );
    assert_eq!(engine.recv_timeout(Duration::from_millis(100)), None);
}

#[test]
fn cancelled_timer_never_fires() {
    let engine = EngineHandle::with_client(ScriptedClient::new()).unwrap();
    engine.schedule(1, Duration::from_millis(100));
    engine.cancel_pending();
    engine.schedule(2, Duration::from_millis(10));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::DebounceElapsed { generation: 2 })
    );
    assert_eq!(engine.recv_timeout(Duration::from_millis(250)), None);
}

#[test]
fn search_results_carry_their_generation() {
    let client = ScriptedClient::new();
    let engine = EngineHandle::with_client(client.clone()).unwrap();
    engine.search(1, request("slow"));
    engine.search(2, request("fast"));

    let first = engine.recv_timeout(WAIT).expect("first event");
    let second = engine.recv_timeout(WAIT).expect("second event");

    // The later request answers first; each result keeps its own tag.
    match (first, second) {
        (
            EngineEvent::SearchCompleted {
                generation: 2,
                result: Ok(fast),
            },
            EngineEvent::SearchCompleted {
                generation: 1,
                result: Ok(slow),
            },
        ) => {
            assert_eq!(fast[0].title(), Some("fast"));
            assert_eq!(slow[0].title(), Some("slow"));
        }
        other => panic!("unexpected events {other:?}"),
    }
    assert_eq!(client.seen().len(), 2);
}

#[test]
fn search_failure_is_reported_not_fatal() {
    let engine = EngineHandle::with_client(ScriptedClient::new()).unwrap();
    engine.search(3, request("broken"));

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::SearchCompleted {
            generation: 3,
            result: Err(err),
        }) => assert_eq!(err.kind, FailureKind::HttpStatus(500)),
        other => panic!("unexpected event {other:?}"),
    }

    engine.search(4, request("again"));
    assert!(matches!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::SearchCompleted {
            generation: 4,
            result: Ok(_),
        })
    ));
}

/// Carries out the coordinator's effects the way the shell does, minus the history.
fn run_effects(engine: &EngineHandle, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::CancelPending => engine.cancel_pending(),
            Effect::ScheduleSearch { generation, delay } => engine.schedule(generation, delay),
            Effect::SearchPosts {
                generation,
                request,
            } => engine.search(generation, request),
            Effect::ReplaceUrl { .. } => {}
        }
    }
}

fn into_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DebounceElapsed { generation } => Msg::DebounceElapsed { generation },
        EngineEvent::SearchCompleted { generation, result } => Msg::SearchCompleted {
            generation,
            result: result.map_err(|err| err.to_string()),
        },
    }
}

#[test]
fn typing_burst_reaches_the_server_once_with_the_last_query() {
    let client = ScriptedClient::new();
    let engine = EngineHandle::with_client(client.clone()).unwrap();
    let settings = SearchSettings {
        debounce: Duration::from_millis(40),
        ..SearchSettings::default()
    };
    let mut state = SearchState::mount("/", "", Vec::new(), settings);

    for text in ["d", "da", "dar"] {
        let (next, effects) = update(state, Msg::QueryChanged(text.into()));
        state = next;
        run_effects(&engine, effects);
    }

    let mut completed = 0;
    while state.phase() != Phase::Idle {
        let event = engine.recv_timeout(WAIT).expect("engine event");
        if matches!(event, EngineEvent::SearchCompleted { .. }) {
            completed += 1;
        }
        let (next, effects) = update(state, into_msg(event));
        state = next;
        run_effects(&engine, effects);
    }
    // Nothing else left over from the cancelled timers.
    assert_eq!(engine.recv_timeout(Duration::from_millis(150)), None);

    assert_eq!(completed, 1);
    assert_eq!(client.seen(), vec!["dar".to_string()]);
    assert_eq!(state.view().posts.unwrap()[0].title(), Some("dar"));
}
