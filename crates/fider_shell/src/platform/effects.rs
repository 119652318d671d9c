use std::time::Duration;

use fider_core::{Effect, Msg};
use fider_engine::{EngineEvent, EngineHandle};
use fider_logging::{shell_debug, shell_info, shell_warn};

use super::history::History;

/// Carries core effects out to the engine and the history, and engine events
/// back in as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>, history: &mut History) {
        for effect in effects {
            match effect {
                Effect::CancelPending => {
                    self.engine.cancel_pending();
                }
                Effect::ReplaceUrl { location } => {
                    shell_info!("replaceState {}", location);
                    history.replace(location);
                }
                Effect::ScheduleSearch { generation, delay } => {
                    shell_debug!(
                        "arming debounce generation={} delay_ms={}",
                        generation,
                        delay.as_millis()
                    );
                    self.engine.schedule(generation, delay);
                }
                Effect::SearchPosts {
                    generation,
                    request,
                } => {
                    shell_info!(
                        "searching generation={} query={:?} view={:?} tags={} limit={:?}",
                        generation,
                        request.query,
                        request.view,
                        request.tags.len(),
                        request.limit
                    );
                    self.engine.search(generation, request);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine event.
    pub fn poll(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DebounceElapsed { generation } => Msg::DebounceElapsed { generation },
        EngineEvent::SearchCompleted { generation, result } => Msg::SearchCompleted {
            generation,
            result: result.map_err(|err| {
                shell_warn!("search generation={} failed: {}", generation, err);
                err.to_string()
            }),
        },
    }
}
