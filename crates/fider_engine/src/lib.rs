//! Fider engine: search requests and timers behind the core's effects.
mod client;
mod engine;
mod types;

pub use client::{ClientSettings, ReqwestSearchClient, SearchClient};
pub use engine::EngineHandle;
pub use types::{EngineError, EngineEvent, FailureKind, SearchError};
