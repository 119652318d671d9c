mod app;
mod config;
mod effects;
mod history;
mod logging;
mod ui;

pub use app::{run_app, ShellOptions};
pub use logging::LogDestination;
