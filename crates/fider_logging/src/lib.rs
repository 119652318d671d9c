#![deny(missing_docs)]
//! Shared logging utilities for the shell workspace.
//!
//! Exposes the `shell_*` macros used by the engine and the host binary, a
//! per-thread navigation counter that the host bumps on every page
//! navigation, and a terminal logger initializer for tests.

use std::cell::Cell;

thread_local! {
    /// Number of navigations performed by the host on this thread.
    static NAVIGATION: Cell<u64> = const { Cell::new(0) };
}

/// Records the navigation counter for the current thread.
pub fn set_navigation(navigation: u64) {
    NAVIGATION.with(|v| v.set(navigation));
}

/// Returns the navigation counter for the current thread, 0 before the first
/// navigation.
pub fn current_navigation() -> u64 {
    NAVIGATION.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current navigation.
#[macro_export]
macro_rules! shell_trace {
    ($($arg:tt)*) => {{
        log::trace!("[nav {}] {}", $crate::current_navigation(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current navigation.
#[macro_export]
macro_rules! shell_debug {
    ($($arg:tt)*) => {{
        log::debug!("[nav {}] {}", $crate::current_navigation(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current navigation.
#[macro_export]
macro_rules! shell_info {
    ($($arg:tt)*) => {{
        log::info!("[nav {}] {}", $crate::current_navigation(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current navigation.
#[macro_export]
macro_rules! shell_warn {
    ($($arg:tt)*) => {{
        log::warn!("[nav {}] {}", $crate::current_navigation(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current navigation.
#[macro_export]
macro_rules! shell_error {
    ($($arg:tt)*) => {{
        log::error!("[nav {}] {}", $crate::current_navigation(), format_args!($($arg)*));
    }};
}

/// Initializes a terminal logger for tests.
///
/// Safe to call from every test: a second initialization is ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_counter_is_per_thread() {
        set_navigation(3);
        assert_eq!(current_navigation(), 3);

        let other = std::thread::spawn(current_navigation).join().unwrap();
        assert_eq!(other, 0);
    }

    #[test]
    fn macros_expand_without_logger() {
        shell_debug!("debug {}", 1);
        shell_info!("info {}", "two");
        shell_trace!("trace");
    }
}
