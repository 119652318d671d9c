/// In-process stand-in for the browser history.
///
/// Navigations push entries; search state updates only ever replace the
/// current one so filter changes do not grow the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
        }
    }

    pub fn current(&self) -> &str {
        self.entries.last().map_or("", String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn push(&mut self, location: impl Into<String>) {
        self.entries.push(location.into());
    }

    pub fn replace(&mut self, location: impl Into<String>) {
        match self.entries.last_mut() {
            Some(current) => *current = location.into(),
            None => self.entries.push(location.into()),
        }
    }
}

/// Splits a location into path and query string, dropping any fragment.
pub fn split_location(location: &str) -> (&str, &str) {
    let without_fragment = location.split_once('#').map_or(location, |(head, _)| head);
    without_fragment
        .split_once('?')
        .unwrap_or((without_fragment, ""))
}
