use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

/// Page components the shell knows how to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    ShowIdea,
    ManageMembers,
    ManageTags,
    PrivacySettings,
    Invitations,
    GeneralSettings,
    SignIn,
    SignUp,
    CompleteSignInProfile,
    MyNotifications,
    MySettings,
}

/// One entry of the route table.
///
/// `pattern` is matched literally except for two placeholders:
/// `:number` (one or more digits) and `*` (optional slash followed by anything).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePattern {
    pub id: &'static str,
    pub pattern: &'static str,
    pub page: Page,
    pub show_chrome: bool,
}

const fn route(pattern: &'static str, page: Page, id: &'static str, show_chrome: bool) -> RoutePattern {
    RoutePattern {
        id,
        pattern,
        page,
        show_chrome,
    }
}

/// Route table, evaluated top to bottom, first match wins.
///
/// Ordering invariant: a path must be listed before any shorter path that is a
/// prefix of it (`/admin/tags` before `/admin`). Patterns are anchored, so the
/// invariant only matters for entries using `*`, but keep it for all entries.
pub const ROUTES: &[RoutePattern] = &[
    route("", Page::Home, "home", true),
    route("/ideas/:number*", Page::ShowIdea, "show-idea", true),
    route("/admin/members", Page::ManageMembers, "admin-members", true),
    route("/admin/tags", Page::ManageTags, "admin-tags", true),
    route("/admin/privacy", Page::PrivacySettings, "admin-privacy", true),
    route("/admin/invitations", Page::Invitations, "admin-invitations", true),
    route("/admin", Page::GeneralSettings, "admin-general", true),
    route("/signin", Page::SignIn, "signin", false),
    route("/signup", Page::SignUp, "signup", false),
    route("/signin/verify", Page::CompleteSignInProfile, "complete-signin-profile", true),
    route("/invite/verify", Page::CompleteSignInProfile, "accept-invitation", false),
    route("/notifications", Page::MyNotifications, "my-notifications", true),
    route("/settings", Page::MySettings, "my-settings", true),
];

/// Resolved page for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    pub id: &'static str,
    pub page: Page,
    pub show_chrome: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route matches path {path:?}")]
pub struct RouteNotFoundError {
    pub path: String,
}

#[derive(Debug, Error)]
pub enum RouteTableError {
    #[error("page id {0:?} is registered more than once")]
    DuplicateId(&'static str),
    #[error("pattern {pattern:?} does not compile: {source}")]
    InvalidPattern {
        pattern: &'static str,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    matcher: Regex,
    descriptor: PageDescriptor,
}

/// Maps URL paths to page descriptors using an ordered route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<CompiledRoute>,
}

impl Router {
    pub fn new(table: &[RoutePattern]) -> Result<Self, RouteTableError> {
        let mut seen = HashSet::with_capacity(table.len());
        let mut routes = Vec::with_capacity(table.len());
        for entry in table {
            if !seen.insert(entry.id) {
                return Err(RouteTableError::DuplicateId(entry.id));
            }
            let matcher =
                compile_pattern(entry.pattern).map_err(|source| RouteTableError::InvalidPattern {
                    pattern: entry.pattern,
                    source,
                })?;
            routes.push(CompiledRoute {
                matcher,
                descriptor: PageDescriptor {
                    id: entry.id,
                    page: entry.page,
                    show_chrome: entry.show_chrome,
                },
            });
        }
        Ok(Self { routes })
    }

    /// Router over the built-in [`ROUTES`] table.
    pub fn with_default_routes() -> Result<Self, RouteTableError> {
        Self::new(ROUTES)
    }

    pub fn resolve(&self, path: &str) -> Result<PageDescriptor, RouteNotFoundError> {
        let normalized = normalize_path(path);
        self.routes
            .iter()
            .find(|route| route.matcher.is_match(normalized))
            .map(|route| route.descriptor)
            .ok_or_else(|| RouteNotFoundError {
                path: path.to_string(),
            })
    }
}

/// Strips exactly one trailing slash; `/` becomes the empty root path.
pub fn normalize_path(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    let mut rest = pattern;
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix(":number") {
            source.push_str(r"\d+");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('*') {
            source.push_str("/?.*");
            rest = tail;
        } else {
            let next = rest
                .char_indices()
                .skip(1)
                .find(|(_, c)| *c == ':' || *c == '*')
                .map_or(rest.len(), |(idx, _)| idx);
            source.push_str(&regex::escape(&rest[..next]));
            rest = &rest[next..];
        }
    }
    source.push('$');
    Regex::new(&source)
}
