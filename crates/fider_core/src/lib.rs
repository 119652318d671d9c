//! Fider shell core: route resolution, query-string codec and the pure search
//! state machine.
mod context;
mod effect;
mod msg;
pub mod querystring;
mod route;
mod state;
mod update;
mod view_model;

pub use context::{ContextError, CurrentUser, ShellContext, SystemSettings, UserRole};
pub use effect::Effect;
pub use msg::Msg;
pub use querystring::{FilterState, DEFAULT_LIMIT};
pub use route::{
    normalize_path, Page, PageDescriptor, RouteNotFoundError, RoutePattern, RouteTableError,
    Router, ROUTES,
};
pub use state::{Generation, Phase, Post, SearchRequest, SearchSettings, SearchState};
pub use update::update;
pub use view_model::SearchViewModel;
