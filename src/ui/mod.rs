//! Component-side consumers of the dispatch engine.

mod binding;
mod event;
mod route;

pub use binding::ActionBinding;
pub use event::{SyntheticEvent, UiEvent};
pub use route::RouteWatcher;
