//! Reusable widgets. They read states and computes, and only change the app through
//! state updates and command dispatches.

mod login;
mod nav;
mod search;
mod tabs;
pub mod table;

pub use login::login_widget;
pub use nav::nav_bar;
pub use search::{SEARCH_PLACEHOLDER, search_field};
pub use tabs::tab_bar;
pub use table::data_table;
