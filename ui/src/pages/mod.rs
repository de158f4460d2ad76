//! Pages, one per route:
//! - `login_page`: login form
//! - `manage_users_page`: admin users list with search and tabs
//! - `external_page`: routes served by other parts of the dashboard

mod external_page;
mod login_page;
mod manage_users_page;

pub use external_page::external_page;
pub use login_page::login_page;
pub use manage_users_page::manage_users_page;
