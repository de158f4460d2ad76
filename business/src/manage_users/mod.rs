//! "Manage Users" admin page domain.
//!
//! - `model`: wire types of `/admin/manage/users`.
//! - `api`: HTTP helpers, called by commands only.
//! - `state`: search query and tab selection edited by the UI.
//! - `list_users_compute`: cached user list plus the command refreshing it.
//! - `pending_compute`: accept/decline of pending users.
//! - `rows` / `visible_users_compute`: the filterable tables of both tabs.

pub mod api;
pub mod list_users_compute;
pub mod model;
pub mod pending_compute;
pub mod rows;
pub mod state;
pub mod visible_users_compute;

pub use api::{PendingAction, UsersApiError};
pub use list_users_compute::{RefreshUsersCommand, UsersListCompute, UsersListResult};
pub use model::{Rank, User, WhitelistStatus};
pub use pending_compute::{PendingUserCommand, PendingUserCompute, PendingUserInput, PendingUserStatus};
pub use rows::{UserRowAction, pending_columns, pending_row, user_columns, user_row};
pub use state::{ALL_USERS_TAB, ManageUsersTabs, PENDING_USERS_TAB, UsersSearch};
pub use visible_users_compute::{UsersTable, VisibleUsersCompute};
