//! Domain layer of the SnailyCAD admin client.
//!
//! Everything the UI reads or triggers lives here as `State`, `Compute` or `Command`
//! types registered in a [`StateCtx`]; widgets only render and dispatch.

mod cad_settings;
mod config;
mod features;
pub mod http;
pub mod i18n;
mod login_state;
pub mod manage_users;
mod route;
pub mod table;
mod tabs;

#[cfg(test)]
mod test_utils;

use snaily_states::StateCtx;

pub use cad_settings::{CadSettings, load_cad_settings};
pub use config::{BusinessConfig, ConfigError, DEFAULT_API_URL};
pub use features::{Feature, FeatureFlags};
pub use i18n::Messages;
pub use login_state::{
    AuthCompute, AuthErrorCode, AuthStatus, FieldError, LoginCommand, LoginInput, LoginRequest,
    LoginResponse, LoginValidation, PASSWORD_MAX_LEN, PASSWORD_MIN_LEN,
    USERNAME_MAX_LEN, USERNAME_MIN_LEN, auth_error_message, discord_login_url, resolve_login,
    validate_login,
};
pub use manage_users::{
    ManageUsersTabs, PendingUserCommand, PendingUserCompute, PendingUserInput,
    RefreshUsersCommand, UsersListCompute, UsersSearch, VisibleUsersCompute,
};
pub use route::Route;
pub use tabs::TabsState;

/// Context with every state and compute of the app registered.
///
/// Computes run in registration order, so derived computes come after the caches they read.
pub fn build_state_ctx(config: BusinessConfig, route: Route) -> StateCtx {
    let mut ctx = StateCtx::new();

    ctx.add_state(config);
    ctx.add_state(route);
    ctx.add_state(Messages::english());

    // Login
    ctx.add_state(LoginInput::default());
    ctx.record_compute(AuthCompute::default());

    // Manage users
    ctx.add_state(UsersSearch::default());
    ctx.add_state(ManageUsersTabs::default());
    ctx.add_state(PendingUserInput::default());
    ctx.record_compute(UsersListCompute::default());
    ctx.record_compute(PendingUserCompute::default());
    ctx.record_compute(VisibleUsersCompute::default());

    ctx
}
