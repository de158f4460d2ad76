//! Login page, shown for `/auth/login`.

use crate::{state::State, widgets};
use egui::{Response, Ui};

/// Renders the login form with the feature flags resolved at startup.
pub fn login_page(state: &mut State, ui: &mut Ui) -> Response {
    widgets::login_widget(&mut state.ctx, &state.features, ui)
}
