//! Login form: username/password fields, error banners and the Discord shortcut.

use egui::{Align, Button, Color32, Key, Layout, OpenUrl, Response, TextEdit, Ui};
use snaily_business::i18n::AUTH;
use snaily_business::{
    AuthCompute, BusinessConfig, FeatureFlags, FieldError, LoginCommand, LoginInput, Messages,
    Route, auth_error_message, discord_login_url, validate_login,
};
use snaily_states::StateCtx;

const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);
const FORM_WIDTH: f32 = 320.0;

/// Renders the login form and dispatches [`LoginCommand`] on submit.
pub fn login_widget(state_ctx: &mut StateCtx, features: &FeatureFlags, ui: &mut Ui) -> Response {
    let messages = state_ctx.state::<Messages>().clone();
    let banner = match state_ctx.state::<Route>() {
        Route::Login { error } => auth_error_message(error.as_deref(), &messages).map(str::to_owned),
        _ => None,
    };
    let status = state_ctx
        .cached::<AuthCompute>()
        .map(|auth| auth.status.clone())
        .unwrap_or_default();
    let discord_url = discord_login_url(state_ctx.state::<BusinessConfig>());

    let original = state_ctx.state::<LoginInput>().clone();
    let mut input = original.clone();
    let mut submit = false;
    let mut go_register = false;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.set_max_width(FORM_WIDTH);
            ui.add_space(20.0);
            ui.heading(messages.t(AUTH, "login"));
            ui.add_space(16.0);

            if let Some(banner) = &banner {
                ui.colored_label(COLOR_RED, banner);
                ui.add_space(8.0);
            }
            if let Some(error) = status.error_message() {
                ui.colored_label(COLOR_RED, error);
                ui.add_space(8.0);
            }

            let validation = validate_login(&input);

            ui.label(messages.t(AUTH, "username"));
            let username = ui.add(TextEdit::singleline(&mut input.username).desired_width(FORM_WIDTH));
            field_error(ui, input.touched, validation.username);

            ui.add_space(8.0);

            ui.label(messages.t(AUTH, "password"));
            let password = ui.add(
                TextEdit::singleline(&mut input.password)
                    .password(true)
                    .desired_width(FORM_WIDTH),
            );
            field_error(ui, input.touched, validation.password);

            if username.changed() || password.changed() {
                input.touched = true;
            }
            if password.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                submit = true;
            }

            ui.add_space(8.0);
            if ui.link(messages.t(AUTH, "noAccount")).clicked() {
                go_register = true;
            }
            ui.add_space(8.0);

            let submitting = status.is_submitting();
            ui.horizontal(|ui| {
                if submitting {
                    ui.spinner();
                }
                let can_submit = validation.is_valid() && !submitting;
                if ui
                    .add_enabled(can_submit, Button::new(messages.t(AUTH, "login")))
                    .clicked()
                {
                    submit = true;
                }
            });

            if features.discord_auth() {
                ui.separator();
                if ui.button(messages.t(AUTH, "loginViaDiscord")).clicked() {
                    ui.ctx().open_url(OpenUrl::new_tab(&discord_url));
                }
            }
        })
        .response;

    if input.username != original.username
        || input.password != original.password
        || input.touched != original.touched
    {
        state_ctx.update::<LoginInput>(|state| *state = input.clone());
    }

    if go_register {
        state_ctx.update::<Route>(|route| *route = Route::Register);
    } else if submit && validate_login(&input).is_valid() && !status.is_submitting() {
        state_ctx.dispatch::<LoginCommand>();
    }

    response
}

fn field_error(ui: &mut Ui, touched: bool, error: Option<FieldError>) {
    if let Some(error) = error.filter(|_| touched) {
        ui.colored_label(COLOR_RED, error.to_string());
    }
}

#[cfg(test)]
mod login_widget_tests {
    use egui::accesskit::Role;
    use egui_kittest::Harness;
    use kittest::{NodeT as _, Queryable};
    use snaily_business::FeatureFlags;

    use crate::state::State;

    #[tokio::test]
    async fn test_login_form_displayed() {
        let mut harness = Harness::new_ui_state(
            |ui, state: &mut State| {
                let features = state.features.clone();
                super::login_widget(&mut state.ctx, &features, ui);
            },
            State::test("http://127.0.0.1:9".to_owned()),
        );
        harness.step();

        assert!(
            harness.query_by_label("Username").is_some(),
            "Username label should be displayed"
        );
        assert!(
            harness.query_by_label("Password").is_some(),
            "Password label should be displayed"
        );
        assert_eq!(
            harness.query_all_by_label("Login").count(),
            2,
            "heading and submit button should both read Login"
        );
        assert!(
            harness
                .query_by_label("Don't have an account? Register")
                .is_some(),
            "register link should be displayed"
        );
    }

    #[tokio::test]
    async fn test_untouched_form_cannot_be_submitted() {
        let mut harness = Harness::new_ui_state(
            |ui, state: &mut State| {
                let features = state.features.clone();
                super::login_widget(&mut state.ctx, &features, ui);
            },
            State::test("http://127.0.0.1:9".to_owned()),
        );
        harness.step();

        let button = harness.get_by_role_and_label(Role::Button, "Login");
        assert!(
            button.accesskit_node().is_disabled(),
            "an empty form is invalid, so Login starts disabled"
        );
    }

    #[tokio::test]
    async fn test_discord_button_follows_feature_flag() {
        let mut state = State::test("http://127.0.0.1:9".to_owned());
        state.features = FeatureFlags::with_disabled([snaily_business::Feature::DiscordAuth]);

        let mut harness = Harness::new_ui_state(
            |ui, state: &mut State| {
                let features = state.features.clone();
                super::login_widget(&mut state.ctx, &features, ui);
            },
            state,
        );
        harness.step();

        assert!(
            harness.query_by_label("Login via Discord").is_none(),
            "Discord login should be hidden when the feature is disabled"
        );
    }
}
