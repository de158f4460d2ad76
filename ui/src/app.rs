use std::time::Duration;

use snaily_business::{AuthCompute, RefreshUsersCommand, Route};

use crate::{pages, state::State, widgets};

/// Polling interval while commands are in flight.
const TASK_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

pub struct SnailyApp {
    state: State,
    /// Route rendered on the previous frame, to detect page entries.
    last_route: Option<Route>,
}

impl SnailyApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self {
            state,
            last_route: None,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Leaves the login page once a login attempt produced a destination.
    fn follow_login_redirect(&mut self) {
        if !matches!(self.state.route(), Route::Login { .. }) {
            return;
        }

        let redirect = self
            .state
            .ctx
            .cached::<AuthCompute>()
            .and_then(|auth| auth.status.redirect())
            .cloned();
        if let Some(route) = redirect {
            // Consumed, so coming back to the login page shows the form again.
            self.state.ctx.updater().set(AuthCompute::default());
            self.state.navigate(route);
        }
    }

    fn on_page_enter(&mut self) {
        let route = self.state.route().clone();
        if self.last_route.as_ref() == Some(&route) {
            return;
        }

        if route == Route::ManageUsers {
            self.state.ctx.enqueue_command::<RefreshUsersCommand>();
        }
        self.last_route = Some(route);
    }
}

impl eframe::App for SnailyApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply results published by commands since the last frame
        self.state.ctx.sync_computes();
        self.follow_login_redirect();
        self.on_page_enter();
        self.state.ctx.run_computed();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                widgets::nav_bar(&mut self.state, ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.state.route().clone() {
            Route::Login { .. } => {
                pages::login_page(&mut self.state, ui);
            }
            Route::ManageUsers => {
                pages::manage_users_page(&mut self.state, ui);
            }
            route => {
                pages::external_page(&mut self.state, ui, &route);
            }
        });

        self.state.ctx.run_computed();
        self.state.ctx.flush_commands();

        if self.state.ctx.task_count() > 0 {
            ctx.request_repaint_after(TASK_REPAINT_INTERVAL);
        }
    }
}
