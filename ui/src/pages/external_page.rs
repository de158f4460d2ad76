use egui::{Response, Ui};
use snaily_business::Route;

use crate::state::State;

/// Placeholder for routes this client only navigates to.
pub fn external_page(state: &mut State, ui: &mut Ui, route: &Route) -> Response {
    let title = match route {
        Route::Register => "Register",
        Route::TempPassword { .. } => "Temporary password",
        Route::Citizen => "Citizen",
        Route::ManageUser { .. } => "Manage User",
        Route::Login { .. } | Route::ManageUsers => "SnailyCAD",
    };

    let mut back = false;
    let response = ui
        .vertical(|ui| {
            ui.heading(title);
            ui.monospace(route.path());
            ui.add_space(8.0);
            if ui.link("Back to users").clicked() {
                back = true;
            }
        })
        .response;

    if back {
        state.navigate(Route::ManageUsers);
    }
    response
}
