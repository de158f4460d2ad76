use egui::{Align, Layout, Ui};
use snaily_business::Route;

use crate::state::State;

/// Top bar with the page shortcuts and the current path.
pub fn nav_bar(state: &mut State, ui: &mut Ui) {
    let current = state.route().clone();
    let mut target = None;

    ui.strong("SnailyCAD");
    ui.separator();
    if ui
        .selectable_label(matches!(current, Route::Login { .. }), "Sign in")
        .clicked()
    {
        target = Some(Route::default());
    }
    if ui
        .selectable_label(current == Route::ManageUsers, "Users")
        .clicked()
    {
        target = Some(Route::ManageUsers);
    }

    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
        ui.monospace(current.path());
    });

    if let Some(route) = target.filter(|route| *route != current) {
        state.navigate(route);
    }
}
