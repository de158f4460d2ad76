//! "Manage Users" admin page: search box, two tabs and their tables.

use egui::{Color32, Response, Ui};
use snaily_business::i18n::{COMMON, MANAGEMENT};
use snaily_business::manage_users::{PENDING_USERS_TAB, UserRowAction, UsersTable};
use snaily_business::{
    ManageUsersTabs, Messages, PendingUserCommand, PendingUserCompute, PendingUserInput,
    RefreshUsersCommand, Route, UsersListCompute, VisibleUsersCompute,
};
use ustr::Ustr;

use crate::{state::State, widgets};

const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

pub fn manage_users_page(state: &mut State, ui: &mut Ui) -> Response {
    let messages = state.ctx.state::<Messages>().clone();
    let (loading, list_error) = {
        let list = state.ctx.compute::<UsersListCompute>();
        (list.is_loading(), list.error_message().map(str::to_owned))
    };
    let (in_flight, pending_error) = {
        let pending = state.ctx.compute::<PendingUserCompute>();
        (pending.in_flight.clone(), pending.error_message().map(str::to_owned))
    };
    let pending_busy = !in_flight.is_empty();
    let tabs = state.ctx.state::<ManageUsersTabs>().tabs;

    let response = ui
        .horizontal(|ui| {
            ui.heading(messages.t(MANAGEMENT, "MANAGE_USERS"));
            if ui
                .add_enabled(!loading, egui::Button::new(messages.t(COMMON, "refresh")))
                .clicked()
            {
                state.ctx.enqueue_command::<RefreshUsersCommand>();
            }
            if loading || pending_busy {
                ui.spinner();
            }
        })
        .response;

    if let Some(error) = &list_error {
        ui.colored_label(COLOR_RED, error);
    }

    ui.add_space(8.0);
    widgets::search_field(&mut state.ctx, ui);
    ui.add_space(8.0);

    let (titles, table) = {
        let visible = state.ctx.compute::<VisibleUsersCompute>();
        let titles = [
            format!("{} ({})", messages.t(MANAGEMENT, "allUsers"), visible.total_count),
            format!(
                "{} ({})",
                messages.t(MANAGEMENT, "pendingUsers"),
                visible.pending_count
            ),
        ];
        let table = tabs
            .active_panel(&[&visible.all, &visible.pending])
            .copied()
            .cloned()
            .unwrap_or_default();
        (titles, table)
    };

    if let Some(index) = widgets::tab_bar(ui, &titles, &tabs) {
        state
            .ctx
            .update::<ManageUsersTabs>(|current| {
                current.tabs.select(index);
            });
    }
    ui.separator();

    let on_pending_tab = tabs.is_active(PENDING_USERS_TAB);
    if on_pending_tab && let Some(error) = &pending_error {
        ui.colored_label(COLOR_RED, error);
    }

    if on_pending_tab && table.rows.is_empty() && !loading {
        ui.label(messages.t(MANAGEMENT, "noPendingUsers"));
    } else if let Some(action) = users_table(ui, &table, &messages, on_pending_tab, &in_flight) {
        on_row_action(state, action);
    }

    response
}

fn users_table(
    ui: &mut Ui,
    table: &UsersTable,
    messages: &Messages,
    pending: bool,
    in_flight: &[Ustr],
) -> Option<UserRowAction> {
    let id_salt = if pending { "pending_users_table" } else { "all_users_table" };
    // A user's buttons stay disabled until its accept / decline answered.
    let enabled = |action: &UserRowAction| match action {
        UserRowAction::Pending(user_id, _) => !in_flight.contains(user_id),
        UserRowAction::Manage(_) => true,
    };
    widgets::data_table(
        ui,
        id_salt,
        &table.columns,
        &table.rows,
        &table.visible,
        messages.bool_labels(),
        enabled,
    )
}

fn on_row_action(state: &mut State, action: UserRowAction) {
    match action {
        UserRowAction::Manage(id) => state.navigate(Route::ManageUser { id }),
        UserRowAction::Pending(user_id, action) => {
            log::info!("{} pending user {user_id}", action.as_str());
            state.ctx.update::<PendingUserInput>(|input| {
                input.user_id = Some(user_id);
                input.action = Some(action);
            });
            state.ctx.enqueue_command::<PendingUserCommand>();
        }
    }
}
