//! Table rows of both Manage Users tabs.

use ustr::Ustr;

use crate::i18n::{COMMON, Messages};
use crate::manage_users::{PendingAction, User};
use crate::table::{CellValue, Column, Row};

/// What clicking a button in a users table does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRowAction {
    /// Open `/admin/manage/users/{id}`.
    Manage(Ustr),
    Pending(Ustr, PendingAction),
}

pub fn user_columns(messages: &Messages) -> Vec<Column> {
    vec![
        Column::new("Username", "username"),
        Column::new("Rank", "rank"),
        Column::new("LEO Access", "isLeo"),
        Column::new("LEO Supervisor", "isSupervisor"),
        Column::new("EMS/FD Access", "isEmsFd"),
        Column::new("Dispatch Access", "isDispatch"),
        Column::new(messages.t(COMMON, "actions"), "actions"),
    ]
}

pub fn user_row(user: &User, messages: &Messages) -> Row<UserRowAction> {
    Row::new()
        .with("username", CellValue::text(&user.username))
        .with("rank", CellValue::text(user.rank.as_str()))
        .with("isLeo", CellValue::BooleanLabel(user.is_leo))
        .with("isSupervisor", CellValue::BooleanLabel(user.is_supervisor))
        .with("isEmsFd", CellValue::BooleanLabel(user.is_ems_fd))
        .with("isDispatch", CellValue::BooleanLabel(user.is_dispatch))
        .with(
            "actions",
            CellValue::action(
                messages.t(COMMON, "manage"),
                UserRowAction::Manage(Ustr::from(&user.id)),
            ),
        )
}

pub fn pending_columns(messages: &Messages) -> Vec<Column> {
    vec![
        Column::new("Username", "username"),
        Column::new(messages.t(COMMON, "actions"), "actions"),
    ]
}

pub fn pending_row(user: &User, messages: &Messages) -> Row<UserRowAction> {
    let id = Ustr::from(&user.id);
    Row::new()
        .with("username", CellValue::text(&user.username))
        .with(
            "actions",
            CellValue::actions([
                (
                    messages.t(COMMON, "accept").to_owned(),
                    UserRowAction::Pending(id, PendingAction::Accept),
                ),
                (
                    messages.t(COMMON, "decline").to_owned(),
                    UserRowAction::Pending(id, PendingAction::Decline),
                ),
            ]),
        )
}
