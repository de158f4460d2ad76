//! Rows of both tabs after applying the search query.
//!
//! Reruns in the same frame whenever the query, the messages or the cached user list
//! change, so typing filters without any debounce.

use std::any::{Any, TypeId};

use snaily_states::{Compute, ComputeDeps, Dep, Updater, assign_impl};

use crate::i18n::Messages;
use crate::manage_users::{
    UserRowAction, UsersListCompute, UsersSearch, pending_columns, pending_row, user_columns,
    user_row,
};
use crate::table::{Column, Row, filter_indices};

/// One tab's table: every row plus the positions of the rows matching the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Row<UserRowAction>>,
    pub visible: Vec<usize>,
}

impl UsersTable {
    fn build(columns: Vec<Column>, rows: Vec<Row<UserRowAction>>, query: &str, messages: &Messages) -> Self {
        let visible = filter_indices(&rows, &columns, query, messages.bool_labels());
        Self {
            columns,
            rows,
            visible,
        }
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row<UserRowAction>> {
        self.visible.iter().map(|index| &self.rows[*index])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct VisibleUsersCompute {
    pub all: UsersTable,
    pub pending: UsersTable,
    /// Unfiltered counts shown in the tab titles.
    pub total_count: usize,
    pub pending_count: usize,
}

impl Compute for VisibleUsersCompute {
    fn deps(&self) -> ComputeDeps {
        (
            vec![TypeId::of::<UsersSearch>(), TypeId::of::<Messages>()],
            vec![TypeId::of::<UsersListCompute>()],
        )
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let query = deps.state::<UsersSearch>().query.as_str();
        let messages = deps.state::<Messages>();
        let users = deps.compute::<UsersListCompute>().users();

        let all_rows = users.iter().map(|user| user_row(user, messages)).collect();
        let pending_rows = users
            .iter()
            .filter(|user| user.is_pending())
            .map(|user| pending_row(user, messages))
            .collect::<Vec<_>>();

        updater.set(Self {
            total_count: users.len(),
            pending_count: pending_rows.len(),
            all: UsersTable::build(user_columns(messages), all_rows, query, messages),
            pending: UsersTable::build(pending_columns(messages), pending_rows, query, messages),
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}
