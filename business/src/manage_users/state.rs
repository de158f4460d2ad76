use std::any::Any;

use snaily_states::{State, snapshot_clone};

use crate::TabsState;

pub const ALL_USERS_TAB: usize = 0;
pub const PENDING_USERS_TAB: usize = 1;

/// Search box of the page, shared by both tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersSearch {
    pub query: String,
}

impl State for UsersSearch {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}

/// "All Users" / "Pending Users" tab selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManageUsersTabs {
    pub tabs: TabsState,
}

impl Default for ManageUsersTabs {
    fn default() -> Self {
        Self {
            tabs: TabsState::new(2),
        }
    }
}

impl State for ManageUsersTabs {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
