//! Cached user list of the Manage Users page and the command refreshing it.
//!
//! UI reads `ctx.cached::<UsersListCompute>()` and dispatches
//! `ctx.dispatch::<RefreshUsersCommand>()` when the page is shown or "Refresh" is clicked.

use std::any::Any;

use chrono::{DateTime, Utc};
use log::{info, warn};
use snaily_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, Updater, assign_impl,
    no_deps, snapshot_clone,
};
use tokio_util::sync::CancellationToken;

use crate::BusinessConfig;
use crate::manage_users::{User, WhitelistStatus, api};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UsersListResult {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded(Vec<User>),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct UsersListCompute {
    pub result: UsersListResult,
    pub last_fetch: Option<DateTime<Utc>>,
}

impl UsersListCompute {
    pub fn loaded(users: Vec<User>) -> Self {
        Self {
            result: UsersListResult::Loaded(users),
            last_fetch: Some(Utc::now()),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.result, UsersListResult::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.result, UsersListResult::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            UsersListResult::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn users(&self) -> &[User] {
        match &self.result {
            UsersListResult::Loaded(users) => users,
            _ => &[],
        }
    }

    pub fn pending_count(&self) -> usize {
        self.users().iter().filter(|user| user.is_pending()).count()
    }

    /// Changes one user's whitelist status in the loaded list. Does nothing while the
    /// list is not loaded or the user is not in it.
    pub fn set_whitelist_status(&mut self, user_id: &str, status: WhitelistStatus) {
        if let UsersListResult::Loaded(users) = &mut self.result
            && let Some(user) = users.iter_mut().find(|user| user.id == user_id)
        {
            user.whitelist_status = status;
        }
    }
}

impl Compute for UsersListCompute {
    fn deps(&self) -> ComputeDeps {
        no_deps()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {
        // Network IO belongs to `RefreshUsersCommand`.
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}

/// Fetches `GET /admin/manage/users` into [`UsersListCompute`].
#[derive(Default, Debug)]
pub struct RefreshUsersCommand;

impl Command for RefreshUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let previous_fetch = snap
            .try_compute::<UsersListCompute>()
            .and_then(|list| list.last_fetch);

        Box::pin(async move {
            updater.set(UsersListCompute {
                result: UsersListResult::Loading,
                last_fetch: previous_fetch,
            });

            match api::list_users(&config.api_url()).await {
                Ok(users) => {
                    info!("RefreshUsersCommand: loaded {} user(s)", users.len());
                    updater.set(UsersListCompute::loaded(users));
                }
                Err(err) => {
                    warn!("RefreshUsersCommand: {err}");
                    updater.set(UsersListCompute {
                        result: UsersListResult::Error(err.to_string()),
                        last_fetch: previous_fetch,
                    });
                }
            }
        })
    }
}
