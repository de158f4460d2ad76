//! Accept / decline of users waiting for whitelist approval.

use std::any::Any;

use log::{info, warn};
use snaily_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, State, Updater,
    assign_impl, no_deps, snapshot_clone,
};
use tokio_util::sync::CancellationToken;
use ustr::Ustr;

use crate::BusinessConfig;
use crate::manage_users::{PendingAction, UsersListCompute, api};

/// Which user the next [`PendingUserCommand`] acts on.
#[derive(Debug, Clone, Default)]
pub struct PendingUserInput {
    pub user_id: Option<Ustr>,
    pub action: Option<PendingAction>,
}

impl State for PendingUserInput {
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

/// Outcome of the latest finished accept / decline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PendingUserStatus {
    #[default]
    Idle,
    Done {
        user_id: Ustr,
        action: PendingAction,
    },
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct PendingUserCompute {
    /// Users whose accept / decline request has not answered yet.
    pub in_flight: Vec<Ustr>,
    pub status: PendingUserStatus,
}

impl PendingUserCompute {
    pub fn is_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn is_user_in_flight(&self, user_id: Ustr) -> bool {
        self.in_flight.contains(&user_id)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            PendingUserStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn finish(&mut self, user_id: Ustr, status: PendingUserStatus) {
        if let Some(index) = self.in_flight.iter().position(|id| *id == user_id) {
            self.in_flight.remove(index);
        }
        self.status = status;
    }
}

impl Compute for PendingUserCompute {
    fn deps(&self) -> ComputeDeps {
        no_deps()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {
        // Written by `PendingUserCommand` only.
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Posts the action in [`PendingUserInput`], then updates the cached user list so the
/// user leaves the pending tab.
///
/// Runs for different users overlap, so every result is published as an edit of the
/// latest cached values rather than a copy of the values seen at dispatch.
#[derive(Default, Debug)]
pub struct PendingUserCommand;

impl Command for PendingUserCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let input = snap.state::<PendingUserInput>().clone();
        let config = snap.state::<BusinessConfig>().clone();

        Box::pin(async move {
            let (Some(user_id), Some(action)) = (input.user_id, input.action) else {
                warn!("PendingUserCommand: dispatched without a user or action");
                updater.modify::<PendingUserCompute>(|pending| {
                    pending.status =
                        PendingUserStatus::Failed("No pending user selected".to_owned());
                });
                return;
            };

            updater.modify::<PendingUserCompute>(move |pending| pending.in_flight.push(user_id));

            if let Err(err) = api::handle_pending(&config.api_url(), &user_id, action).await {
                warn!(
                    "PendingUserCommand: {} of {user_id} failed: {err}",
                    action.as_str()
                );
                updater.modify::<PendingUserCompute>(move |pending| {
                    pending.finish(user_id, PendingUserStatus::Failed(err.to_string()));
                });
                return;
            }

            info!("PendingUserCommand: {} {user_id}", action.as_str());
            updater.modify::<UsersListCompute>(move |list| {
                list.set_whitelist_status(&user_id, action.resulting_status());
            });
            updater.modify::<PendingUserCompute>(move |pending| {
                pending.finish(user_id, PendingUserStatus::Done { user_id, action });
            });
        })
    }

    fn supersedes_previous(&self) -> bool {
        false
    }
}
