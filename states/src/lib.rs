//! Reactive state container used by the SnailyCAD admin client.
//!
//! UI code edits [`State`]s, derived values live in [`Compute`]s that rerun when their
//! dependencies change, and network side effects are [`Command`]s spawned on tokio.

mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod runtime;
mod snapshot;
mod state;
mod state_sync_status;
mod task;

pub use command::{Command, CommandFuture};
pub use compute::{Compute, ComputeDeps, assign_impl, no_deps, state_deps};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use runtime::{StateRuntime, Updater};
pub use snapshot::CommandSnapshot;
pub use state::{State, snapshot_clone};
pub use state_sync_status::StateSyncStatus;
pub use task::{TaskHandle, TaskId};
