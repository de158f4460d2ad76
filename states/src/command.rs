use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, Updater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Manual-only side effect (network IO, mostly).
///
/// Commands never run implicitly: UI code dispatches them. They read an immutable
/// [`CommandSnapshot`] and publish results into computes through the [`Updater`].
/// Dispatching the same command type again cancels the previous run's token, unless
/// [`Command::supersedes_previous`] says otherwise.
pub trait Command: Send + Sync + 'static {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture;

    /// Whether dispatching cancels a run of the same command type that is still going.
    /// Commands whose runs act on different targets return `false` so every run finishes.
    fn supersedes_previous(&self) -> bool {
        true
    }
}
