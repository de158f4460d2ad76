use std::any::{Any, TypeId, type_name};

use flume::{Receiver, Sender};
use log::warn;

use crate::Compute;

type Modify = Box<dyn FnOnce(&dyn Any) -> Option<Box<dyn Any + Send>> + Send>;

pub(crate) enum UpdateKind {
    /// Replace the compute with this value.
    Set(Box<dyn Any + Send>),
    /// Derive the new value from the one current when the update is applied.
    Modify(Modify),
}

type Update = (TypeId, UpdateKind);

/// Channel carrying compute updates from computes and commands back to the UI thread.
#[derive(Debug)]
pub struct StateRuntime {
    send: Sender<Update>,
    recv: Receiver<Update>,
}

impl Default for StateRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRuntime {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self { send, recv }
    }

    pub fn updater(&self) -> Updater {
        Updater {
            send: self.send.clone(),
        }
    }

    /// Takes every update published so far, in publish order.
    pub(crate) fn drain(&self) -> Vec<Update> {
        self.recv.try_iter().collect()
    }
}

/// Publishes new compute values. Cheap to clone and `Send`, so commands move it into
/// their futures.
#[derive(Debug, Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub fn set<T: Compute>(&self, value: T) {
        self.publish::<T>(UpdateKind::Set(Box::new(value)));
    }

    /// Edits the compute as it stands at the next `sync_computes`, after every update
    /// published before this one. Concurrent commands use it to change one part of a
    /// shared cache without overwriting each other.
    pub fn modify<T: Compute + Clone>(&self, edit: impl FnOnce(&mut T) + Send + 'static) {
        let apply: Modify = Box::new(move |current: &dyn Any| {
            let mut value = current.downcast_ref::<T>()?.clone();
            edit(&mut value);
            Some(Box::new(value) as Box<dyn Any + Send>)
        });
        self.publish::<T>(UpdateKind::Modify(apply));
    }

    fn publish<T: Compute>(&self, update: UpdateKind) {
        if self.send.send((TypeId::of::<T>(), update)).is_err() {
            warn!(
                "Updater: context dropped, discarding update for {}",
                type_name::<T>()
            );
        }
    }
}
