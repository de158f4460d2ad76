use std::any::{Any, TypeId, type_name};

use log::error;

use crate::{Dep, Updater};

/// `(state dependencies, compute dependencies)` of a compute.
pub type ComputeDeps = (Vec<TypeId>, Vec<TypeId>);

/// A derived value cached inside [`StateCtx`](crate::StateCtx).
///
/// `compute` runs whenever one of its dependencies changed since the last run. It never
/// mutates itself: the new value is published through the [`Updater`] and applied on the
/// next `sync_computes`.
///
/// Computes with empty dependencies act as caches written by commands.
pub trait Compute: Any + Send {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    fn as_any(&self) -> &dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Replaces `target` with the boxed value when the types line up.
pub fn assign_impl<T: 'static>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => error!("assign_impl: update is not a {}", type_name::<T>()),
    }
}

/// Dependencies of a compute that only reads states.
pub fn state_deps(states: &[TypeId]) -> ComputeDeps {
    (states.to_vec(), Vec::new())
}

/// Dependencies of a cache compute that is only ever written by commands.
pub fn no_deps() -> ComputeDeps {
    (Vec::new(), Vec::new())
}
