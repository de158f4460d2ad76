use std::{
    any::{TypeId, type_name},
    collections::BTreeMap,
};

use crate::{Compute, Error, State, ctx::ComputeSlot};

/// Read-only view over the context handed to [`Compute::compute`].
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, Box<dyn State>>,
    computes: &'a BTreeMap<TypeId, ComputeSlot>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(
        states: &'a BTreeMap<TypeId, Box<dyn State>>,
        computes: &'a BTreeMap<TypeId, ComputeSlot>,
    ) -> Self {
        Self { states, computes }
    }

    pub fn try_state<T: State>(&self) -> Result<&'a T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(Error::state_not_found::<T>)
    }

    /// Get a state by type.
    ///
    /// # Panics
    /// Panics if the state type is not registered.
    pub fn state<T: State>(&self) -> &'a T {
        self.try_state::<T>()
            .unwrap_or_else(|_| panic!("Dep: state {} is not registered", type_name::<T>()))
    }

    pub fn try_compute<T: Compute>(&self) -> Result<&'a T, Error> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
            .ok_or_else(Error::compute_not_found::<T>)
    }

    /// Get a compute by type.
    ///
    /// # Panics
    /// Panics if the compute type is not registered.
    pub fn compute<T: Compute>(&self) -> &'a T {
        self.try_compute::<T>()
            .unwrap_or_else(|_| panic!("Dep: compute {} is not registered", type_name::<T>()))
    }
}
