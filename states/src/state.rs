use std::any::Any;

/// A plain value owned by [`StateCtx`](crate::StateCtx).
///
/// States are edited directly by UI code through `state_mut` / `update`. Every edit marks
/// the computes that list the state in their dependencies as dirty.
pub trait State: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone handed to commands through [`CommandSnapshot`](crate::CommandSnapshot).
    ///
    /// States returning `None` are not visible to commands.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Boxes a clone of `value` for [`State::snapshot`] and [`Compute::snapshot`](crate::Compute::snapshot).
pub fn snapshot_clone<T: Clone + Send + 'static>(value: &T) -> Option<Box<dyn Any + Send>> {
    Some(Box::new(value.clone()))
}
