use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("State not found: {name}")]
    StateNotFound { name: &'static str },
    #[error("Compute not found: {name}")]
    ComputeNotFound { name: &'static str },
}

impl Error {
    pub fn state_not_found<T>() -> Self {
        Self::StateNotFound {
            name: std::any::type_name::<T>(),
        }
    }

    pub fn compute_not_found<T>() -> Self {
        Self::ComputeNotFound {
            name: std::any::type_name::<T>(),
        }
    }
}
