use forestops_core::ForestError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl From<ForestError> for ServiceError {
    fn from(e: ForestError) -> Self {
        match e {
            ForestError::NotFound(what) => ServiceError::NotFound(what),
            ForestError::InvalidInput(msg) => ServiceError::InvalidInput(msg),
            other => ServiceError::Unavailable(other.to_string()),
        }
    }
}

impl ServiceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::InvalidInput(_))
    }
}

/// Ordered record storage behind an entity list.
///
/// Screens program against this trait; `MemoryRepository` keeps records in
/// a `Vec` for the lifetime of the screen that owns it.
pub trait Repository<T> {
    /// Every record, in insertion order.
    fn all(&self) -> &[T];
    fn get(&self, id: &str) -> Option<&T>;
    fn get_mut(&mut self, id: &str) -> Option<&mut T>;
    fn push(&mut self, record: T);
    fn remove(&mut self, id: &str) -> Option<T>;
    fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut T));
}
