use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForestError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("not permitted: {0}")]
    Unauthorized(String),

    #[error("no active session")]
    NoSession,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl ForestError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ForestError::InvalidInput(msg.into())
    }

    /// True for failures that come from a form the user can correct.
    pub fn is_validation(&self) -> bool {
        matches!(self, ForestError::InvalidInput(_))
    }
}
