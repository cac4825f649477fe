//! Handler error types

use thiserror::Error;

/// Error returned by an application event handler
///
/// Never fatal: the router logs it and keeps routing.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler could not complete its work
    #[error("Handler failed: {0}")]
    Failed(String),

    /// Error raised by a collaborator the handler called
    #[error(transparent)]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Create a handler failure with a message
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Wrap any error raised by a collaborator
    pub fn source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(err))
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
