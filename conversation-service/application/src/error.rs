use conversation_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("transcription service unreachable; make sure it is running at {endpoint}")]
    TranscriberUnavailable { endpoint: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for ApplicationError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(message) => ApplicationError::Validation(message),
            DomainError::TranscriberUnavailable { endpoint } => {
                ApplicationError::TranscriberUnavailable { endpoint }
            }
            DomainError::ExternalService { service, message } => {
                ApplicationError::Internal(format!("{service} error: {message}"))
            }
            DomainError::Internal(message) => ApplicationError::Internal(message),
        }
    }
}
