use thiserror::Error;
use transcription_domain::DomainError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    UnprocessableAudio(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for ApplicationError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(message) => ApplicationError::Validation(message),
            // The engine-level cause stays in the logs; callers only learn
            // that their file could not be processed.
            DomainError::UnprocessableAudio(_) => ApplicationError::UnprocessableAudio(
                "audio processing failed; the file may be corrupt or in an unsupported format"
                    .to_string(),
            ),
            DomainError::Internal(message) => ApplicationError::Internal(message),
        }
    }
}
