use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("transcription service unreachable at {endpoint}")]
    TranscriberUnavailable { endpoint: String },

    #[error("{service} error: {message}")]
    ExternalService { service: String, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: &str) -> Self {
        Self::Validation(message.to_string())
    }

    pub fn transcriber_unavailable(endpoint: &str) -> Self {
        Self::TranscriberUnavailable {
            endpoint: endpoint.to_string(),
        }
    }

    pub fn external_service_error(service: &str, message: &str) -> Self {
        Self::ExternalService {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self::Internal(message.to_string())
    }
}
