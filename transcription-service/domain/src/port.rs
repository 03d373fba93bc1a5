use std::path::Path;

use async_trait::async_trait;

use crate::{DomainError, RecognizedSpeech};

/// Speech-to-text engine invoked with a path to an on-disk audio file.
/// The caller owns the file and its cleanup; implementations must not
/// delete or move it.
#[async_trait]
pub trait SttEnginePort: Send + Sync {
    async fn transcribe_file(&self, path: &Path) -> Result<RecognizedSpeech, DomainError>;
}
