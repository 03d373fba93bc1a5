mod chat;
mod speech;

pub use chat::{OpenAiChatCompletionAdapter, OpenAiChatConfig};
pub use speech::{OpenAiSpeechConfig, OpenAiSpeechSynthesisAdapter};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
