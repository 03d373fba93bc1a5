mod chat;
mod health;
mod voice_chat;

pub use chat::chat;
pub use health::health;
pub use voice_chat::voice_chat;
