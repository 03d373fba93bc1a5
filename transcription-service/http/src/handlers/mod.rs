mod health;
mod transcribe;

pub use health::health;
pub use transcribe::transcribe_audio;
