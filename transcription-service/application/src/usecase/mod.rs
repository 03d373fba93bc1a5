mod transcribe;

pub use transcribe::*;
